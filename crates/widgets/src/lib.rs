//! Plain-text panels for the terminal dashboard.
//!
//! Every widget is a pure function of a read-only [`AppState`]; none of
//! them can mutate the monitor's state.
//!
//! [`AppState`]: fabwatch_core::AppState

pub mod controls;
pub mod feed;
pub mod input;
pub mod metrics;
pub mod sparkline;

pub use controls::ControlsWidget;
pub use feed::FeedHeaderWidget;
pub use input::InputWidget;
pub use metrics::MetricsWidget;
pub use sparkline::sparkline;
