pub mod error;
pub mod event;
pub mod report;
pub mod sample;
pub mod state;

pub use error::{FabError, Result};
pub use event::{AnomalyVerdict, Message};
pub use sample::{wastage_percentage, Sample, WastageModel};
pub use state::{AppState, FabricSpec};
