//! Boundary to the external text-generation service.
//!
//! Everything that crosses this boundary is untrusted: replies are parsed
//! strictly, and [`InsightService`] turns every failure into a fallback
//! string or a conservative [`AnomalyVerdict`](fabwatch_core::AnomalyVerdict).

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;
pub mod service;

pub use client::{GeminiClient, GenerationRequest, TextGenerator};
pub use error::InsightError;
pub use service::InsightService;
