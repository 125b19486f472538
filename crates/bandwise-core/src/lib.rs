//! bandwise-core — Adaptive proficiency-testing engine.
//!
//! This crate holds the difficulty table, the band-adjustment state machine,
//! the Bayesian confidence estimator and the session controller that ties
//! them together. Presentation is left to callers.

pub mod band;
pub mod config;
pub mod error;
pub mod estimator;
pub mod level;
pub mod log;
pub mod report;
pub mod session;
pub mod table;

pub use error::AssessError;
pub use level::Level;
pub use session::TestSession;
