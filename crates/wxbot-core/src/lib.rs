//! Shared types for wxbot: configuration, errors, the active location record,
//! report formatting and the delivery journal.

pub mod config;
pub mod error;
pub mod journal;
pub mod report;
pub mod state;
pub mod types;

pub use error::{Result, WxError};
