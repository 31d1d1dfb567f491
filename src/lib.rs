//! Classroom inventory check
//!
//! Runs an object detector over per-day classroom photos and compares the
//! counted furniture/equipment against a planned inventory spreadsheet.

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod scanner;
pub mod server;
pub mod upload;

pub use config::Config;
pub use error::{InventoryError, Result};
