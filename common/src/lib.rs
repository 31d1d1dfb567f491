//! Classroom Inventory Common Library
//!
//! Types and pure logic shared by the HTTP service and the CLI:
//! class catalog, day schedule, detection tallies and reconciliation.

pub mod catalog;
pub mod error;
pub mod parser;
pub mod reconcile;
pub mod schedule;
pub mod tally;
pub mod types;

pub use catalog::{class_id, ClassId, CLASS_CATALOG};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_detections};
pub use reconcile::{build_result_row, reconcile};
pub use schedule::{expected_image, DAY_IMAGES};
pub use tally::Tally;
pub use types::{Comparison, DayPlanRow, Detection, ExpectedCount, ResultRow, Status};
