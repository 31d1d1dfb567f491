//! Detector output parser
//!
//! Extracts the JSON array of detections from a detector process's stdout,
//! which may be mixed with library log lines.

use crate::error::{Error, Result};
use crate::types::Detection;

/// Extract the JSON array from detector output
///
/// Priority:
/// 1. the last line that is a whole `[...]` array
/// 2. the span from the first `[` to the last `]`
/// 3. error
///
/// # Examples
/// ```
/// use inventario_common::extract_json;
///
/// let output = "Ultralytics 8.3 🚀\n[{\"cls\": 0}]\n";
/// assert_eq!(extract_json(output).unwrap(), "[{\"cls\": 0}]");
/// ```
pub fn extract_json(output: &str) -> Result<&str> {
    if let Some(line) = output
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with('[') && l.ends_with(']'))
        .last()
    {
        return Ok(line);
    }

    if let Some(start) = output.find('[') {
        if let Some(end) = output.rfind(']') {
            if end >= start {
                return Ok(&output[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON array in detector output".into()))
}

/// Parse detector stdout into detections
pub fn parse_detections(output: &str) -> Result<Vec<Detection>> {
    let json_str = extract_json(output)?;
    let detections: Vec<Detection> = serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("detector JSON: {}", e)))?;
    Ok(detections)
}
