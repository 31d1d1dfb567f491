//! Shared types

use crate::catalog::ClassId;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One box reported by the object detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "cls")]
    pub class_id: ClassId,

    /// x1, y1, x2, y2 in pixels
    #[serde(rename = "box", default)]
    pub bbox: [f32; 4],

    #[serde(rename = "conf", default)]
    pub confidence: f32,
}

impl Detection {
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            bbox: [0.0; 4],
            confidence: 1.0,
        }
    }
}

/// Expected quantity of one plan column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedCount {
    pub column: String,
    pub count: u32,
}

/// One row of the uploaded plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlanRow {
    /// As written in the plan; may fall outside the schedule
    pub day: i64,
    /// In the plan's column order
    pub expected: Vec<ExpectedCount>,
}

impl DayPlanRow {
    pub fn new(day: i64) -> Self {
        Self {
            day,
            expected: Vec::new(),
        }
    }

    pub fn with(mut self, column: &str, count: u32) -> Self {
        self.expected.push(ExpectedCount {
            column: column.to_string(),
            count,
        });
        self
    }
}

/// Outcome of comparing one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Missing(u32),
}

impl Status {
    pub fn evaluate(detected: u32, expected: u32) -> Self {
        if detected >= expected {
            Status::Ok
        } else {
            Status::Missing(expected - detected)
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Missing(n) => write!(f, "Faltando {}", n),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Detected vs expected for one class column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    #[serde(rename = "detectado")]
    pub detected: u32,

    #[serde(rename = "esperado")]
    pub expected: u32,

    pub status: Status,
}

/// Result for one analyzed day
///
/// Serialized flat: `{"dia": 1, "imagem": "...", "<class>": {...}, ...}`
/// with class keys in plan column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub day: i64,
    pub image: String,
    pub comparisons: Vec<(String, Comparison)>,
}

impl ResultRow {
    pub fn get(&self, column: &str) -> Option<&Comparison> {
        self.comparisons
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, cmp)| cmp)
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.comparisons.len() + 2))?;
        map.serialize_entry("dia", &self.day)?;
        map.serialize_entry("imagem", &self.image)?;
        for (column, comparison) in &self.comparisons {
            map.serialize_entry(column, comparison)?;
        }
        map.end()
    }
}
