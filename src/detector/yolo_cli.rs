//! YOLO detector via an ultralytics subprocess
//!
//! The embedded script loads the weights, runs one prediction and prints
//! the boxes as a JSON array on stdout.

use super::Detector;
use crate::config::Config;
use crate::error::{InventoryError, Result};
use inventario_common::{parse_detections, Detection};
use std::path::{Path, PathBuf};
use std::process::Command;

const PREDICT_SCRIPT: &str = r#"
import json, sys
from ultralytics import YOLO

model_path, image_path, iou = sys.argv[1], sys.argv[2], float(sys.argv[3])
res = YOLO(model_path)(image_path, iou=iou, verbose=False)[0]
boxes = res.boxes
out = [
    {"cls": int(c), "box": b, "conf": float(p)}
    for c, b, p in zip(boxes.cls.tolist(), boxes.xyxy.tolist(), boxes.conf.tolist())
]
print(json.dumps(out))
"#;

#[derive(Debug, Clone)]
pub struct YoloCliDetector {
    python: String,
    model_path: PathBuf,
}

impl YoloCliDetector {
    pub fn new(python: impl Into<String>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            model_path: model_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.python.clone(), config.model_path.clone())
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Detector for YoloCliDetector {
    fn detect(&self, image: &Path, iou: f32) -> Result<Vec<Detection>> {
        tracing::debug!(
            python = %self.python,
            model = %self.model_path.display(),
            image = %image.display(),
            iou,
            "running detector"
        );

        let output = Command::new(&self.python)
            .arg("-c")
            .arg(PREDICT_SCRIPT)
            .arg(&self.model_path)
            .arg(image)
            .arg(iou.to_string())
            .output()
            .map_err(|e| InventoryError::Detector(format!("failed to start {}: {}", self.python, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InventoryError::Detector(format!(
                "detector exited with code {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let detections = parse_detections(&stdout)?;
        tracing::debug!(count = detections.len(), "detector finished");
        Ok(detections)
    }
}
