use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server listen address
    pub bind: String,
    /// YOLO weights
    pub model_path: PathBuf,
    /// Interpreter with ultralytics installed
    pub python: String,
    /// Overlap (IoU) threshold for non-maximum suppression
    pub iou: f32,
    /// Root for per-request upload directories
    pub upload_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".into(),
            model_path: PathBuf::from("modelo_yolo/best.pt"),
            python: "python3".into(),
            iou: 0.6,
            upload_dir: PathBuf::from("temp_uploads"),
        }
    }
}

impl Config {
    /// Config file (if any), then environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InventoryError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("inventario-sala").join("config.json"))
    }

    fn apply_env(&mut self) {
        if let Ok(bind) = std::env::var("INVENTARIO_BIND") {
            self.bind = bind;
        }
        if let Ok(model) = std::env::var("INVENTARIO_MODEL") {
            self.model_path = PathBuf::from(model);
        }
        if let Ok(python) = std::env::var("INVENTARIO_PYTHON") {
            self.python = python;
        }
        if let Ok(dir) = std::env::var("INVENTARIO_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou) {
            return Err(InventoryError::Config(format!(
                "iou must be between 0 and 1, got {}",
                self.iou
            )));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| InventoryError::Config(format!("invalid bind address '{}': {}", self.bind, e)))
    }
}
