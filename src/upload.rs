//! Per-request upload storage
//!
//! Each request gets its own temporary directory under the configured
//! upload root. The directory is removed when the workspace is dropped.

use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Used when the uploaded plan name sanitizes to nothing
const FALLBACK_PLAN_NAME: &str = "planejamento.xlsx";

/// Reduce an uploaded file name to a safe ASCII name
///
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped, then leading/trailing `.`/`_` are
/// trimmed. Non-ASCII characters are dropped, not transliterated
/// (`Sala_ção.png` → `Sala_o.png`). May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref UNSAFE_RE: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
    }

    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    UNSAFE_RE
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

#[derive(Debug)]
pub struct RequestWorkspace {
    dir: TempDir,
    images: HashMap<String, PathBuf>,
}

impl RequestWorkspace {
    pub fn create(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new().prefix("request-").tempdir_in(root)?;
        std::fs::create_dir(dir.path().join("plan"))?;
        std::fs::create_dir(dir.path().join("images"))?;

        Ok(Self {
            dir,
            images: HashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub async fn store_plan(&mut self, original_name: &str, data: &[u8]) -> Result<PathBuf> {
        let mut name = sanitize_filename(original_name);
        if name.is_empty() {
            name = FALLBACK_PLAN_NAME.to_string();
        }

        let path = self.dir.path().join("plan").join(name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Store one image; returns its sanitized name, or None if it had none
    ///
    /// A later image with the same sanitized name replaces the earlier one.
    pub async fn store_image(&mut self, original_name: &str, data: &[u8]) -> Result<Option<String>> {
        let name = sanitize_filename(original_name);
        if name.is_empty() {
            tracing::warn!(original = %original_name, "image without a usable file name skipped");
            return Ok(None);
        }

        let path = self.dir.path().join("images").join(&name);
        tokio::fs::write(&path, data).await?;
        self.images.insert(name.clone(), path);
        Ok(Some(name))
    }

    /// Sanitized file name → stored path
    pub fn images(&self) -> &HashMap<String, PathBuf> {
        &self.images
    }
}
