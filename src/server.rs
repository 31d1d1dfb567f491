//! HTTP surface
//!
//! `POST /processar-projeto` takes a multipart form with one `planejamento`
//! spreadsheet and any number of `imagens` files, and answers with the
//! per-day result rows as a JSON array.

use crate::config::Config;
use crate::detector::Detector;
use crate::error::{InventoryError, Result};
use crate::pipeline::process_project;
use crate::upload::RequestWorkspace;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use inventario_common::ResultRow;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub const PLAN_FIELD: &str = "planejamento";
pub const IMAGES_FIELD: &str = "imagens";

/// Photo uploads are far above axum's default 2 MiB limit
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn Detector>,
    pub iou: f32,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, detector: Arc<dyn Detector>) -> Self {
        Self {
            detector,
            iou: config.iou,
            upload_dir: config.upload_dir.clone(),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "erro": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/processar-projeto", post(process_project_upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener until the process stops
pub async fn run(listener: TcpListener, state: AppState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn serve(config: &Config, detector: Arc<dyn Detector>) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    run(listener, AppState::new(config, detector)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn process_project_upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<Vec<ResultRow>>, InventoryError> {
    // A body that is not multipart has no plan file either
    let result = match multipart {
        Ok(multipart) => handle_upload(&state, multipart).await,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "request is not multipart");
            Err(missing_plan())
        }
    };

    match result {
        Ok(rows) => {
            tracing::info!(days = rows.len(), "project processed");
            Ok(Json(rows))
        }
        Err(e) => {
            tracing::error!(error = %e, "project processing failed");
            Err(e)
        }
    }
}

fn missing_plan() -> InventoryError {
    InventoryError::MissingInput("Arquivo 'planejamento.xlsx' não encontrado".into())
}

async fn handle_upload(state: &AppState, mut multipart: Multipart) -> Result<Vec<ResultRow>> {
    // Removed on every exit path when dropped
    let mut workspace = RequestWorkspace::create(&state.upload_dir)?;
    let mut plan_path = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InventoryError::Upload(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        // Text fields are not files
        let Some(file_name) = field.file_name().map(str::to_string) else {
            tracing::debug!(field = %field_name, "ignoring non-file field");
            continue;
        };

        match field_name.as_str() {
            PLAN_FIELD if plan_path.is_some() => {
                tracing::debug!(file = %file_name, "extra plan file ignored");
            }
            PLAN_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| InventoryError::Upload(e.to_string()))?;
                plan_path = Some(workspace.store_plan(&file_name, &data).await?);
            }
            IMAGES_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| InventoryError::Upload(e.to_string()))?;
                workspace.store_image(&file_name, &data).await?;
            }
            other => {
                tracing::debug!(field = %other, "ignoring unknown field");
            }
        }
    }

    let plan_path = plan_path.ok_or_else(missing_plan)?;

    tracing::info!(images = workspace.images().len(), "request received");

    process_project(&plan_path, workspace.images(), state.detector.clone(), state.iou).await
}
