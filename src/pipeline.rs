//! Request orchestration
//!
//! Plan → per-day loop (route, detect, correct, reconcile) → result rows.
//! The first failing day aborts the whole run.

use crate::detector::{detect_blocking, Detector};
use crate::error::Result;
use crate::plan::read_plan;
use inventario_common::{build_result_row, expected_image, DayPlanRow, ResultRow, Tally};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sanitized file name → stored image path
pub type ImageSet = HashMap<String, PathBuf>;

/// Image scheduled for `day`, if it was supplied
pub fn resolve_day<'a>(day: i64, images: &'a ImageSet) -> Option<(&'static str, &'a PathBuf)> {
    let name = expected_image(day)?;
    images.get(name).map(|path| (name, path))
}

pub async fn process_project(
    plan_path: &Path,
    images: &ImageSet,
    detector: Arc<dyn Detector>,
    iou: f32,
) -> Result<Vec<ResultRow>> {
    let plan = read_plan(plan_path)?;
    tracing::debug!(rows = plan.len(), "plan loaded");
    analyze_days(&plan, images, detector, iou).await
}

pub async fn analyze_days(
    plan: &[DayPlanRow],
    images: &ImageSet,
    detector: Arc<dyn Detector>,
    iou: f32,
) -> Result<Vec<ResultRow>> {
    let mut results = Vec::new();

    for row in plan {
        let Some((image_name, image_path)) = resolve_day(row.day, images) else {
            tracing::warn!(
                day = row.day,
                expected = expected_image(row.day).unwrap_or("-"),
                "image for day not uploaded or name does not match, skipping"
            );
            continue;
        };

        tracing::info!(day = row.day, image = image_name, "analyzing day");

        let detections = detect_blocking(detector.clone(), image_path.clone(), iou).await?;
        let mut tally = Tally::from_detections(&detections);
        if tally.apply_stage_rule() {
            tracing::debug!(day = row.day, "stage riser inferred from teacher's desk");
        }

        results.push(build_result_row(row, image_name, &tally));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::StaticDetector;
    use crate::error::InventoryError;
    use inventario_common::Status;

    fn images(names: &[&str]) -> ImageSet {
        names
            .iter()
            .map(|n| (n.to_string(), PathBuf::from("/uploads").join(n)))
            .collect()
    }

    #[test]
    fn test_resolve_day() {
        let set = images(&["Dia1-Inicio.png", "foto.png"]);
        let (name, path) = resolve_day(1, &set).unwrap();
        assert_eq!(name, "Dia1-Inicio.png");
        assert_eq!(path, &PathBuf::from("/uploads/Dia1-Inicio.png"));

        assert!(resolve_day(2, &set).is_none());
        assert!(resolve_day(6, &set).is_none());
        assert!(resolve_day(-1, &set).is_none());
    }

    #[tokio::test]
    async fn test_desk_implies_riser() {
        let detector = Arc::new(StaticDetector::new().with("Dia1-Inicio.png", &[2]));
        let plan = vec![DayPlanRow::new(1).with("mesa_prof", 1).with("palco_prof", 0)];

        let results = analyze_days(&plan, &images(&["Dia1-Inicio.png"]), detector, 0.6)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let riser = results[0].get("palco_prof").unwrap();
        assert_eq!(riser.detected, 1);
        assert_eq!(riser.status, Status::Ok);
    }

    #[tokio::test]
    async fn test_unscheduled_and_missing_days_are_skipped() {
        let detector = Arc::new(StaticDetector::new().with("Dia3-10Cadeiras.png", &[0; 10]));
        let plan = vec![
            DayPlanRow::new(2).with("camera", 1),
            DayPlanRow::new(3).with("cadeira_aluno", 20),
            DayPlanRow::new(6).with("lousa", 1),
            DayPlanRow::new(-1).with("lousa", 1),
        ];

        let results = analyze_days(
            &plan,
            &images(&["Dia3-10Cadeiras.png"]),
            detector.clone(),
            0.6,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].day, 3);
        let chairs = results[0].get("cadeira_aluno").unwrap();
        assert_eq!(chairs.status.to_string(), "Faltando 10");
        assert_eq!(detector.calls(), 1);
    }

    #[tokio::test]
    async fn test_detector_failure_aborts_run() {
        // Day 2's image has no registered answer, so detection fails
        let detector = Arc::new(StaticDetector::new().with("Dia1-Inicio.png", &[4]));
        let plan = vec![
            DayPlanRow::new(1).with("lousa", 1),
            DayPlanRow::new(2).with("camera", 2),
            DayPlanRow::new(3).with("lousa", 1),
        ];
        let set = images(&["Dia1-Inicio.png", "Dia2-Cameras.png", "Dia3-10Cadeiras.png"]);

        let result = analyze_days(&plan, &set, detector.clone(), 0.6).await;
        assert!(matches!(result, Err(InventoryError::Detector(_))));
        assert_eq!(detector.calls(), 2);
    }
}
