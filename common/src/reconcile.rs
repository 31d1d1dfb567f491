//! Detected vs planned reconciliation

use crate::catalog::class_id;
use crate::tally::Tally;
use crate::types::{Comparison, DayPlanRow, ResultRow, Status};

/// Compare a tally against one plan row
///
/// One comparison per plan column known to the catalog, in plan order.
/// Unknown columns are skipped.
pub fn reconcile(tally: &Tally, row: &DayPlanRow) -> Vec<(String, Comparison)> {
    row.expected
        .iter()
        .filter_map(|entry| {
            let id = class_id(&entry.column)?;
            let detected = tally.count(id);
            Some((
                entry.column.clone(),
                Comparison {
                    detected,
                    expected: entry.count,
                    status: Status::evaluate(detected, entry.count),
                },
            ))
        })
        .collect()
}

pub fn build_result_row(row: &DayPlanRow, image: &str, tally: &Tally) -> ResultRow {
    ResultRow {
        day: row.day,
        image: image.to_string(),
        comparisons: reconcile(tally, row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CADEIRA_ALUNO, MESA_PROF};

    #[test]
    fn test_reconcile_ok_and_missing() {
        let tally = Tally::from_class_ids(std::iter::repeat(CADEIRA_ALUNO).take(10));
        let row = DayPlanRow::new(4).with("cadeira_aluno", 20).with("lousa", 0);

        let result = reconcile(&tally, &row);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, "cadeira_aluno");
        assert_eq!(result[0].1.detected, 10);
        assert_eq!(result[0].1.expected, 20);
        assert_eq!(result[0].1.status.to_string(), "Faltando 10");
        assert_eq!(result[1].1.status, Status::Ok);
    }

    #[test]
    fn test_reconcile_skips_unknown_columns() {
        let tally = Tally::default();
        let row = DayPlanRow::new(1)
            .with("observacao", 3)
            .with("camera", 2)
            .with("ventilador", 1)
            .with("janela", 0);

        let columns: Vec<_> = reconcile(&tally, &row)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(columns, vec!["camera", "janela"]);
    }

    #[test]
    fn test_reconcile_keeps_plan_order() {
        let tally = Tally::default();
        let row = DayPlanRow::new(5)
            .with("extintor", 1)
            .with("cadeira_aluno", 1)
            .with("projetor", 1);

        let columns: Vec<_> = reconcile(&tally, &row)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(columns, vec!["extintor", "cadeira_aluno", "projetor"]);
    }

    #[test]
    fn test_desk_without_riser_scenario() {
        let tally = Tally::from_class_ids([MESA_PROF]).corrected();
        let row = DayPlanRow::new(1).with("mesa_prof", 1).with("palco_prof", 0);

        let result = build_result_row(&row, "Dia1-Inicio.png", &tally);
        assert_eq!(result.day, 1);
        assert_eq!(result.image, "Dia1-Inicio.png");

        let desk = result.get("mesa_prof").unwrap();
        assert_eq!((desk.detected, desk.expected, desk.status), (1, 1, Status::Ok));

        let riser = result.get("palco_prof").unwrap();
        assert_eq!((riser.detected, riser.expected, riser.status), (1, 0, Status::Ok));
    }
}
