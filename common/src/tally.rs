//! Detection tally and the stage riser correction

use crate::catalog::{ClassId, MESA_PROF, PALCO_PROF};
use crate::types::Detection;
use std::collections::BTreeMap;

/// Count of detections per class for one image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<ClassId, u32>,
}

impl Tally {
    pub fn from_class_ids<I: IntoIterator<Item = ClassId>>(ids: I) -> Self {
        let mut counts = BTreeMap::new();
        for id in ids {
            *counts.entry(id).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn from_detections(detections: &[Detection]) -> Self {
        Self::from_class_ids(detections.iter().map(|d| d.class_id))
    }

    /// Count for a class, 0 if never detected
    pub fn count(&self, id: ClassId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, id: ClassId, count: u32) {
        self.counts.insert(id, count);
    }

    /// The model tends to miss the stage riser under the teacher's desk:
    /// a detected desk with no riser counts as one riser.
    ///
    /// Returns true if the tally was changed.
    pub fn apply_stage_rule(&mut self) -> bool {
        if self.count(MESA_PROF) > 0 && self.count(PALCO_PROF) == 0 {
            self.set(PALCO_PROF, 1);
            true
        } else {
            false
        }
    }

    /// Tally after the stage rule
    pub fn corrected(mut self) -> Self {
        self.apply_stage_rule();
        self
    }
}
