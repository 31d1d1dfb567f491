//! Class catalog
//!
//! Fixed bijection between the detector's class names and ids.

/// Detector class identifier
pub type ClassId = u32;

/// Student chair
pub const CADEIRA_ALUNO: ClassId = 0;
/// Teacher's desk
pub const MESA_PROF: ClassId = 2;
/// Teacher's stage riser
pub const PALCO_PROF: ClassId = 5;

/// Name → id, in model training order
pub const CLASS_CATALOG: [(&str, ClassId); 11] = [
    ("cadeira_aluno", CADEIRA_ALUNO),
    ("mesa_aluno", 1),
    ("mesa_prof", MESA_PROF),
    ("cadeira_prof", 3),
    ("lousa", 4),
    ("palco_prof", PALCO_PROF),
    ("caixa_som", 6),
    ("camera", 7),
    ("janela", 8),
    ("projetor", 9),
    ("extintor", 10),
];

/// Look up the id of a class name
pub fn class_id(name: &str) -> Option<ClassId> {
    CLASS_CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}
