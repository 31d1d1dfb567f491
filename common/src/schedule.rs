//! Day → expected photo file name

/// One photo per project day
pub const DAY_IMAGES: [(u32, &str); 5] = [
    (1, "Dia1-Inicio.png"),
    (2, "Dia2-Cameras.png"),
    (3, "Dia3-10Cadeiras.png"),
    (4, "Dia4-20Cadeiras.png"),
    (5, "Dia5-Completo.png"),
];

/// Canonical file name expected for a day, if the day is scheduled
pub fn expected_image(day: i64) -> Option<&'static str> {
    let day = u32::try_from(day).ok()?;
    DAY_IMAGES
        .iter()
        .find(|(d, _)| *d == day)
        .map(|(_, name)| *name)
}
