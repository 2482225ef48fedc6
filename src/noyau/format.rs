// src/noyau/format.rs
//
// Nombres -> texte.
// `Display` de f64 donne la plus courte écriture qui se relit à l’identique,
// sans exposant : elle peut donc être réinjectée dans l’expression.

/// Texte réinjecté dans l’expression pendant la réduction pas à pas.
pub fn format_nombre(v: f64) -> String {
    format!("{v}")
}

/// Texte affiché à l’écran : comme `format_nombre`, mais "-0" devient "0".
pub fn format_affichage(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format_nombre(v)
}
