// src/noyau/erreurs.rs
//
// Erreurs terminales du noyau.
// Le texte (Display) est exactement ce que l’écran affiche.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ErreurCalcul {
    /// Solde de parenthèses non nul (détecté AVANT toute réduction).
    #[error("ERREUR : parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    /// Division dont le diviseur vaut 0 : la réduction s’arrête net.
    #[error("ERREUR : division par 0")]
    DivisionParZero,

    /// Cas défensif (symbole inconnu, flux malformé, résultat non fini).
    /// `detail` sert aux logs et aux tests, jamais à l’affichage.
    #[error("ERREUR : erreur inattendue")]
    Inattendue { detail: String },
}

impl ErreurCalcul {
    pub fn inattendue(detail: impl Into<String>) -> Self {
        ErreurCalcul::Inattendue {
            detail: detail.into(),
        }
    }
}
