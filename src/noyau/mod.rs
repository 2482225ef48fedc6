//! Noyau de réduction
//!
//! Organisation interne :
//! - erreurs.rs      : ErreurCalcul (messages affichés)
//! - operande.rs     : scanner d’opérandes (sans jetons)
//! - operateur.rs    : + − × ÷ ^ % et sous-opérations
//! - jetons.rs       : tokenisation + règle explicite du signe
//! - rpn.rs          : shunting-yard + évaluation sur pile
//! - localisateur.rs : sous-opération prioritaire (réduction pas à pas)
//! - format.rs       : nombres -> texte
//! - eval.rs         : reduire / reduire_pas_a_pas / démarche

pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod localisateur;
pub mod operande;
pub mod operateur;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurCalcul;
pub use eval::{equilibre_parentheses, evaluer_expression, reduire, reduire_pas_a_pas};
