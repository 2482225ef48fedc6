//! Noyau — réduction (pipeline réel)
//!
//! Deux chemins qui doivent toujours donner la même valeur :
//! - `reduire`           : jetons -> RPN -> pile (une seule passe)
//! - `reduire_pas_a_pas` : localiser -> évaluer -> substituer À LA POSITION
//!                         localisée, jusqu’à ce que la chaîne soit un nombre
//!
//! Le second sert à la “démarche” affichée (chaque chaîne intermédiaire).

use super::erreurs::ErreurCalcul;
use super::format::format_nombre;
use super::jetons::{format_jetons, format_jetons_espaces, tokenize, Tok};
use super::localisateur::operation_prioritaire;
use super::operande::nombre_seul;
use super::operateur::SousOperation;
use super::rpn::{evaluer_rpn, to_rpn};

/// Résultat de la réduction pas à pas.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction {
    pub valeur: f64,
    /// Chaîne après chaque substitution (la dernière est le résultat).
    pub etapes: Vec<String>,
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub etapes: Vec<String>,
    pub note: String,
}

/// +1 par '(' et -1 par ')'.
pub fn equilibre_parentheses(expression: &str) -> i64 {
    expression.chars().fold(0, |solde, c| match c {
        '(' => solde + 1,
        ')' => solde - 1,
        _ => solde,
    })
}

/// Contrôle AVANT réduction : solde nul, et jamais négatif en cours de lecture.
pub fn verifier_parentheses(expression: &str) -> Result<(), ErreurCalcul> {
    let mut solde: i64 = 0;
    for c in expression.chars() {
        match c {
            '(' => solde += 1,
            ')' => {
                solde -= 1;
                if solde < 0 {
                    return Err(ErreurCalcul::ParenthesesDesequilibrees);
                }
            }
            _ => {}
        }
    }
    if solde != 0 {
        return Err(ErreurCalcul::ParenthesesDesequilibrees);
    }
    Ok(())
}

fn preparer(expression: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    verifier_parentheses(expression)?;
    tokenize(expression)
}

/// API publique : réduit une expression à un nombre fini.
///
/// L’expression vide vaut 0 (l’écran affiche 0 après « = » sur rien).
pub fn reduire(expression: &str) -> Result<f64, ErreurCalcul> {
    let jetons = preparer(expression)?;
    let rpn = to_rpn(&jetons)?;
    valeur_rpn(&rpn)
}

fn valeur_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalcul> {
    if rpn.is_empty() {
        return Ok(0.0);
    }
    log::debug!("RPN : {}", format_jetons_espaces(rpn));
    evaluer_rpn(rpn)
}

/// Réduction par réécriture de chaîne.
pub fn reduire_pas_a_pas(expression: &str) -> Result<Reduction, ErreurCalcul> {
    let jetons = preparer(expression)?;
    pas_a_pas(&jetons)
}

/// Chaque tour retire au moins un opérateur ou une paire de parenthèses :
/// le nombre de tours est borné par la longueur du texte canonique.
fn pas_a_pas(jetons: &[Tok]) -> Result<Reduction, ErreurCalcul> {
    let mut courant = format_jetons(jetons);
    let mut etapes: Vec<String> = Vec::new();

    if courant.is_empty() {
        return Ok(Reduction {
            valeur: 0.0,
            etapes,
        });
    }

    let limite = courant.len();

    loop {
        if let Some(valeur) = nombre_seul(&courant) {
            return Ok(Reduction { valeur, etapes });
        }
        if etapes.len() > limite {
            return Err(ErreurCalcul::inattendue(format!(
                "réduction sans fin sur {courant:?}"
            )));
        }

        let cible = operation_prioritaire(&courant)?;
        // ÷ 0 : on sort tout de suite, rien n’est substitué
        let valeur = SousOperation::analyser(&cible.texte)?.evaluer()?;

        courant.replace_range(cible.debut..cible.fin, &format_nombre(valeur));
        log::debug!("{} => {}", cible.texte, courant);
        etapes.push(courant.clone());
    }
}

/// Pour l’UI : valeur (chemin pile) + démarche (jetons, RPN, étapes).
/// Une seule tokenisation, partagée par les deux réductions.
pub fn evaluer_expression(expression: &str) -> Result<(f64, DemarcheNoyau), ErreurCalcul> {
    let jetons = preparer(expression)?;
    let rpn = to_rpn(&jetons)?;
    let valeur = valeur_rpn(&rpn)?;

    let etapes = match pas_a_pas(&jetons) {
        Ok(r) => {
            if r.valeur != valeur {
                log::warn!(
                    "réductions divergentes pour {expression:?} : pile={valeur} pas-à-pas={}",
                    r.valeur
                );
            }
            r.etapes
        }
        Err(e) => {
            log::warn!("pas-à-pas impossible pour {expression:?} : {e:?}");
            Vec::new()
        }
    };

    let d = DemarcheNoyau {
        jetons: format_jetons_espaces(&jetons),
        rpn: format_jetons_espaces(&rpn),
        etapes,
        note: "Pipeline: jetons → RPN → pile ; démarche : priorité → calcul → substitution.".into(),
    };

    Ok((valeur, d))
}
