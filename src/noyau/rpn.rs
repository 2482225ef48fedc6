// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), une seule passe
// - Puis évaluer la RPN sur une pile explicite
//
// Règles:
// - ^ > × ÷ % > − +, tous associatifs à gauche (comme la réduction pas à pas)
// - Tok::Neg reste sur la pile d’opérateurs et sort juste après la parenthèse
//   fermante de son groupe : "-(a+b)" => "a b + neg"

use super::erreurs::ErreurCalcul;
use super::jetons::Tok;

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(×), LPar, Num(3), Op(+), Num(4), RPar]
///   rpn:    [Num(2), Num(3), Num(4), Op(+), Op(×)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::Neg | Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(t) => out.push(t),
                        None => return Err(ErreurCalcul::ParenthesesDesequilibrees),
                    }
                }

                // un signe collé au groupe sort avec lui
                if matches!(ops.last(), Some(Tok::Neg)) {
                    ops.pop();
                    out.push(Tok::Neg);
                }
            }

            Tok::Op(op) => {
                // dépile tant que le sommet lie au moins aussi fort (associativité à gauche)
                while let Some(top) = ops.last() {
                    let doit_pop = match top {
                        Tok::Neg => true,
                        Tok::Op(haut) => haut.priorite() >= op.priorite(),
                        _ => false,
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::ParenthesesDesequilibrees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de f64.
pub fn evaluer_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalcul> {
    let mut pile: Vec<f64> = Vec::new();

    for tok in rpn {
        match *tok {
            Tok::Num(v) => pile.push(v),

            Tok::Neg => {
                let x = pile
                    .pop()
                    .ok_or_else(|| ErreurCalcul::inattendue("signe sans opérande"))?;
                pile.push(-x);
            }

            Tok::Op(op) => {
                let b = pile
                    .pop()
                    .ok_or_else(|| ErreurCalcul::inattendue("opérande manquante"))?;
                let a = pile
                    .pop()
                    .ok_or_else(|| ErreurCalcul::inattendue("opérande manquante"))?;
                pile.push(op.appliquer(a, b)?);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::inattendue("parenthèse inattendue en RPN"))
            }
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurCalcul::inattendue("expression invalide")),
    }
}
