// src/noyau/localisateur.rs
//
// Localisateur de la sous-opération prioritaire (réduction pas à pas).
//
// Entrée : texte canonique équilibré (voir jetons::format_jetons), où
// '−' est la soustraction et '-' un signe.
//
// Ordre :
// 1) groupe purement numérique "(x)" / "(-x)" (le plus à gauche), avec son
//    signe éventuel devant : "-(x)"
// 2) sinon, groupe le plus interne : première ')' + '(' la plus proche avant
// 3) dans la fenêtre : palier ^, puis palier × ÷ %, puis palier − +
//    (le plus à gauche dans le palier)
// 4) opérande gauche collée à l’opérateur + opérateur + opérande droite collée

use super::erreurs::ErreurCalcul;
use super::operande::{dernier_operande, premier_operande};

/// Paliers de priorité, du plus fort au plus faible.
const PALIERS: [&[char]; 3] = [&['^'], &['×', '÷', '%'], &['−', '+']];

/// Sous-chaîne à réduire, avec sa plage exacte (octets) dans l’expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cible {
    pub debut: usize,
    pub fin: usize,
    pub texte: String,
}

impl Cible {
    fn depuis_plage(expr: &str, debut: usize, fin: usize) -> Self {
        Cible {
            debut,
            fin,
            texte: expr[debut..fin].to_string(),
        }
    }
}

pub fn contient_parentheses(expr: &str) -> bool {
    expr.contains(['(', ')'])
}

/// Retourne la prochaine opération à réduire et sa position.
/// L’appelant remplace EXACTEMENT cette plage (pas la première occurrence du texte).
pub fn operation_prioritaire(expr: &str) -> Result<Cible, ErreurCalcul> {
    let (base, fenetre) = if contient_parentheses(expr) {
        if let Some(cible) = groupe_numerique(expr) {
            return Ok(cible);
        }

        let fin = expr
            .find(')')
            .ok_or_else(|| ErreurCalcul::inattendue("')' manquante"))?;
        let debut = expr[..fin]
            .rfind('(')
            .ok_or_else(|| ErreurCalcul::inattendue("'(' manquante"))?
            + 1;
        (debut, &expr[debut..fin])
    } else {
        (0, expr)
    };

    let (pos, glyphe) = operateur_prioritaire(fenetre).ok_or_else(|| {
        ErreurCalcul::inattendue(format!("aucun opérateur dans {fenetre:?}"))
    })?;

    let gauche = dernier_operande(&fenetre[..pos])
        .filter(|o| o.fin == pos)
        .ok_or_else(|| {
            ErreurCalcul::inattendue(format!("opérande gauche manquante dans {fenetre:?}"))
        })?;

    let apres = pos + glyphe.len_utf8();
    let droite = premier_operande(&fenetre[apres..])
        .filter(|o| o.debut == 0)
        .ok_or_else(|| {
            ErreurCalcul::inattendue(format!("opérande droite manquante dans {fenetre:?}"))
        })?;

    Ok(Cible::depuis_plage(
        expr,
        base + gauche.debut,
        base + apres + droite.fin,
    ))
}

/// Premier opérateur du palier le plus fort présent dans la fenêtre.
pub fn operateur_prioritaire(fenetre: &str) -> Option<(usize, char)> {
    PALIERS
        .iter()
        .find_map(|palier| fenetre.char_indices().find(|(_, c)| palier.contains(c)))
}

/// "(x)" où x est un littéral éventuellement signé ; inclut un signe '-' juste devant.
fn groupe_numerique(expr: &str) -> Option<Cible> {
    for (i, _) in expr.match_indices('(') {
        let interieur = &expr[i + 1..];
        if !interieur.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-') {
            continue;
        }
        let Some(op) = premier_operande(interieur) else {
            continue;
        };
        if op.debut != 0 || !interieur[op.fin..].starts_with(')') {
            continue;
        }

        let fin = i + 1 + op.fin + 1;
        let debut = if signe_devant(expr, i) { i - 1 } else { i };
        return Some(Cible::depuis_plage(expr, debut, fin));
    }
    None
}

/// Le caractère avant `i` est-il un signe '-' (et non une soustraction ASCII) ?
fn signe_devant(expr: &str, i: usize) -> bool {
    let avant = &expr[..i];
    let Some(reste) = avant.strip_suffix('-') else {
        return false;
    };
    match reste.chars().next_back() {
        None => true,
        Some(c) => !(c.is_ascii_digit() || c == '.' || c == ')'),
    }
}
