// src/noyau/jetons.rs

use super::erreurs::ErreurCalcul;
use super::format::format_nombre;
use super::operateur::{lire_nombre, Operateur};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral, signe compris ("-2" est UN jeton).
    Num(f64),

    Op(Operateur),

    /// Signe devant une parenthèse : "-(...)". Lie plus fort que tout opérateur binaire.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
///
/// Grammaire du signe (explicite) :
/// - là où on attend une valeur, '-' est un SIGNE :
///     - suivi d’un chiffre ou de '.' : fusionné dans le littéral ("-2^2" = (-2)^2)
///     - suivi de '(' : Tok::Neg
///     - sinon : erreur
/// - après une valeur, '-' (ASCII, saisie clavier) est une soustraction
/// - '−' (U+2212) est toujours une soustraction
///
/// Supporte aussi les alias clavier '*' (×) et '/' (÷), et ignore les espaces.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    // true au début, après un opérateur, '(' ou un signe
    let mut attend_valeur = true;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if attend_valeur {
            match c {
                '(' => {
                    out.push(Tok::LPar);
                    i += 1;
                }
                '-' => match chars.get(i + 1) {
                    Some('(') => {
                        out.push(Tok::Neg);
                        i += 1;
                    }
                    Some(d) if d.is_ascii_digit() || *d == '.' => {
                        let (v, suite) = lire_litteral(&chars, i + 1)?;
                        out.push(Tok::Num(-v));
                        i = suite;
                        attend_valeur = false;
                    }
                    _ => {
                        return Err(ErreurCalcul::inattendue(format!(
                            "signe isolé (position {i})"
                        )))
                    }
                },
                d if d.is_ascii_digit() || d == '.' => {
                    let (v, suite) = lire_litteral(&chars, i)?;
                    out.push(Tok::Num(v));
                    i = suite;
                    attend_valeur = false;
                }
                _ => {
                    return Err(ErreurCalcul::inattendue(format!(
                        "valeur attendue, trouvé '{c}' (position {i})"
                    )))
                }
            }
            continue;
        }

        // Après une valeur : opérateur ou ')'
        let op = match c {
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            _ => Operateur::depuis_glyphe(c),
        };

        match op {
            Some(op) => {
                out.push(Tok::Op(op));
                attend_valeur = true;
                i += 1;
            }
            None => {
                return Err(ErreurCalcul::inattendue(format!(
                    "opérateur attendu, trouvé '{c}' (position {i})"
                )))
            }
        }
    }

    if attend_valeur && !out.is_empty() {
        return Err(ErreurCalcul::inattendue("expression incomplète"));
    }

    log::trace!("jetons : {}", format_jetons_espaces(&out));
    Ok(out)
}

/// Littéral [chiffres][.chiffres] à partir de `debut`. Au moins un chiffre.
fn lire_litteral(chars: &[char], debut: usize) -> Result<(f64, usize), ErreurCalcul> {
    let mut i = debut;
    let mut point = false;
    while i < chars.len() {
        match chars[i] {
            d if d.is_ascii_digit() => i += 1,
            '.' if !point => {
                point = true;
                i += 1;
            }
            _ => break,
        }
    }
    let texte: String = chars[debut..i].iter().collect();
    let v = lire_nombre(&texte)?;
    Ok((v, i))
}

fn texte_jeton(t: &Tok) -> String {
    match t {
        Tok::Num(v) => format_nombre(*v),
        Tok::Op(op) => op.glyphe().to_string(),
        Tok::Neg => "-".to_string(),
        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),
    }
}

/// Texte canonique (glyphes, sans espaces) : entrée de la réduction pas à pas.
pub fn format_jetons(tokens: &[Tok]) -> String {
    tokens.iter().map(texte_jeton).collect()
}

/// Format utilitaire (debug/“démarche”) : liste de jetons séparés par des espaces.
pub fn format_jetons_espaces(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(texte_jeton)
        .collect::<Vec<_>>()
        .join(" ")
}
