// src/noyau/operateur.rs
//
// Évaluateur d’opérateurs.
// - Six glyphes : + − × ÷ ^ %   (− = U+2212, le '-' ASCII est réservé au signe)
// - % : a % b = b/100 * a  (« b pour cent de a », ordre des opérandes conservé)
// - ÷ 0 : signal dédié, jamais de littéral non fini réinjecté dans l’expression

use super::erreurs::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    Pourcent,
}

impl Operateur {
    pub fn depuis_glyphe(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '−' => Some(Operateur::Moins),
            '×' => Some(Operateur::Fois),
            '÷' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            '%' => Some(Operateur::Pourcent),
            _ => None,
        }
    }

    pub fn glyphe(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '−',
            Operateur::Fois => '×',
            Operateur::Divise => '÷',
            Operateur::Puissance => '^',
            Operateur::Pourcent => '%',
        }
    }

    /// ^ (3) > × ÷ % (2) > − + (1). Tous associatifs à gauche.
    pub fn priorite(self) -> u8 {
        match self {
            Operateur::Puissance => 3,
            Operateur::Fois | Operateur::Divise | Operateur::Pourcent => 2,
            Operateur::Plus | Operateur::Moins => 1,
        }
    }

    pub fn appliquer(self, a: f64, b: f64) -> Result<f64, ErreurCalcul> {
        let v = match self {
            Operateur::Plus => a + b,
            Operateur::Moins => a - b,
            Operateur::Fois => a * b,
            Operateur::Divise => {
                // couvre aussi -0 et 0÷0
                if b == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                a / b
            }
            Operateur::Puissance => a.powf(b),
            Operateur::Pourcent => b / 100.0 * a,
        };

        if !v.is_finite() {
            return Err(ErreurCalcul::inattendue(format!(
                "{a} {} {b} : résultat non fini",
                self.glyphe()
            )));
        }
        Ok(v)
    }
}

pub fn est_glyphe_operateur(c: char) -> bool {
    Operateur::depuis_glyphe(c).is_some()
}

/// Sous-opération extraite d’une cible localisée.
#[derive(Clone, Debug, PartialEq)]
pub enum SousOperation {
    /// Nombre seul entre parenthèses (éventuellement signé) : valeur transmise telle quelle.
    Simple(f64),
    Binaire {
        gauche: f64,
        droite: f64,
        symbole: char,
    },
}

impl SousOperation {
    /// Découpe « gauche | symbole | droite ».
    /// Les parenthèses englobantes (et un signe devant elles) sont retirées d’abord.
    pub fn analyser(texte: &str) -> Result<Self, ErreurCalcul> {
        let mut negatif = false;
        let mut corps = texte;

        if let Some(interieur) = corps.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            corps = interieur;
        } else if let Some(interieur) = corps.strip_prefix("-(").and_then(|r| r.strip_suffix(')'))
        {
            negatif = true;
            corps = interieur;
        }

        let pos = corps
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-'));

        match pos {
            None => {
                let v = lire_nombre(corps)?;
                Ok(SousOperation::Simple(if negatif { -v } else { v }))
            }
            Some(_) if negatif => Err(ErreurCalcul::inattendue(format!(
                "groupe signé non numérique : {texte:?}"
            ))),
            Some((i, symbole)) => Ok(SousOperation::Binaire {
                gauche: lire_nombre(&corps[..i])?,
                droite: lire_nombre(&corps[i + symbole.len_utf8()..])?,
                symbole,
            }),
        }
    }

    pub fn evaluer(&self) -> Result<f64, ErreurCalcul> {
        match *self {
            SousOperation::Simple(v) => Ok(v),
            SousOperation::Binaire {
                gauche,
                droite,
                symbole,
            } => {
                let op = Operateur::depuis_glyphe(symbole).ok_or_else(|| {
                    ErreurCalcul::inattendue(format!("opérateur inconnu : '{symbole}'"))
                })?;
                op.appliquer(gauche, droite)
            }
        }
    }
}

/// Littéral → f64 (refuse vide, non fini).
pub fn lire_nombre(texte: &str) -> Result<f64, ErreurCalcul> {
    match texte.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ErreurCalcul::inattendue(format!(
            "nombre illisible : {texte:?}"
        ))),
    }
}
