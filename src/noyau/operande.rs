// src/noyau/operande.rs
//
// Scanner d’opérandes (sans liste de jetons).
// Motif : [-]chiffres[.chiffres]   (aussi "12." et ".5" pendant la saisie)
//
// Règle du signe : un '-' fait partie de l’opérande s’il est en tête du fragment,
// ou après un caractère qui n’est ni chiffre, ni '.', ni ')'.
// (Dans le texte canonique, la soustraction est toujours '−' U+2212.)
//
// Tout le motif est ASCII : on peut avancer octet par octet, les octets des
// glyphes multi-octets (− × ÷) ne sont jamais des chiffres.

use super::erreurs::ErreurCalcul;
use super::operateur::lire_nombre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operande<'a> {
    pub texte: &'a str,
    /// Plage en octets dans le fragment scanné.
    pub debut: usize,
    pub fin: usize,
}

impl<'a> Operande<'a> {
    pub fn valeur(&self) -> Result<f64, ErreurCalcul> {
        lire_nombre(self.texte)
    }

    pub fn est_decimal(&self) -> bool {
        self.texte.contains('.')
    }

    pub fn est_negatif(&self) -> bool {
        self.texte.starts_with('-')
    }

    /// "0" ou "-0" : entier nul sans point (zéros de tête interdits derrière).
    pub fn est_zero_entier(&self) -> bool {
        self.texte.trim_start_matches('-') == "0"
    }

    /// L’opérande touche-t-elle la fin du fragment ?
    pub fn termine(&self, fragment: &str) -> bool {
        self.fin == fragment.len()
    }
}

/// Itère les opérandes d’un fragment, de gauche à droite.
pub struct Operandes<'a> {
    fragment: &'a str,
    pos: usize,
}

pub fn operandes(fragment: &str) -> Operandes<'_> {
    Operandes { fragment, pos: 0 }
}

/// Opérande la plus à droite ; None si aucun chiffre (distinct d’un zéro valide).
pub fn dernier_operande(fragment: &str) -> Option<Operande<'_>> {
    operandes(fragment).last()
}

/// Opérande la plus à gauche.
pub fn premier_operande(fragment: &str) -> Option<Operande<'_>> {
    operandes(fragment).next()
}

/// Le fragment entier est-il un nombre seul ? (condition d’arrêt de la réduction)
pub fn nombre_seul(fragment: &str) -> Option<f64> {
    let op = premier_operande(fragment)?;
    if op.debut != 0 || !op.termine(fragment) {
        return None;
    }
    op.valeur().ok()
}

fn signe_possible(octets: &[u8], i: usize) -> bool {
    match i.checked_sub(1).map(|p| octets[p]) {
        None => true,
        Some(b) => !(b.is_ascii_digit() || b == b'.' || b == b')'),
    }
}

fn debut_de_nombre(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

impl<'a> Iterator for Operandes<'a> {
    type Item = Operande<'a>;

    fn next(&mut self) -> Option<Operande<'a>> {
        let fragment = self.fragment;
        let octets = fragment.as_bytes();
        let n = octets.len();

        while self.pos < n {
            let i = self.pos;
            let b = octets[i];

            let signe = b == b'-'
                && signe_possible(octets, i)
                && i + 1 < n
                && debut_de_nombre(octets[i + 1]);

            if !signe && !debut_de_nombre(b) {
                self.pos += 1;
                continue;
            }

            let mut j = if signe { i + 1 } else { i };
            let mut point = false;
            let mut chiffres = 0usize;
            while j < n {
                match octets[j] {
                    c if c.is_ascii_digit() => {
                        chiffres += 1;
                        j += 1;
                    }
                    b'.' if !point => {
                        point = true;
                        j += 1;
                    }
                    _ => break,
                }
            }

            self.pos = j.max(i + 1);

            // "." ou "-." seuls : pas un opérande
            if chiffres > 0 {
                return Some(Operande {
                    texte: &fragment[i..j],
                    debut: i,
                    fin: j,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textes(fragment: &str) -> Vec<&str> {
        operandes(fragment).map(|o| o.texte).collect()
    }

    #[test]
    fn dernier_operande_simple() {
        let op = dernier_operande("12+3.5").unwrap();
        assert_eq!(op.texte, "3.5");
        assert_eq!((op.debut, op.fin), (3, 6));
        assert!(op.est_decimal());
    }

    #[test]
    fn aucun_chiffre_donne_none() {
        assert_eq!(dernier_operande(""), None);
        assert_eq!(dernier_operande("(−"), None);
        assert_eq!(dernier_operande("."), None);
        assert_eq!(dernier_operande("-"), None);
    }

    #[test]
    fn zero_est_un_operande_valide() {
        let op = dernier_operande("0").unwrap();
        assert_eq!(op.valeur(), Ok(0.0));
        assert!(op.est_zero_entier());
    }

    #[test]
    fn signe_en_tete_ou_apres_operateur() {
        assert_eq!(textes("-2×-3"), vec!["-2", "-3"]);
        assert_eq!(textes("(-4)"), vec!["-4"]);
        assert_eq!(textes("1−-6"), vec!["1", "-6"]);
    }

    #[test]
    fn tiret_apres_valeur_n_est_pas_un_signe() {
        // saisie clavier brute "3-2" : deux opérandes non signés
        assert_eq!(textes("3-2"), vec!["3", "2"]);
        assert_eq!(textes("(1)-2"), vec!["1", "2"]);
    }

    #[test]
    fn formes_de_saisie() {
        assert_eq!(textes("12."), vec!["12."]);
        assert_eq!(textes(".5"), vec![".5"]);
        assert_eq!(textes("-.5"), vec!["-.5"]);
        // un second point coupe l’opérande
        assert_eq!(textes("1.2.3"), vec!["1.2", ".3"]);
    }

    #[test]
    fn plages_en_octets_avec_glyphes_multi_octets() {
        // '×' occupe 2 octets, '−' en occupe 3
        let s = "7×8−9";
        let ops: Vec<_> = operandes(s).collect();
        assert_eq!(ops.len(), 3);
        assert_eq!(&s[ops[1].debut..ops[1].fin], "8");
        assert_eq!(&s[ops[2].debut..ops[2].fin], "9");
    }

    #[test]
    fn termine_detecte_l_operande_en_cours() {
        let s = "12+";
        let op = dernier_operande(s).unwrap();
        assert_eq!(op.texte, "12");
        assert!(!op.termine(s));

        let s = "12+4";
        assert!(dernier_operande(s).unwrap().termine(s));
    }

    #[test]
    fn premier_operande_a_droite_d_un_operateur() {
        let op = premier_operande("-3)+1").unwrap();
        assert_eq!(op.texte, "-3");
        assert_eq!(op.debut, 0);
    }

    #[test]
    fn nombre_seul_condition_d_arret() {
        assert_eq!(nombre_seul("42"), Some(42.0));
        assert_eq!(nombre_seul("-0.25"), Some(-0.25));
        assert_eq!(nombre_seul("2+3"), None);
        assert_eq!(nombre_seul("(5)"), None);
        assert_eq!(nombre_seul(""), None);
    }
}
