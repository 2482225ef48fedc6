//! src/app/etat.rs
//!
//! État de l’éditeur (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, démarche, solde de
//! parenthèses, historique à un niveau) et appliquer chaque touche.
//!
//! Contrats :
//! - Toute saisie passe par `appuyer(Touche)` : pas d’état global caché.
//! - L’entrée reste une expression que le noyau sait réduire (règles de saisie ci-dessous).
//! - `equilibre` = nombre de '(' non encore fermées ; jamais négatif.
//! - Historique : « haut » rappelle l’expression précédente (en mettant l’entrée
//!   courante de côté), « bas » restaure l’entrée mise de côté. Chacun se
//!   verrouille et déverrouille l’autre ; le solde est recompté après chaque rappel.

use crate::noyau::eval::DemarcheNoyau;
use crate::noyau::format::format_affichage;
use crate::noyau::operande::dernier_operande;
use crate::noyau::operateur::{est_glyphe_operateur, Operateur};
use crate::noyau::{equilibre_parentheses, evaluer_expression, ErreurCalcul};

/// Affichage initial (et après AC).
const RESULTAT_INITIAL: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(char),
    Operateur(Operateur),
    Point,
    OuvrirParenthese,
    FermerParenthese,
    Signe,
    Retour,
    ToutEffacer,
    Egal,
    HistoriqueHaut,
    HistoriqueBas,
}

impl Touche {
    /// Caractère tapé -> touche. Les alias clavier '-', '*', '/' donnent − × ÷.
    pub fn depuis_caractere(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Touche::Chiffre(c)),
            '.' => Some(Touche::Point),
            '(' => Some(Touche::OuvrirParenthese),
            ')' => Some(Touche::FermerParenthese),
            's' | 'S' => Some(Touche::Signe),
            '=' => Some(Touche::Egal),
            '-' => Some(Touche::Operateur(Operateur::Moins)),
            '*' => Some(Touche::Operateur(Operateur::Fois)),
            '/' => Some(Touche::Operateur(Operateur::Divise)),
            _ => Operateur::depuis_glyphe(c).map(Touche::Operateur),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub etapes: Vec<String>,
    pub note: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Demarche {
            jetons: d.jetons,
            rpn: d.rpn,
            etapes: d.etapes,
            note: d.note,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Historique {
    /// Dernière expression évaluée.
    pub precedente: String,
    /// Entrée mise de côté pendant le rappel de `precedente`.
    pub en_cours: String,
    pub haut_verrouille: bool,
    pub bas_verrouille: bool,
}

impl Default for Historique {
    fn default() -> Self {
        Self {
            precedente: String::new(),
            en_cours: String::new(),
            haut_verrouille: true,
            bas_verrouille: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // nombre ou message d’erreur
    pub en_erreur: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- saisie ---
    pub equilibre: usize,
    pub historique: Historique,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: RESULTAT_INITIAL.to_string(),
            en_erreur: false,
            demarche: Demarche::default(),
            equilibre: 0,
            historique: Historique::default(),
        }
    }
}

impl AppCalc {
    /// Point d’entrée unique (boutons + clavier).
    pub fn appuyer(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(d) => self.ajouter_chiffre(d),
            Touche::Operateur(op) => self.ajouter_operateur(op),
            Touche::Point => self.ajouter_point(),
            Touche::OuvrirParenthese => self.ouvrir_parenthese(),
            Touche::FermerParenthese => self.fermer_parenthese(),
            Touche::Signe => self.changer_signe(),
            Touche::Retour => self.retour(),
            Touche::ToutEffacer => self.reset_total(),
            Touche::Egal => self.evaluer(),
            Touche::HistoriqueHaut => self.historique_haut(),
            Touche::HistoriqueBas => self.historique_bas(),
        }
    }

    fn dernier_caractere(&self) -> Option<char> {
        self.entree.chars().next_back()
    }

    /// (debut, fin, est_decimal, est_negatif, est_zero_entier) de l’opérande qui
    /// termine l’entrée, s’il y en a une.
    fn operande_en_cours(&self) -> Option<(usize, usize, bool, bool, bool)> {
        dernier_operande(&self.entree)
            .filter(|o| o.termine(&self.entree))
            .map(|o| {
                (
                    o.debut,
                    o.fin,
                    o.est_decimal(),
                    o.est_negatif(),
                    o.est_zero_entier(),
                )
            })
    }

    /* ------------------------ Saisie ------------------------ */

    fn ajouter_chiffre(&mut self, d: char) {
        if self.dernier_caractere() == Some(')') {
            return;
        }

        match self.operande_en_cours() {
            // "0" / "-0" : pas de zéro de tête
            Some((_, fin, _, _, true)) => {
                if d != '0' {
                    let mut tampon = [0u8; 4];
                    self.entree.replace_range(fin - 1..fin, d.encode_utf8(&mut tampon));
                }
            }
            _ => self.entree.push(d),
        }
    }

    fn ajouter_operateur(&mut self, op: Operateur) {
        match self.dernier_caractere() {
            // un opérateur remplace le précédent
            Some(c) if est_glyphe_operateur(c) => {
                self.entree.pop();
                self.entree.push(op.glyphe());
            }
            Some('.') | Some('(') | Some('-') | None => {}
            Some(_) => self.entree.push(op.glyphe()),
        }
    }

    fn ajouter_point(&mut self) {
        if matches!(self.dernier_caractere(), Some(')') | Some('.')) {
            return;
        }
        if matches!(self.operande_en_cours(), Some((_, _, true, _, _))) {
            return;
        }
        self.entree.push('.');
    }

    fn ouvrir_parenthese(&mut self) {
        let permis = match self.dernier_caractere() {
            None | Some('(') | Some('-') => true,
            Some(c) => est_glyphe_operateur(c),
        };
        if permis {
            self.entree.push('(');
            self.equilibre += 1;
        }
    }

    fn fermer_parenthese(&mut self) {
        let apres_valeur = matches!(self.dernier_caractere(), Some(c) if c.is_ascii_digit() || c == ')');
        if self.equilibre >= 1 && apres_valeur {
            self.entree.push(')');
            self.equilibre -= 1;
        }
    }

    /// Inverse le signe de l’opérande en cours, ou pose/retire un signe seul.
    fn changer_signe(&mut self) {
        match self.operande_en_cours() {
            Some((debut, _, _, true, _)) => {
                self.entree.remove(debut);
            }
            Some((debut, _, _, false, _)) => self.entree.insert(debut, '-'),
            None => match self.dernier_caractere() {
                Some('-') => {
                    self.entree.pop();
                }
                None | Some('(') => self.entree.push('-'),
                Some(c) if est_glyphe_operateur(c) => self.entree.push('-'),
                Some(_) => {}
            },
        }
    }

    fn retour(&mut self) {
        match self.entree.pop() {
            Some('(') => self.equilibre = self.equilibre.saturating_sub(1),
            Some(')') => self.equilibre += 1,
            _ => {}
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// AC : remise à zéro totale (entrée + résultat + historique).
    pub fn reset_total(&mut self) {
        *self = Self::default();
    }

    /// « = » : mémorise l’expression, réduit, puis repart d’une entrée vide.
    pub fn evaluer(&mut self) {
        let expression = self.entree.trim().to_string();
        self.historique.precedente = expression.clone();
        self.historique.haut_verrouille = false;

        log::info!("évaluation de {expression:?}");

        if self.equilibre != 0 {
            self.set_erreur(ErreurCalcul::ParenthesesDesequilibrees);
        } else {
            match evaluer_expression(&expression) {
                Ok((valeur, d)) => self.set_resultat(valeur, d.into()),
                Err(e) => self.set_erreur(e),
            }
        }

        self.entree.clear();
        self.equilibre = 0;
    }

    pub fn historique_haut(&mut self) {
        if self.historique.precedente.is_empty() || self.historique.haut_verrouille {
            return;
        }
        let rappel = self.historique.precedente.clone();
        self.historique.en_cours = std::mem::replace(&mut self.entree, rappel);
        self.historique.haut_verrouille = true;
        self.historique.bas_verrouille = false;
        self.recompter_parentheses();
    }

    pub fn historique_bas(&mut self) {
        if self.historique.bas_verrouille {
            return;
        }
        self.entree = self.historique.en_cours.clone();
        self.historique.bas_verrouille = true;
        self.historique.haut_verrouille = false;
        self.recompter_parentheses();
    }

    fn recompter_parentheses(&mut self) {
        self.equilibre = usize::try_from(equilibre_parentheses(&self.entree)).unwrap_or(0);
    }

    /// Utilitaire : placer une erreur (la démarche n’est plus fiable).
    pub fn set_erreur(&mut self, e: ErreurCalcul) {
        if let ErreurCalcul::Inattendue { detail } = &e {
            log::warn!("erreur inattendue : {detail}");
        }
        self.resultat = e.to_string();
        self.en_erreur = true;
        self.demarche = Demarche::default();
    }

    /// Utilitaire : déposer un résultat + sa démarche.
    pub fn set_resultat(&mut self, valeur: f64, demarche: Demarche) {
        self.resultat = format_affichage(valeur);
        self.en_erreur = false;
        self.demarche = demarche;
    }
}
