// src/app.rs
//
// Calculatrice à réduction — module App (racine)
// ---------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Traduire le clavier en touches (même chemin que les boutons)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{AppCalc, Touche};

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let touches = ctx.input_mut(|i| extraire_touches(&mut i.events));
        for touche in touches {
            self.appuyer(touche);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}

/// Caractères tapés + touches spéciales, dans l’ordre de la frame.
fn touches_clavier(evenements: &[egui::Event]) -> Vec<Touche> {
    let mut touches = Vec::new();
    for e in evenements {
        match e {
            egui::Event::Text(texte) => {
                touches.extend(texte.chars().filter_map(Touche::depuis_caractere));
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => touches.extend(touche_speciale(*key)),
            _ => {}
        }
    }
    touches
}

/// Comme `touches_clavier`, puis retire de la frame les touches spéciales
/// traitées : un bouton qui a le focus ne les reçoit pas une seconde fois.
fn extraire_touches(evenements: &mut Vec<egui::Event>) -> Vec<Touche> {
    let touches = touches_clavier(evenements);
    evenements.retain(|e| {
        !matches!(e, egui::Event::Key { key, .. } if touche_speciale(*key).is_some())
    });
    touches
}

fn touche_speciale(key: egui::Key) -> Option<Touche> {
    match key {
        egui::Key::Enter => Some(Touche::Egal),
        egui::Key::Escape => Some(Touche::ToutEffacer),
        egui::Key::Backspace => Some(Touche::Retour),
        egui::Key::ArrowUp => Some(Touche::HistoriqueHaut),
        egui::Key::ArrowDown => Some(Touche::HistoriqueBas),
        _ => None,
    }
}
