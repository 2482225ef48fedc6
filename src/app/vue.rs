// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Pas de champ éditable : toute saisie passe par appuyer(Touche)
// - Tactile : gros boutons ; clavier géré dans app.rs
// - Démarche : jetons, RPN, chaînes intermédiaires

use eframe::egui;

use super::etat::{AppCalc, Touche};
use crate::noyau::operateur::Operateur;

/// Rangées du pavé (libellé, touche).
const PAVE: [[(&str, Touche); 4]; 5] = [
    [
        ("(", Touche::OuvrirParenthese),
        (")", Touche::FermerParenthese),
        ("%", Touche::Operateur(Operateur::Pourcent)),
        ("÷", Touche::Operateur(Operateur::Divise)),
    ],
    [
        ("7", Touche::Chiffre('7')),
        ("8", Touche::Chiffre('8')),
        ("9", Touche::Chiffre('9')),
        ("×", Touche::Operateur(Operateur::Fois)),
    ],
    [
        ("4", Touche::Chiffre('4')),
        ("5", Touche::Chiffre('5')),
        ("6", Touche::Chiffre('6')),
        ("−", Touche::Operateur(Operateur::Moins)),
    ],
    [
        ("1", Touche::Chiffre('1')),
        ("2", Touche::Chiffre('2')),
        ("3", Touche::Chiffre('3')),
        ("+", Touche::Operateur(Operateur::Plus)),
    ],
    [
        ("±", Touche::Signe),
        ("0", Touche::Chiffre('0')),
        (".", Touche::Point),
        ("^", Touche::Operateur(Operateur::Puissance)),
    ],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice à réduction");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);

                self.ui_actions(ui);
                ui.add_space(6.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");
        Self::champ_monospace(ui, "ecran_entree", &self.entree, 1);

        ui.add_space(4.0);

        ui.label("Résultat :");
        if self.en_erreur {
            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.colored_label(ui.visuals().error_fg_color, &self.resultat);
                });
        } else {
            Self::champ_monospace(ui, "ecran_resultat", &self.resultat, 1);
        }

        if self.equilibre > 0 {
            ui.small(format!("parenthèses ouvertes : {}", self.equilibre));
        }
    }

    fn ui_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.bouton(ui, "AC", Touche::ToutEffacer, "Remise à zéro totale (Échap)");
            self.bouton(ui, "⌫", Touche::Retour, "Efface le dernier symbole");

            ui.separator();

            self.bouton(ui, "↑", Touche::HistoriqueHaut, "Rappelle l’expression précédente");
            self.bouton(ui, "↓", Touche::HistoriqueBas, "Revient à l’expression en cours");
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_reduction")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for (libelle, touche) in rangee {
                        self.bouton(ui, libelle, touche, "");
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        let largeur = 4.0 * 56.0 + 3.0 * 6.0;
        let egal = ui
            .add_sized([largeur, 34.0], egui::Button::new("="))
            .on_hover_text("Évalue (Entrée)");
        if egal.clicked() {
            egal.surrender_focus();
            self.appuyer(Touche::Egal);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);

                let etapes = self.demarche.etapes.join("\n");
                let lignes = self.demarche.etapes.len().max(1);
                Self::champ_demarche_lignes(ui, "Étapes", "demarche_etapes", &etapes, lignes);

                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        Self::champ_demarche_lignes(ui, titre, id, contenu, 2);
    }

    fn champ_demarche_lignes(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str, rows: usize) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, rows);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche, tip: &str) {
        let mut resp = ui.add_sized([56.0, 34.0], egui::Button::new(label));
        if !tip.is_empty() {
            resp = resp.on_hover_text(tip);
        }
        if resp.clicked() {
            // Entrée/Espace ne doivent pas « recliquer » ce bouton
            resp.surrender_focus();
            self.appuyer(touche);
        }
    }
}
