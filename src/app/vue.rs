// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Bande d’expression : un bouton par jeton validé (clic = retirer + rééditer)
// - Afficheur : jeton en cours / résultat / "Erreur"
// - Pavé : chiffres, opérateurs, X, DEL, AC, =
// - Champ X : texte libre (vide = 0)
// - Clavier : ignoré tant qu’un champ texte a le focus

use eframe::egui;
use log::trace;

use super::etat::{AppCalc, Touche};
use crate::noyau::Operateur;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_expression(ui);
                self.ui_afficheur(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variable(ui);
                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_expression(&mut self, ui: &mut egui::Ui) {
        // clic sur un jeton : appliqué après la boucle (pas de mutation pendant l’itération)
        let mut a_retirer = None;

        ui.horizontal_wrapped(|ui| {
            if self.session.jetons().is_empty() {
                ui.weak("(vide)");
            }
            for (i, jeton) in self.session.jetons().iter().enumerate() {
                let resp = ui
                    .small_button(egui::RichText::new(jeton).monospace())
                    .on_hover_text("Retirer et modifier");
                if resp.clicked() {
                    a_retirer = Some(i);
                }
            }
        });

        if let Some(i) = a_retirer {
            trace!("retrait du jeton {i}");
            self.session.retirer_jeton(i);
        }
    }

    fn ui_afficheur(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.session.affichage())
                            .monospace()
                            .size(28.0),
                    );
                });
            });

        let msg = self.message_erreur();
        if !msg.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
    }

    fn ui_variable(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("X =");
            ui.add(
                egui::TextEdit::singleline(self.variable.texte_mut())
                    .desired_width(120.0)
                    .hint_text("0")
                    .id_salt("champ_x")
                    .code_editor(),
            )
            .on_hover_text("Vide = 0. Maj+chiffre ajoute, Ctrl+Alt+Retour efface.");
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_rpn")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "7", Touche::Chiffre('7'));
                self.bouton(ui, "8", Touche::Chiffre('8'));
                self.bouton(ui, "9", Touche::Chiffre('9'));
                self.bouton(ui, "/", Touche::Op(Operateur::Divise));
                ui.end_row();

                self.bouton(ui, "4", Touche::Chiffre('4'));
                self.bouton(ui, "5", Touche::Chiffre('5'));
                self.bouton(ui, "6", Touche::Chiffre('6'));
                self.bouton(ui, "*", Touche::Op(Operateur::Fois));
                ui.end_row();

                self.bouton(ui, "1", Touche::Chiffre('1'));
                self.bouton(ui, "2", Touche::Chiffre('2'));
                self.bouton(ui, "3", Touche::Chiffre('3'));
                self.bouton(ui, "-", Touche::Op(Operateur::Moins));
                ui.end_row();

                self.bouton(ui, "0", Touche::Chiffre('0'));
                self.bouton(ui, ".", Touche::Decimale);
                self.bouton(ui, "X", Touche::Variable);
                self.bouton(ui, "+", Touche::Op(Operateur::Plus));
                ui.end_row();

                self.bouton(ui, "AC", Touche::EffacerTout);
                self.bouton(ui, "DEL", Touche::Retour);
                ui.label("");
                self.bouton(ui, "=", Touche::Egal);
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                let d = self.session.demarche();
                ui.label("Jetons :");
                ui.monospace(&d.jetons);
                ui.label("RPN :");
                ui.monospace(&d.rpn);
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(label));
        if resp.clicked() {
            self.appuyer(touche);
        }
    }

    /// Raccourcis clavier globaux (hors champ texte).
    pub fn clavier(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let events = ctx.input(|i| i.events.clone());
        let mut touches = Vec::new();

        // Maj+chiffre produit aussi un texte ("*", "%"...) : on l’ignore alors.
        let mut ignore_texte = false;

        for event in &events {
            if let egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } = event
            {
                if let Some(c) = chiffre_de(*key) {
                    if modifiers.shift {
                        touches.push(Touche::ChiffreX(c));
                        ignore_texte = true;
                    }
                    continue;
                }
                match key {
                    egui::Key::Backspace if modifiers.command && modifiers.alt => {
                        touches.push(Touche::RetourX)
                    }
                    egui::Key::Backspace => touches.push(Touche::Retour),
                    egui::Key::Enter => touches.push(Touche::Egal),
                    egui::Key::Escape => touches.push(Touche::EffacerTout),
                    _ => {}
                }
            }
        }

        if !ignore_texte {
            for event in &events {
                if let egui::Event::Text(t) = event {
                    touches.extend(t.chars().filter_map(Touche::depuis_char));
                }
            }
        }

        for touche in touches {
            trace!("raccourci: {touche:?}");
            self.appuyer(touche);
        }
    }
}

fn chiffre_de(key: egui::Key) -> Option<char> {
    use egui::Key::*;

    let c = match key {
        Num0 => '0',
        Num1 => '1',
        Num2 => '2',
        Num3 => '3',
        Num4 => '4',
        Num5 => '5',
        Num6 => '6',
        Num7 => '7',
        Num8 => '8',
        Num9 => '9',
        _ => return None,
    };
    Some(c)
}
