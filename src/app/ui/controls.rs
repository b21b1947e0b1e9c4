use eframe::egui::{self, Key, RichText, Ui};

use super::super::ScoreGraphApp;
use super::super::render_utils::LABEL;

const INPUT_WIDTH: f32 = 260.0;

impl ScoreGraphApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui, now: f64) {
        let submitting = self.is_submitting();

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Enter Twitter username")
                    .desired_width(INPUT_WIDTH),
            );
            let entered = input.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

            let label = if submitting { "Adding..." } else { "Add user" };
            let button = ui.add_enabled(!submitting, egui::Button::new(label));
            if submitting {
                ui.spinner();
            }

            if !submitting && (entered || button.clicked()) {
                self.submit(now);
                input.request_focus();
            }

            ui.separator();
            if ui
                .add_enabled(!self.store.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                self.clear_users(now);
            }
            if ui
                .add_enabled(
                    !self.store.temp_users().is_empty(),
                    egui::Button::new("Clear temporary"),
                )
                .clicked()
            {
                self.clear_temp_users(now);
            }
        });

        if let Some(text) = self.notification.text() {
            ui.label(RichText::new(text).color(LABEL));
        }
    }
}
