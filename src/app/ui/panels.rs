use eframe::egui::{self, Align, Context, Layout, RichText};

use super::super::ScoreGraphApp;
use super::super::render_utils::{LABEL, accent_color};
use crate::users::UserKind;

impl ScoreGraphApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context, now: f64) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("User Score & Badge Analysis");
                    ui.separator();
                    ui.label(format!("full: {}", self.store.full_users().len()));
                    ui.label(format!("temporary: {}", self.store.temp_users().len()));
                    ui.label(if self.offline { "mode: simulated" } else { "mode: live" });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.toggle_value(&mut self.show_user_panel, "Users");
                    });
                });
            });

        egui::TopBottomPanel::top("controls")
            .resizable(false)
            .show(ctx, |ui| self.draw_controls(ui, now));

        if self.show_user_panel {
            egui::SidePanel::right("users")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_user_panel(ui, now));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                legend_entry(ui, UserKind::Full, "Full Users");
                legend_entry(ui, UserKind::Temporary, "Temporary Users");
            });

            if self.store.is_empty() {
                ui.label(
                    RichText::new(
                        "Enter a Twitter username to plot it on the graph. The X-axis represents \
                         total score, and the Y-axis represents total badges.",
                    )
                    .color(LABEL),
                );
            }

            self.renderer.show(ui, &self.store);
        });
    }
}

fn legend_entry(ui: &mut egui::Ui, kind: UserKind, text: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, accent_color(kind));
    ui.label(text);
}
