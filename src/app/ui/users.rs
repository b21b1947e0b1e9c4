use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ScoreGraphApp;
use super::super::render_utils::accent_color;
use crate::users::{UserRef, UserSlot, UserStore};

impl ScoreGraphApp {
    pub(in crate::app) fn draw_user_panel(&mut self, ui: &mut Ui, now: f64) {
        ui.heading("User Analysis");
        ui.horizontal(|ui| {
            ui.label("Filter");
            ui.text_edit_singleline(&mut self.user_filter);
        });
        ui.separator();

        if self.store.is_empty() {
            ui.label("No users analyzed yet. Enter a Twitter username to see their score and badges.");
        } else {
            let slots = filter_users(&self.store, &self.user_filter);
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .max_height((ui.available_height() - 40.0).max(80.0))
                .show(ui, |ui| {
                    for slot in slots {
                        if let Some(user) = self.store.get(slot) {
                            ui.push_id(user.id(), |ui| user_card(ui, user));
                        }
                    }
                });
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Close panel").clicked() {
                self.show_user_panel = false;
            }
            if ui.button("Clear temporary").clicked() {
                self.clear_temp_users(now);
            }
        });
    }
}

fn user_card(ui: &mut Ui, user: UserRef<'_>) {
    let accent = accent_color(user.kind());
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, accent.gamma_multiply(0.4)))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("@{}", user.username())).strong());
                match user {
                    UserRef::Full(full) if full.is_verified => {
                        ui.label(RichText::new("Verified").color(accent));
                    }
                    UserRef::Full(_) => {}
                    UserRef::Temporary(_) => {
                        ui.label(RichText::new("Temp").color(accent));
                    }
                }
            });

            ui.horizontal_wrapped(|ui| {
                if user.badges().is_empty() {
                    ui.weak("No badges");
                }
                for badge in user.badges() {
                    ui.label(format!("{} {}", badge.icon, badge.name));
                }
            });

            match user {
                UserRef::Full(full) => {
                    ui.label(format!(
                        "Twitter {}  Wallet {}  Telegram {}  Total {}",
                        full.twitter_score, full.wallet_score, full.telegram_score, full.total_score
                    ));
                }
                UserRef::Temporary(temp) => {
                    ui.label(format!(
                        "Twitter {}  Total {}",
                        user.twitter_score(),
                        temp.total_score
                    ));
                    ui.weak("Estimated Twitter data only.");
                    ui.weak("Complete your profile: connect wallet and Telegram.");
                }
            }
        });
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn filter_users(store: &UserStore, query: &str) -> Vec<UserSlot> {
    let query = query.trim();
    let matcher = SkimMatcherV2::default();
    store
        .iter()
        .filter(|(_, user)| query.is_empty() || fuzzy_match_score(&matcher, user.username(), query).is_some())
        .map(|(slot, _)| slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::users::storage::memory::MemoryStorage;
    use crate::users::{TempUser, UserKind};

    fn store_with(names: &[&str]) -> UserStore {
        let mut store = UserStore::load(Box::new(MemoryStorage::default()));
        for name in names {
            store.push_temp(TempUser {
                id: format!("temp-{name}"),
                username: (*name).to_owned(),
                profile_image_url: String::new(),
                twitter_score: 20,
                total_score: 20,
                badges: Vec::new(),
            });
        }
        store
    }

    fn slot(index: usize) -> UserSlot {
        UserSlot {
            kind: UserKind::Temporary,
            index,
        }
    }

    #[test]
    fn empty_query_keeps_everyone() {
        let store = store_with(&["elonmusk", "jack", "vercel"]);
        assert_eq!(filter_users(&store, "  "), vec![slot(0), slot(1), slot(2)]);
    }

    #[test]
    fn query_matches_fuzzily_and_ignores_case() {
        let store = store_with(&["elonmusk", "jack", "vercel"]);
        assert_eq!(filter_users(&store, "emsk"), vec![slot(0)]);
        assert_eq!(filter_users(&store, "JACK"), vec![slot(1)]);
        assert_eq!(filter_users(&store, "zzz"), Vec::<UserSlot>::new());
    }
}
