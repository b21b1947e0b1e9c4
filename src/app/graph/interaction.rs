use eframe::egui::{self, Pos2, Ui};

use super::GraphRenderer;
use super::layout::hit_test;

impl GraphRenderer {
    pub(in crate::app) fn update_hover(&mut self, pointer: Option<Pos2>) -> bool {
        let hover = pointer.and_then(|pointer| hit_test(self.markers(), pointer));
        if hover == self.hover {
            return false;
        }

        self.hover = hover;
        self.redraw.schedule();
        true
    }

    pub(in crate::app) fn handle_pointer(&mut self, ui: &Ui, response: &egui::Response) {
        self.update_hover(response.hover_pos());

        if self.hover.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eframe::egui::{Pos2, Rect, Vec2, pos2};

    use super::super::layout::layout_plot;
    use super::*;
    use crate::lookup::transport::fake::FakeTransport;
    use crate::users::storage::memory::MemoryStorage;
    use crate::users::{FullUser, UserStore};

    fn renderer_with_one_marker() -> GraphRenderer {
        let mut store = UserStore::load(Box::new(MemoryStorage::default()));
        store.push_full(FullUser {
            id: "1".to_owned(),
            username: "elonmusk".to_owned(),
            profile_image_url: String::new(),
            twitter_score: 80,
            wallet_score: 30,
            telegram_score: 10,
            total_score: 75,
            badges: Vec::new(),
            is_verified: false,
        });

        let mut renderer = GraphRenderer::new(Arc::new(FakeTransport::default()));
        renderer.layout = Some(layout_plot(
            &store,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(500.0, 500.0)),
        ));
        renderer
    }

    #[test]
    fn hover_follows_pointer() {
        let mut renderer = renderer_with_one_marker();
        let center = renderer.markers()[0].center;

        assert!(renderer.update_hover(Some(center)));
        let hover = renderer.hover().unwrap();
        assert_eq!((hover.x, hover.y), (center.x, center.y));
        assert!(renderer.redraw.take());

        // same marker again: no change, no repaint
        assert!(!renderer.update_hover(Some(center + Vec2::splat(2.0))));
        assert!(!renderer.redraw.take());

        assert!(renderer.update_hover(Some(pos2(1.0, 1.0))));
        assert_eq!(renderer.hover(), None);
    }

    #[test]
    fn pointer_leaving_canvas_clears_hover() {
        let mut renderer = renderer_with_one_marker();
        let center = renderer.markers()[0].center;
        renderer.update_hover(Some(center));

        assert!(renderer.update_hover(None));
        assert_eq!(renderer.hover(), None);
    }
}
