use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};

use crate::users::{UserKind, UserRef, UserStore};
use crate::util::initial_letter;

use super::super::render_utils::{
    AXIS_LINE, LABEL, TILE, accent_color, box_above, draw_background, draw_frame, draw_grid,
    draw_marker_glow, full_uv, tooltip_fill, vertical_text, with_alpha,
};
use super::GraphRenderer;
use super::images::ImageState;
use super::layout::{AXIS_MARGIN, GRID_DIVISIONS, HoverInfo, Marker, PlotScale, layout_plot};

const TOOLTIP_WIDTH: f32 = 160.0;
const TOOLTIP_HEIGHT: f32 = 80.0;
const TOOLTIP_GAP: f32 = 100.0;

impl GraphRenderer {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui, store: &UserStore) {
        let side = ui.available_width().min(ui.available_height()).max(120.0);
        let (rect, response) = ui.allocate_exact_size(vec2(ui.available_width(), side), Sense::hover());
        let painter = ui.painter_at(rect);

        let layout = layout_plot(store, rect);
        for marker in &layout.markers {
            if let Some(user) = store.get(marker.slot) {
                self.images.request(user.profile_image_url());
            }
        }
        let scale = layout.scale;
        self.layout = Some(layout);
        self.handle_pointer(ui, &response);

        draw_background(&painter, rect);
        draw_grid(&painter, rect, GRID_DIVISIONS);
        draw_frame(&painter, rect);
        Self::draw_axes(&painter, rect);
        Self::draw_scale_labels(&painter, rect, scale);

        for marker in self.markers() {
            if let Some(user) = store.get(marker.slot) {
                self.draw_marker(&painter, marker, user);
            }
        }

        if let Some(hover) = self.hover
            && let Some(user) = store.get(hover.user)
        {
            Self::draw_tooltip(&painter, hover, user);
        }
    }

    fn draw_axes(painter: &Painter, rect: Rect) {
        let stroke = Stroke::new(2.0, AXIS_LINE);
        let axis_y = rect.bottom() - AXIS_MARGIN;
        let axis_x = rect.left() + AXIS_MARGIN;
        painter.line_segment([pos2(rect.left(), axis_y), pos2(rect.right(), axis_y)], stroke);
        painter.line_segment([pos2(axis_x, rect.top()), pos2(axis_x, rect.bottom())], stroke);

        painter.text(
            pos2(rect.center().x, rect.bottom() - 10.0),
            Align2::CENTER_CENTER,
            "Total Score",
            FontId::proportional(12.0),
            LABEL,
        );
        vertical_text(
            painter,
            pos2(rect.left() + 10.0, rect.center().y),
            "Total Badges",
            FontId::proportional(12.0),
            LABEL,
        );
    }

    fn draw_scale_labels(painter: &Painter, rect: Rect, scale: PlotScale) {
        let font = FontId::proportional(12.0);
        painter.text(
            pos2(rect.left() + 25.0, rect.bottom() - 25.0),
            Align2::RIGHT_BOTTOM,
            "0",
            font.clone(),
            LABEL,
        );
        painter.text(
            pos2(rect.right() - 5.0, rect.bottom() - 25.0),
            Align2::RIGHT_BOTTOM,
            scale.max_score.to_string(),
            font.clone(),
            LABEL,
        );
        painter.text(
            pos2(rect.left() + 35.0, rect.bottom() - 35.0),
            Align2::LEFT_BOTTOM,
            "0",
            font.clone(),
            LABEL,
        );
        painter.text(
            pos2(rect.left() + 35.0, rect.top() + 15.0),
            Align2::LEFT_BOTTOM,
            scale.max_badges.to_string(),
            font,
            LABEL,
        );
    }

    fn draw_marker(&self, painter: &Painter, marker: &Marker, user: UserRef<'_>) {
        let accent = accent_color(user.kind());
        let tile = marker.rect();

        let glow_strength = match user.kind() {
            UserKind::Full => 0.4,
            UserKind::Temporary => 0.7,
        };
        draw_marker_glow(painter, tile, with_alpha(accent, glow_strength));

        match self.images.state(user.profile_image_url()) {
            ImageState::Ready(texture) => {
                painter.image(texture.id(), tile, full_uv(), Color32::WHITE);
            }
            ImageState::Loading => {
                painter.rect_filled(tile, 0.0, TILE);
            }
            ImageState::Failed => {
                painter.rect_filled(tile, 0.0, TILE);
                painter.text(
                    tile.center(),
                    Align2::CENTER_CENTER,
                    initial_letter(user.username()),
                    FontId::proportional(16.0),
                    accent,
                );
            }
        }

        painter.rect_stroke(
            tile,
            0.0,
            Stroke::new(2.0, with_alpha(accent, 0.9)),
            StrokeKind::Outside,
        );

        painter.text(
            pos2(marker.center.x, tile.bottom() + 15.0),
            Align2::CENTER_CENTER,
            format!("@{}", user.username()),
            FontId::proportional(10.0),
            LABEL,
        );
    }

    fn draw_tooltip(painter: &Painter, hover: HoverInfo, user: UserRef<'_>) {
        let kind = user.kind();
        let accent = accent_color(kind);
        let anchor = pos2(hover.x, hover.y);
        let frame = box_above(anchor, vec2(TOOLTIP_WIDTH, TOOLTIP_HEIGHT), TOOLTIP_GAP);

        painter.rect_filled(frame.expand(3.0), 2.0, with_alpha(accent, 0.15));
        painter.rect_filled(frame, 0.0, tooltip_fill(kind));
        painter.rect_stroke(
            frame,
            0.0,
            Stroke::new(1.0, with_alpha(accent, 0.8)),
            StrokeKind::Inside,
        );

        let font = FontId::proportional(12.0);
        for (offset, (text, highlighted)) in [75.0, 55.0, 35.0].into_iter().zip(tooltip_lines(user)) {
            painter.text(
                pos2(anchor.x, anchor.y - offset),
                Align2::CENTER_BOTTOM,
                text,
                font.clone(),
                if highlighted { accent } else { Color32::WHITE },
            );
        }
    }
}

fn tooltip_lines(user: UserRef<'_>) -> [(String, bool); 3] {
    let last = match user {
        UserRef::Full(full) => (format!("Twitter: {}", full.twitter_score), false),
        UserRef::Temporary(_) => ("Connect wallet for full score".to_owned(), true),
    };
    [
        (format!("Score: {}", user.total_score()), false),
        (format!("Badges: {}", user.badge_count()), false),
        last,
    ]
}
