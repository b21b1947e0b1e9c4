use eframe::egui::epaint::TextShape;
use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2, pos2, vec2};

use crate::users::UserKind;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(0, 3, 5);
pub(super) const GRID_LINE: Color32 = Color32::from_rgba_premultiplied(0, 10, 10, 13);
pub(super) const AXIS_LINE: Color32 = Color32::from_rgba_premultiplied(0, 94, 92, 102);
pub(super) const LABEL: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);
pub(super) const TILE: Color32 = Color32::from_rgb(17, 17, 17);

pub(super) fn accent_color(kind: UserKind) -> Color32 {
    match kind {
        UserKind::Full => Color32::from_rgb(0, 210, 210),
        UserKind::Temporary => Color32::from_rgb(255, 50, 50),
    }
}

pub(super) fn tooltip_fill(kind: UserKind) -> Color32 {
    match kind {
        UserKind::Full => Color32::from_rgba_unmultiplied(0, 20, 20, 217),
        UserKind::Temporary => Color32::from_rgba_unmultiplied(50, 0, 0, 217),
    }
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    // faint centre glow, approximated by stacked translucent discs
    let glow = Color32::from_rgb(9, 251, 211);
    let max_radius = rect.width().min(rect.height()) * 0.8;
    for step in 0..6 {
        let t = step as f32 / 6.0;
        let radius = max_radius * (1.0 - t);
        painter.circle_filled(rect.center(), radius, with_alpha(glow, 0.004 + t * 0.004));
    }
}

pub(super) fn draw_grid(painter: &Painter, rect: Rect, divisions: usize) {
    let stroke = Stroke::new(0.5, GRID_LINE);
    for step in 0..=divisions {
        let t = step as f32 / divisions as f32;
        let x = rect.left() + t * rect.width();
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        let y = rect.top() + t * rect.height();
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
    }
}

pub(super) fn draw_frame(painter: &Painter, rect: Rect) {
    let glow = Color32::from_rgb(9, 251, 211);
    painter.rect_stroke(rect, 0.0, Stroke::new(2.0, with_alpha(glow, 0.3)), StrokeKind::Inside);
    painter.rect_stroke(
        rect.shrink(3.0),
        0.0,
        Stroke::new(1.0, with_alpha(glow, 0.1)),
        StrokeKind::Inside,
    );
}

pub(super) fn vertical_text(painter: &Painter, center: Pos2, text: &str, font: FontId, color: Color32) {
    let galley = painter.layout_no_wrap(text.to_owned(), font, color);
    let size = galley.size();
    let origin = center + vec2(-size.y / 2.0, size.x / 2.0);
    painter.add(TextShape::new(origin, galley, color).with_angle(-std::f32::consts::FRAC_PI_2));
}

pub(super) fn draw_marker_glow(painter: &Painter, rect: Rect, color: Color32) {
    let rings = 5;
    for ring in (0..rings).rev() {
        let spread = 5.0 * (ring + 1) as f32 / rings as f32;
        let fade = 1.0 - ring as f32 / rings as f32;
        painter.rect_filled(
            rect.expand(spread),
            2.0,
            blend_color(Color32::TRANSPARENT, with_alpha(color, 0.7), fade * 0.35),
        );
    }
}

pub(super) fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0))
}

pub(super) fn box_above(anchor: Pos2, size: Vec2, gap: f32) -> Rect {
    Rect::from_min_size(pos2(anchor.x - size.x / 2.0, anchor.y - gap), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend_color(a, b, 0.0), a);
        assert_eq!(blend_color(a, b, 1.0), b);
    }

    #[test]
    fn tooltip_box_sits_above_anchor() {
        let rect = box_above(pos2(200.0, 300.0), vec2(160.0, 80.0), 100.0);
        assert_eq!(rect.min, pos2(120.0, 200.0));
        assert_eq!(rect.max, pos2(280.0, 280.0));
    }

    #[test]
    fn kinds_have_distinct_accents() {
        assert_ne!(accent_color(UserKind::Full), accent_color(UserKind::Temporary));
    }
}
