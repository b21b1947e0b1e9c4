use eframe::egui::{Pos2, Rect, Vec2, pos2};

use crate::users::{UserSlot, UserStore};

pub(in crate::app) const AXIS_MARGIN: f32 = 30.0;
pub(in crate::app) const GRID_DIVISIONS: usize = 10;
const MIN_SCORE_DOMAIN: i64 = 100;
const MIN_BADGE_DOMAIN: usize = 5;
const MARKER_CELL_FILL: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct PlotScale {
    pub(in crate::app) max_score: i64,
    pub(in crate::app) max_badges: usize,
}

impl PlotScale {
    pub(in crate::app) fn for_store(store: &UserStore) -> Self {
        store.iter().fold(
            Self {
                max_score: MIN_SCORE_DOMAIN,
                max_badges: MIN_BADGE_DOMAIN,
            },
            |scale, (_, user)| Self {
                max_score: scale.max_score.max(user.total_score()),
                max_badges: scale.max_badges.max(user.badge_count()),
            },
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Marker {
    pub(in crate::app) slot: UserSlot,
    pub(in crate::app) center: Pos2,
    pub(in crate::app) size: f32,
}

impl Marker {
    pub(in crate::app) fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.size))
    }

    pub(in crate::app) fn contains(&self, point: Pos2) -> bool {
        let half = self.size / 2.0;
        point.x >= self.center.x - half
            && point.x <= self.center.x + half
            && point.y >= self.center.y - half
            && point.y <= self.center.y + half
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct HoverInfo {
    pub(in crate::app) user: UserSlot,
    pub(in crate::app) x: f32,
    pub(in crate::app) y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct PlotLayout {
    pub(in crate::app) scale: PlotScale,
    pub(in crate::app) markers: Vec<Marker>,
}

pub(in crate::app) fn marker_size(rect: Rect) -> f32 {
    rect.width().min(rect.height()) / GRID_DIVISIONS as f32 * MARKER_CELL_FILL
}

pub(in crate::app) fn plot_position(
    rect: Rect,
    scale: PlotScale,
    total_score: i64,
    badge_count: usize,
) -> Pos2 {
    let plot_width = rect.width() - AXIS_MARGIN * 2.0;
    let plot_height = rect.height() - AXIS_MARGIN * 2.0;
    let x = rect.left() + AXIS_MARGIN + (total_score as f32 / scale.max_score as f32) * plot_width;
    let y = rect.bottom()
        - AXIS_MARGIN
        - (badge_count as f32 / scale.max_badges as f32) * plot_height;
    pos2(x, y)
}

pub(in crate::app) fn layout_plot(store: &UserStore, rect: Rect) -> PlotLayout {
    let scale = PlotScale::for_store(store);
    let size = marker_size(rect);
    let markers = store
        .iter()
        .map(|(slot, user)| Marker {
            slot,
            center: plot_position(rect, scale, user.total_score(), user.badge_count()),
            size,
        })
        .collect();

    PlotLayout { scale, markers }
}

pub(in crate::app) fn hit_test(markers: &[Marker], pointer: Pos2) -> Option<HoverInfo> {
    markers
        .iter()
        .find(|marker| marker.contains(pointer))
        .map(|marker| HoverInfo {
            user: marker.slot,
            x: marker.center.x,
            y: marker.center.y,
        })
}
