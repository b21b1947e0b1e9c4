use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{Context, Ui};

use crate::lookup::Transport;
use crate::users::UserStore;

mod images;
mod interaction;
mod layout;
mod view;

use self::images::ImageCache;
use self::layout::{HoverInfo, Marker, PlotLayout};

#[derive(Debug, Default)]
pub(in crate::app) struct RedrawScheduler {
    queued: bool,
}

impl RedrawScheduler {
    pub(in crate::app) fn schedule(&mut self) -> bool {
        !std::mem::replace(&mut self.queued, true)
    }

    pub(in crate::app) fn take(&mut self) -> bool {
        std::mem::take(&mut self.queued)
    }

    pub(in crate::app) fn flush(&mut self, ctx: &Context) {
        if self.take() {
            ctx.request_repaint();
        }
    }
}

pub(in crate::app) struct GraphRenderer {
    layout: Option<PlotLayout>,
    hover: Option<HoverInfo>,
    images: ImageCache,
    redraw: RedrawScheduler,
    seen_revision: Option<u64>,
}

impl GraphRenderer {
    pub(in crate::app) fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            layout: None,
            hover: None,
            images: ImageCache::new(transport),
            redraw: RedrawScheduler::default(),
            seen_revision: None,
        }
    }

    pub(in crate::app) fn markers(&self) -> &[Marker] {
        self.layout
            .as_ref()
            .map(|layout| layout.markers.as_slice())
            .unwrap_or(&[])
    }

    pub(in crate::app) fn hover(&self) -> Option<HoverInfo> {
        self.hover
    }

    pub(in crate::app) fn images_loading(&self) -> bool {
        self.images.pending_count() > 0
    }

    pub(in crate::app) fn sync_store(&mut self, store: &UserStore) {
        if self.seen_revision == Some(store.revision()) {
            return;
        }
        self.seen_revision = Some(store.revision());

        let live = store
            .iter()
            .map(|(_, user)| user.profile_image_url())
            .collect::<HashSet<_>>();
        self.images.retain_urls(&live);
        self.hover = None;
        self.redraw.schedule();
    }

    pub(in crate::app) fn show(&mut self, ui: &mut Ui, store: &UserStore) {
        self.sync_store(store);
        if self.images.poll(ui.ctx()) {
            self.redraw.schedule();
        }

        self.draw_graph(ui, store);
        self.redraw.flush(ui.ctx());
    }
}
