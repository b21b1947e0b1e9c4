use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use anyhow::{Context as _, Result};
use eframe::egui::{ColorImage, Context, TextureHandle, TextureOptions};
use tracing::{debug, warn};

use crate::lookup::Transport;

const MAX_IMAGE_SIDE: u32 = 256;

enum ImageEntry {
    Pending {
        generation: u64,
        cancel: Arc<AtomicBool>,
    },
    Ready(TextureHandle),
    Failed,
}

pub(in crate::app) enum ImageState<'a> {
    Loading,
    Ready(&'a TextureHandle),
    Failed,
}

struct ImageResponse {
    url: String,
    generation: u64,
    image: Result<ColorImage, String>,
}

/// Profile pictures keyed by URL. Each URL is fetched at most once while it
/// stays referenced; evicting a URL cancels its in-flight request and any
/// response that arrives afterwards is dropped.
pub(in crate::app) struct ImageCache {
    transport: Arc<dyn Transport>,
    entries: HashMap<String, ImageEntry>,
    generation: u64,
    tx: Sender<ImageResponse>,
    rx: Receiver<ImageResponse>,
}

impl ImageCache {
    pub(in crate::app) fn new(transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            transport,
            entries: HashMap::new(),
            generation: 0,
            tx,
            rx,
        }
    }

    pub(in crate::app) fn state(&self, url: &str) -> ImageState<'_> {
        match self.entries.get(url) {
            Some(ImageEntry::Ready(texture)) => ImageState::Ready(texture),
            Some(ImageEntry::Failed) => ImageState::Failed,
            Some(ImageEntry::Pending { .. }) | None => ImageState::Loading,
        }
    }

    pub(in crate::app) fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, ImageEntry::Pending { .. }))
            .count()
    }

    pub(in crate::app) fn request(&mut self, url: &str) {
        if self.entries.contains_key(url) {
            return;
        }

        if url.is_empty() {
            self.entries.insert(String::new(), ImageEntry::Failed);
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let cancel = Arc::new(AtomicBool::new(false));
        self.entries.insert(
            url.to_owned(),
            ImageEntry::Pending {
                generation,
                cancel: Arc::clone(&cancel),
            },
        );
        debug!(url, generation, "requesting profile image");

        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        let url = url.to_owned();
        thread::spawn(move || {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let image = transport
                .get_bytes(&url)
                .and_then(|bytes| decode_image(&bytes))
                .map_err(|error| format!("{error:#}"));
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let _ = tx.send(ImageResponse {
                url,
                generation,
                image,
            });
        });
    }

    pub(in crate::app) fn poll(&mut self, ctx: &Context) -> bool {
        let mut changed = false;
        loop {
            let response = match self.rx.try_recv() {
                Ok(response) => response,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };

            let Some(entry) = self.entries.get_mut(&response.url) else {
                debug!(url = %response.url, "discarding image for evicted url");
                continue;
            };
            if !matches!(entry, ImageEntry::Pending { generation, .. } if *generation == response.generation)
            {
                debug!(url = %response.url, "discarding stale image response");
                continue;
            }

            *entry = match response.image {
                Ok(image) => ImageEntry::Ready(ctx.load_texture(
                    format!("avatar:{}", response.url),
                    image,
                    TextureOptions::LINEAR,
                )),
                Err(error) => {
                    warn!("Failed to load image: {} ({error})", response.url);
                    ImageEntry::Failed
                }
            };
            changed = true;
        }
        changed
    }

    pub(in crate::app) fn retain_urls(&mut self, live: &HashSet<&str>) {
        let before = self.entries.len();
        self.entries.retain(|url, entry| {
            let keep = live.contains(url.as_str());
            if !keep && let ImageEntry::Pending { cancel, .. } = entry {
                cancel.store(true, Ordering::Relaxed);
            }
            keep
        });
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!(evicted, "evicted unreferenced profile images");
        }
    }

    fn cancel_all(&mut self) {
        for entry in self.entries.values() {
            if let ImageEntry::Pending { cancel, .. } = entry {
                cancel.store(true, Ordering::Relaxed);
            }
        }
        self.entries.clear();
    }
}

impl Drop for ImageCache {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

pub(in crate::app) fn decode_image(bytes: &[u8]) -> Result<ColorImage> {
    let mut decoded = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    // keep uploads well under the renderer's max texture side
    if decoded.width() > MAX_IMAGE_SIDE || decoded.height() > MAX_IMAGE_SIDE {
        decoded = decoded.thumbnail(MAX_IMAGE_SIDE, MAX_IMAGE_SIDE);
    }
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;
    use crate::lookup::transport::fake::FakeTransport;

    fn png_bytes() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([9, 251, 211, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn poll_until_settled(cache: &mut ImageCache, ctx: &Context) {
        for _ in 0..500 {
            cache.poll(ctx);
            if cache.pending_count() == 0 {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("image request never settled");
    }

    #[test]
    fn decodes_png_into_color_image() {
        let image = decode_image(&png_bytes()).unwrap();
        assert_eq!(image.size, [2, 3]);
    }

    #[test]
    fn oversized_image_is_scaled_down() {
        let image = image::RgbaImage::from_pixel(1200, 600, image::Rgba([255, 50, 50, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.size, [256, 128]);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn loads_each_url_once_and_caches_texture() {
        let ctx = Context::default();
        let transport = FakeTransport::default().image("https://img.test/a.png", png_bytes());
        let mut cache = ImageCache::new(Arc::new(transport));

        cache.request("https://img.test/a.png");
        assert!(matches!(cache.state("https://img.test/a.png"), ImageState::Loading));
        poll_until_settled(&mut cache, &ctx);
        let first_generation = cache.generation;

        cache.request("https://img.test/a.png");
        assert_eq!(cache.generation, first_generation);
        assert!(matches!(cache.state("https://img.test/a.png"), ImageState::Ready(_)));
    }

    #[test]
    fn failed_download_is_marked_failed() {
        let ctx = Context::default();
        let mut cache = ImageCache::new(Arc::new(FakeTransport::default()));

        cache.request("https://img.test/missing.png");
        poll_until_settled(&mut cache, &ctx);
        assert!(matches!(
            cache.state("https://img.test/missing.png"),
            ImageState::Failed
        ));

        cache.request("");
        assert!(matches!(cache.state(""), ImageState::Failed));
    }

    #[test]
    fn stale_generation_is_discarded() {
        let ctx = Context::default();
        let mut cache = ImageCache::new(Arc::new(FakeTransport::default()));
        let cancel = Arc::new(AtomicBool::new(false));
        cache.entries.insert(
            "https://img.test/b.png".to_owned(),
            ImageEntry::Pending {
                generation: 5,
                cancel,
            },
        );

        cache
            .tx
            .send(ImageResponse {
                url: "https://img.test/b.png".to_owned(),
                generation: 4,
                image: decode_image(&png_bytes()).map_err(|error| error.to_string()),
            })
            .unwrap();

        assert!(!cache.poll(&ctx));
        assert!(matches!(cache.state("https://img.test/b.png"), ImageState::Loading));
    }

    #[test]
    fn eviction_cancels_pending_request() {
        let mut cache = ImageCache::new(Arc::new(FakeTransport::default()));
        let cancel = Arc::new(AtomicBool::new(false));
        cache.entries.insert(
            "https://img.test/c.png".to_owned(),
            ImageEntry::Pending {
                generation: 1,
                cancel: Arc::clone(&cancel),
            },
        );

        cache.retain_urls(&HashSet::new());
        assert!(cancel.load(Ordering::Relaxed));
        assert_eq!(cache.pending_count(), 0);
    }

    #[test]
    fn late_response_for_evicted_url_is_dropped() {
        let ctx = Context::default();
        let mut cache = ImageCache::new(Arc::new(FakeTransport::default()));
        cache
            .tx
            .send(ImageResponse {
                url: "https://img.test/gone.png".to_owned(),
                generation: 1,
                image: Err("late".to_owned()),
            })
            .unwrap();

        assert!(!cache.poll(&ctx));
        assert!(cache.entries.is_empty());
    }

    #[test]
    fn drop_cancels_in_flight_requests() {
        let cancel = Arc::new(AtomicBool::new(false));
        {
            let mut cache = ImageCache::new(Arc::new(FakeTransport::default()));
            cache.entries.insert(
                "https://img.test/d.png".to_owned(),
                ImageEntry::Pending {
                    generation: 1,
                    cancel: Arc::clone(&cancel),
                },
            );
        }
        assert!(cancel.load(Ordering::Relaxed));
    }
}
