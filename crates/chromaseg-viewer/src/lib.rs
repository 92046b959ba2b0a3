//! Chromaseg Viewer — shows walkthrough frames in a native window.
//!
//! Frames are grouped into pages at every pause. One window is opened when
//! the walkthrough finishes; any key press advances to the next page and the
//! window closes after the last one. winit allows one event loop per
//! process, so every page shares the same window.

use chromaseg_core::{DisplaySink, Frame, SegError};
use eframe::egui;

/// Errors raised by the native viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("viewer failed: {0}")]
    Eframe(String),
}

impl From<ViewerError> for SegError {
    fn from(err: ViewerError) -> Self {
        SegError::Display(err.to_string())
    }
}

/// A labelled frame ready for upload.
struct Tile {
    label: String,
    image: egui::ColorImage,
}

/// Display sink that pages frames in a native window.
pub struct WindowSink {
    title: String,
    pages: Vec<Vec<Tile>>,
    current: Vec<Tile>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Number of completed pages waiting to be shown.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn close_page(&mut self) {
        if !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
    }
}

impl DisplaySink for WindowSink {
    fn show(&mut self, label: &str, frame: &Frame) -> chromaseg_core::Result<()> {
        let rgb = frame.to_rgb8();
        let size = [rgb.width() as usize, rgb.height() as usize];
        self.current.push(Tile {
            label: label.to_string(),
            image: egui::ColorImage::from_rgb(size, rgb.as_raw()),
        });
        Ok(())
    }

    fn pause(&mut self) -> chromaseg_core::Result<()> {
        self.close_page();
        Ok(())
    }

    fn finish(&mut self) -> chromaseg_core::Result<()> {
        self.close_page();
        if self.pages.is_empty() {
            tracing::warn!("nothing to display");
            return Ok(());
        }
        let pages = std::mem::take(&mut self.pages);
        tracing::info!("opening viewer with {} pages", pages.len());
        run_viewer(&self.title, pages)?;
        Ok(())
    }
}

fn run_viewer(title: &str, pages: Vec<Vec<Tile>>) -> Result<(), ViewerError> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        title,
        options,
        Box::new(|_cc| Ok(Box::new(PagedViewer::new(pages)))),
    )
    .map_err(|e| ViewerError::Eframe(e.to_string()))
}

struct PagedViewer {
    pending: Vec<Vec<Tile>>,
    textures: Vec<Vec<(String, egui::TextureHandle)>>,
    page: usize,
}

impl PagedViewer {
    fn new(pages: Vec<Vec<Tile>>) -> Self {
        Self {
            pending: pages,
            textures: Vec::new(),
            page: 0,
        }
    }

    fn upload(&mut self, ctx: &egui::Context) {
        if self.pending.is_empty() {
            return;
        }
        self.textures = std::mem::take(&mut self.pending)
            .into_iter()
            .enumerate()
            .map(|(p, page)| {
                page.into_iter()
                    .enumerate()
                    .map(|(i, tile)| {
                        let name = format!("page{p}-tile{i}");
                        let texture =
                            ctx.load_texture(name, tile.image, egui::TextureOptions::NEAREST);
                        (tile.label, texture)
                    })
                    .collect()
            })
            .collect();
    }
}

impl eframe::App for PagedViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.upload(ctx);

        let key_pressed = ctx.input(|i| {
            i.events.iter().any(|e| {
                matches!(
                    e,
                    egui::Event::Key {
                        pressed: true,
                        repeat: false,
                        ..
                    }
                )
            })
        });
        if key_pressed {
            self.page += 1;
        }
        if self.page >= self.textures.len() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let total = self.textures.len();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(format!("page {} of {total}, press any key", self.page + 1));
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (label, texture) in &self.textures[self.page] {
                        ui.vertical(|ui| {
                            ui.label(label.as_str());
                            ui.image((texture.id(), texture.size_vec2()));
                        });
                    }
                });
            });
        });
    }
}
