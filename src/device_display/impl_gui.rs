use crate::config::Config;
use crate::device_display::interface::{DeviceDisplay, Screen};
use crate::image_source::interface::{CapturedImage, SourceMode};
use crate::user_input::interface::{UserAction, UserInput};
use eframe::egui;
use image::DynamicImage;
use reqwest::blocking::Client;
use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const IMAGE_MAX_HEIGHT: f32 = 240.0;

type ThumbnailResult = (String, Result<egui::ColorImage, String>);

struct FlowerWindow {
    screen: Arc<Mutex<Screen>>,
    actions: Sender<UserAction>,
    client: Client,
    photo: Option<(CapturedImage, egui::TextureHandle)>,
    /// Url of the wanted thumbnail and its texture once downloaded.
    thumbnail: Option<(String, Option<egui::TextureHandle>)>,
    thumbnails_tx: Sender<ThumbnailResult>,
    thumbnails_rx: Receiver<ThumbnailResult>,
}

impl FlowerWindow {
    fn send(&self, action: UserAction) {
        let _ = self.actions.send(action);
    }

    fn photo_texture(&mut self, ctx: &egui::Context, photo: &CapturedImage) -> egui::TextureHandle {
        match &self.photo {
            Some((shown, texture)) if shown.same(photo) => texture.clone(),
            _ => {
                let texture = ctx.load_texture(
                    "photo",
                    color_image(photo.image()),
                    egui::TextureOptions::LINEAR,
                );
                self.photo = Some((photo.clone(), texture.clone()));
                texture
            }
        }
    }

    fn thumbnail_texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        while let Ok((loaded_url, result)) = self.thumbnails_rx.try_recv() {
            if let Some((wanted, texture)) = &mut self.thumbnail {
                if *wanted != loaded_url {
                    continue;
                }
                *texture = match result {
                    Ok(image) => {
                        Some(ctx.load_texture("thumbnail", image, egui::TextureOptions::LINEAR))
                    }
                    Err(_) => None,
                };
            }
        }

        if url.is_empty() {
            self.thumbnail = None;
            return None;
        }

        if self.thumbnail.as_ref().map(|(wanted, _)| wanted.as_str()) != Some(url) {
            self.thumbnail = Some((url.to_string(), None));

            let client = self.client.clone();
            let tx = self.thumbnails_tx.clone();
            let url = url.to_string();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                let result = download_image(&client, &url).map_err(|e| e.to_string());
                let _ = tx.send((url, result));
                ctx.request_repaint();
            });
        }

        self.thumbnail
            .as_ref()
            .and_then(|(_, texture)| texture.clone())
    }
}

impl eframe::App for FlowerWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = match self.screen.lock() {
            Ok(screen) => screen.clone(),
            Err(_) => return,
        };

        let thumbnail = self.thumbnail_texture(ctx, &screen.thumbnail_url);
        let photo = screen
            .photo
            .as_ref()
            .map(|photo| self.photo_texture(ctx, photo));

        egui::TopBottomPanel::top("photo_source").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Camera").clicked() {
                    self.send(UserAction::PickSource(SourceMode::Camera));
                }
                if ui.button("Photo Library").clicked() {
                    self.send(UserAction::PickSource(SourceMode::Library));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // The thumbnail replaces the picked photo once it arrives.
            if let Some(texture) = thumbnail.as_ref().or(photo.as_ref()) {
                ui.add(
                    egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                        .max_height(IMAGE_MAX_HEIGHT),
                );
            }

            ui.heading(if screen.title.is_empty() {
                "Flower Lens"
            } else {
                screen.title.as_str()
            });

            if !screen.status.is_empty() {
                ui.label(egui::RichText::new(&screen.status).italics());
            }

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(&screen.description);
            });
        });

        // The pipeline updates the screen from another thread.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn color_image(image: &DynamicImage) -> egui::ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

fn download_image(
    client: &Client,
    url: &str,
) -> Result<egui::ColorImage, Box<dyn Error + Send + Sync>> {
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
    let image = image::load_from_memory(&bytes)?;
    Ok(color_image(&image))
}

/// Window with the two photo-source buttons. Acts as both display and input.
#[derive(Clone)]
pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
    client: Client,
    actions_tx: Sender<UserAction>,
    actions_rx: Arc<Mutex<Option<Receiver<UserAction>>>>,
}

impl DeviceDisplayGui {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.info_user_agent.clone())
            .timeout(config.info_request_timeout)
            .build()?;

        let (actions_tx, actions_rx) = mpsc::channel();
        Ok(Self {
            screen: Arc::new(Mutex::new(Screen::default())),
            client,
            actions_tx,
            actions_rx: Arc::new(Mutex::new(Some(actions_rx))),
        })
    }

    /// Runs the window on the calling thread, which must be the main thread, until it is closed.
    pub fn run_window(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 680.0])
                .with_title("Flower Lens"),
            ..Default::default()
        };

        let (thumbnails_tx, thumbnails_rx) = mpsc::channel();
        let window = FlowerWindow {
            screen: self.screen.clone(),
            actions: self.actions_tx.clone(),
            client: self.client.clone(),
            photo: None,
            thumbnail: None,
            thumbnails_tx,
            thumbnails_rx,
        };

        let result = eframe::run_native("Flower Lens", options, Box::new(|_cc| Box::new(window)));
        let _ = self.actions_tx.send(UserAction::Quit);

        result.map_err(|e| e.to_string().into())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut current = self
            .screen
            .lock()
            .map_err(|_| "Display state poisoned")?;
        *current = screen.clone();
        Ok(())
    }
}

impl UserInput for DeviceDisplayGui {
    fn events(&self) -> Receiver<UserAction> {
        match self.actions_rx.lock().ok().and_then(|mut rx| rx.take()) {
            Some(rx) => rx,
            // Already handed out; give back a closed stream.
            None => mpsc::channel().1,
        }
    }
}
