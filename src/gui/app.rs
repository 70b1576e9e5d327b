// src/gui/app.rs
use std::{
    error::Error,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::{
    collect::CancelToken,
    config::state::AppState,
    specs::photos::{MEDIA_HOST, PhotoRecord, THUMB_SUFFIX},
};

use super::actions;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Tumblr Grab",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // collection run (worker writes, UI reads)
    pub status: Arc<Mutex<String>>,
    pub records: Arc<Mutex<Vec<PhotoRecord>>>,
    pub running: Arc<AtomicBool>,
    pub cancel: CancelToken,

    /// Blog the current records came from; export uses this, not the field.
    pub fetched_blog: String,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();
        logf!("Init: gui up, out={}", out_path_text);
        Self {
            state,
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(s!("Idle"))),
            records: Arc::new(Mutex::new(Vec::new())),
            running: Arc::new(AtomicBool::new(false)),
            cancel: CancelToken::new(),
            fetched_blog: s!(),
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        // read once, before the text field mutably borrows state
        let running = self.is_running();

        ui.horizontal(|ui| {
            ui.label("Blog:");
            let field = egui::TextEdit::singleline(&mut self.state.gui.blog_text)
                .hint_text("example.tumblr.com")
                .desired_width(260.0);
            ui.add_enabled(!running, field);

            if ui
                .add_enabled(!running, egui::Button::new("Fetch all images"))
                .clicked()
            {
                actions::fetch(self);
            }
            if ui
                .add_enabled(running, egui::Button::new("Cancel"))
                .clicked()
            {
                actions::cancel(self);
            }
        });

        ui.label(self.status.lock().unwrap().clone());
    }

    fn draw_export_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Out:");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.out_path_text).desired_width(260.0),
            );
            if resp.changed() {
                self.out_path_dirty = true;
            }
            if ui.button("Export").clicked() {
                actions::export(self);
            }
            if ui.button("Copy").clicked() {
                actions::copy(self, ctx);
            }
        });
    }

    fn draw_table(&mut self, ui: &mut egui::Ui) {
        let records = self.records.lock().unwrap().clone();
        if records.is_empty() {
            ui.weak("No images yet");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Post");
                });
                header.col(|ui| {
                    ui.strong("Image");
                });
            })
            .body(|body| {
                body.rows(18.0, records.len(), |mut row| {
                    let rec = &records[row.index()];
                    row.col(|ui| {
                        ui.monospace(rec.post_id.to_string());
                    });
                    row.col(|ui| {
                        let url = join!(MEDIA_HOST, &rec.media_id.to_string(), THUMB_SUFFIX);
                        ui.hyperlink(url);
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.draw_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_export_bar(ui, ctx);
            ui.separator();
            self.draw_table(ui);
        });

        // worker updates status/records between frames
        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}
