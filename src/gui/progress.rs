// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;
use crate::specs::photos::PhotoRecord;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    records: Arc<Mutex<Vec<PhotoRecord>>>,
    images: usize,
    total: u64,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, records: Arc<Mutex<Vec<PhotoRecord>>>) -> Self {
        Self { status, records, images: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        let text = msg.into();
        *self.status.lock().unwrap() = text;
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: u64) {
        self.total = total;
        self.set_status(format!("Loading… 0/{}", total));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn record(&mut self, rec: &PhotoRecord) {
        self.images += 1;
        self.records.lock().unwrap().push(rec.clone());
    }
    fn page_done(&mut self, fetched: u64, total: u64) {
        self.set_status(format!(
            "Loading… {}/{} ({} images)",
            fetched.min(total),
            total,
            self.images
        ));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Finished")); // no counts if we never began
        } else {
            self.set_status(format!("Finished ({} images)", self.images));
        }
    }
}
