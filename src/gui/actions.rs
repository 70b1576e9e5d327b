// src/gui/actions.rs
//
// Button "executive" actions. Layout stays in app.rs, operational logic here.

use std::{sync::atomic::Ordering, thread};

use eframe::egui;

use crate::collect::{CancelToken, Collector, HttpFetch};
use crate::file;
use crate::gallery;
use crate::gui::app::App;
use crate::gui::progress::GuiProgress;

pub fn fetch(app: &mut App) {
    app.state.options.collect.set_blog(&app.state.gui.blog_text.clone());
    let blog = app.state.options.collect.blog.clone();
    if blog.is_empty() {
        app.status("Enter a blog host first");
        return;
    }

    app.records.lock().unwrap().clear();
    app.fetched_blog = blog.clone();
    app.cancel = CancelToken::new();
    app.running.store(true, Ordering::Relaxed);
    app.status(format!("Loading {}…", blog));
    logf!("Fetch: begin blog={}", blog);

    let opts = app.state.options.collect.clone();
    let status = app.status.clone();
    let records = app.records.clone();
    let running = app.running.clone();
    let cancel = app.cancel.clone();

    thread::spawn(move || {
        let fetch = HttpFetch { host: opts.blog.clone() };
        let mut collector = Collector::new(&fetch, &opts, cancel);
        let mut progress = GuiProgress::new(status.clone(), records);

        match collector.run(Some(&mut progress)) {
            Ok(reason) => logf!("Fetch: done blog={} reason={:?}", opts.blog, reason),
            Err(e) => {
                loge!("Fetch: blog={} failed: {}", opts.blog, e);
                *status.lock().unwrap() = format!("Failed: {}", e);
            }
        }
        running.store(false, Ordering::Relaxed);
    });
}

pub fn cancel(app: &mut App) {
    app.cancel.cancel();
    app.status("Cancelling…");
    logf!("Fetch: cancel requested");
}

pub fn export(app: &mut App) {
    let Some(fragments) = current_fragments(app) else {
        app.status("Nothing to export");
        logd!("Export: clicked with no records");
        return;
    };

    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        app.out_path_dirty = false;
    }

    match file::write_gallery(&app.state.options.export, &app.fetched_blog, &fragments) {
        Ok(path) => {
            app.out_path_text = path.to_string_lossy().into();
            app.status(format!("Wrote {}", path.display()));
        }
        Err(e) => {
            loge!("Export: failed: {}", e);
            app.status(format!("Export failed: {}", e));
        }
    }
}

pub fn copy(app: &mut App, ctx: &egui::Context) {
    let Some(fragments) = current_fragments(app) else {
        app.status("Nothing to copy");
        logd!("Copy: clicked with no records");
        return;
    };

    let txt = gallery::render_document(&app.fetched_blog, &fragments);
    ctx.copy_text(txt);
    app.status("Copied gallery to clipboard");
}

fn current_fragments(app: &App) -> Option<Vec<String>> {
    let records = app.records.lock().unwrap();
    if records.is_empty() {
        return None;
    }
    Some(records.iter().map(|r| r.fragment.clone()).collect())
}
