// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub collect: CollectOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    /// Blog host, e.g. `example.tumblr.com`.
    pub blog: String,
    /// `num` parameter of the listing API.
    pub page_size: u32,
    /// Extra attempts per page on transport failure.
    pub retries: u32,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            blog: s!(),
            page_size: DEFAULT_PAGE_SIZE,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl CollectOptions {
    /// Accept `example.tumblr.com`, `http://example.tumblr.com/`, etc.
    pub fn set_blog(&mut self, text: &str) {
        let v = text.trim();
        let v = v.strip_prefix("http://").unwrap_or(v);
        let v = v.strip_prefix("https://").unwrap_or(v);
        self.blog = v.trim_end_matches('/').to_string();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_path: OutputPath::default() }
    }
}

impl ExportOptions {
    /// Full path of the gallery file, extension always `.html`.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(stem, ".html"));
        path
    }

    /// Parse GUI/CLI text into dir + stem. A pasted extension is ignored;
    /// the format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_GALLERY_STEM),
        }
    }
}
