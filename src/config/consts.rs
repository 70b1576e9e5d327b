// src/config/consts.rs

// Collect
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_RETRIES: u32 = 0; // fail the run on the first bad page
pub const RETRY_PAUSE_MS: u64 = 500;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_GALLERY_STEM: &str = "gallery";

// Update check (companion userscript)
pub const SCRIPT_NAME: &str = "TumblrImgViewer";
pub const SCRIPT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const UPDATE_HOST: &str = "userscripts.org";
pub const UPDATE_META_PATH: &str = "/scripts/source/11016.meta.js";
