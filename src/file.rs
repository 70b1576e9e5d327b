// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::gallery;

/// Write the gallery document according to ExportOptions.
/// Returns the final path written to.
pub fn write_gallery(
    export: &ExportOptions,
    blog: &str,
    fragments: &[String],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = gallery::render_document(blog, fragments);
    write_text(&path, &contents)?;
    logf!("Export: wrote {} ({} fragments)", path.display(), fragments.len());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}
