// src/cli.rs
use std::env;

use crate::collect::{CancelToken, Collector, HttpFetch};
use crate::config::consts::{SCRIPT_NAME, SCRIPT_VERSION, UPDATE_HOST, UPDATE_META_PATH};
use crate::config::options::AppOptions;
use crate::file;
use crate::progress::Progress;
use crate::specs::photos::PhotoRecord;
use crate::update::{self, UpdateStatus};

pub struct CliParams {
    pub options: AppOptions,
    pub check_update: bool,
}

pub enum Mode {
    Cli(CliParams),
    Gui,
}

// Decide CLI vs GUI
pub fn detect_mode() -> Result<Mode, Box<dyn std::error::Error>> {
    if env::args().len() == 1 {
        // only program name
        return Ok(Mode::Gui);
    }
    let params = parse_cli()?;
    Ok(Mode::Cli(params))
}

pub fn run(params: CliParams) -> Result<(), Box<dyn std::error::Error>> {
    if params.check_update {
        return check_update();
    }

    let blog = params.options.collect.blog.clone();
    if blog.is_empty() {
        return Err("Specify a blog with --blog <host> (or --check-update)".into());
    }

    let fetch = HttpFetch { host: blog.clone() };
    let mut collector = Collector::new(&fetch, &params.options.collect, CancelToken::new());
    let mut progress = CliProgress::default();

    // a stalled listing is reported through the sink's log hook
    collector.run(Some(&mut progress))?;

    let fragments: Vec<String> = collector.fragments().map(String::from).collect();
    let path = file::write_gallery(&params.options.export, &blog, &fragments)?;
    println!("Wrote {} ({} images)", path.display(), fragments.len());
    Ok(())
}

fn check_update() -> Result<(), Box<dyn std::error::Error>> {
    let fetch = HttpFetch { host: s!(UPDATE_HOST) };
    match update::check(&fetch, UPDATE_META_PATH, SCRIPT_NAME, SCRIPT_VERSION)? {
        UpdateStatus::Available(v) => {
            println!("A new version of {} is available: {} (local {})", SCRIPT_NAME, v, SCRIPT_VERSION)
        }
        UpdateStatus::UpToDate => println!("{} {} is up to date", SCRIPT_NAME, SCRIPT_VERSION),
        UpdateStatus::Unrecognized => println!("Update source not recognized; skipping"),
    }
    Ok(())
}

fn parse_cli() -> Result<CliParams, Box<dyn std::error::Error>> {
    let mut params = CliParams {
        options: AppOptions::default(),
        check_update: false,
    };

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-b" | "--blog" => {
                let v = args.next().ok_or("Missing value for --blog")?;
                params.options.collect.set_blog(&v);
            }
            "--page-size" => {
                let v: u32 = args.next().ok_or("Missing value for --page-size")?.parse()?;
                if v == 0 || v > 50 {
                    return Err("Page size out of range (1..=50)".into());
                }
                params.options.collect.page_size = v;
            }
            "--retries" => {
                let v: u32 = args.next().ok_or("Missing value for --retries")?.parse()?;
                params.options.collect.retries = v;
            }
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                params.options.export.set_path(&v);
            }
            "--check-update" => params.check_update = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}

/* ---------------- CLI progress sink ---------------- */

#[derive(Default)]
pub struct CliProgress {
    images: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: u64) {
        eprintln!("Listing reports {} photo posts", total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn record(&mut self, _rec: &PhotoRecord) {
        self.images += 1;
    }
    fn page_done(&mut self, fetched: u64, total: u64) {
        eprintln!("Fetched {}/{} ({} images)", fetched.min(total), total, self.images);
    }
    fn finish(&mut self) {
        eprintln!("Done: {} images", self.images);
    }
}
