// src/collect.rs
//
// The paginated collector. One run owns one `CollectorState`; pages are
// fetched one at a time (`start` advances by `num` per page, exactly like the
// listing API expects) and processed synchronously before the next request.
//
// Termination: declared total reached, a page with zero new records (stall
// safeguard against inconsistent totals), or cancellation.

use std::{
    collections::HashSet,
    error::Error,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use crate::config::consts::RETRY_PAUSE_MS;
use crate::config::options::CollectOptions;
use crate::progress::Progress;
use crate::specs::photos::{self, PhotoRecord};

/// Fetch capability. Production code uses [`HttpFetch`]; tests script this.
pub trait Fetch {
    /// GET `path` on whatever host this fetcher is bound to; returns the body.
    fn get(&self, path: &str) -> Result<String, Box<dyn Error>>;
}

/// Std-only HTTP fetcher bound to one host.
pub struct HttpFetch {
    pub host: String,
}

impl Fetch for HttpFetch {
    fn get(&self, path: &str) -> Result<String, Box<dyn Error>> {
        crate::core::net::http_get(&self.host, path)
    }
}

/// Shared cancellation flag, checked before each page request.
/// Clones observe the same flag.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Failure taxonomy for one run. Pieces that merely fail the media pattern
/// are skipped in the page loop and never surface here.
#[derive(Debug)]
pub enum CollectError {
    /// Transport failure after the retry budget was spent.
    Network(String),
    /// First page lacked the total marker; completion can't be determined.
    MalformedResponse,
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Network(msg) => write!(f, "network failure: {msg}"),
            CollectError::MalformedResponse => {
                write!(f, "malformed response: first page has no total marker")
            }
        }
    }
}

impl Error for CollectError {}

/// Why a run stopped. Only `Complete` matches the original script; the other
/// two are deliberate additions (see DESIGN.md).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Fetched offset reached the declared total.
    Complete,
    /// A page produced zero new records; bail instead of polling forever.
    Stalled,
    /// Cancel token was set before the next page request.
    Cancelled,
}

/// Outcome of one collector step.
pub enum Step {
    /// One page fetched and folded in; `new_records` were rendered.
    Page { new_records: usize },
    Done(StopReason),
}

/// Everything one run accumulates. Fresh per run, owned by the collector.
#[derive(Default)]
pub struct CollectorState {
    seen: HashSet<u64>,
    fetched: u64,
    total: Option<u64>,
    records: Vec<PhotoRecord>,
}

pub struct Collector<'a> {
    fetch: &'a dyn Fetch,
    blog: String,
    page_size: u32,
    retries: u32,
    cancel: CancelToken,
    state: CollectorState,
    stopped: Option<StopReason>,
}

impl<'a> Collector<'a> {
    pub fn new(fetch: &'a dyn Fetch, opts: &CollectOptions, cancel: CancelToken) -> Self {
        Self {
            fetch,
            blog: opts.blog.clone(),
            page_size: opts.page_size.max(1),
            retries: opts.retries,
            cancel,
            state: CollectorState::default(),
            stopped: None,
        }
    }

    pub fn fetched(&self) -> u64 {
        self.state.fetched
    }

    /// Declared total; `None` until the first page arrived.
    pub fn total(&self) -> Option<u64> {
        self.state.total
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.state.records
    }

    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.state.records
    }

    /// Rendered fragments in discovery order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.state.records.iter().map(|r| r.fragment.as_str())
    }

    /// Fetch and fold in one page. Lazy driver for frontends that want to
    /// render between pages; `run` loops this to the end.
    pub fn step(&mut self) -> Result<Step, CollectError> {
        if let Some(reason) = self.stopped {
            return Ok(Step::Done(reason));
        }
        if self.cancel.is_cancelled() {
            return Ok(self.stop(StopReason::Cancelled));
        }

        let path = photos::page_path(self.page_size, self.state.fetched as u32);
        let body = self.get_with_retry(&path)?;

        if self.state.total.is_none() {
            // First page only; the total is never re-parsed or revised.
            match photos::declared_total(&body) {
                Some(t) => self.state.total = Some(t),
                None => {
                    loge!("Collect: no total marker in first page ({path})");
                    return Err(CollectError::MalformedResponse);
                }
            }
        }
        let total = self.state.total.unwrap_or(0);

        let mut new_records = 0usize;
        for piece in photos::posts(&body) {
            let Some(rec) = photos::record(&self.blog, piece) else {
                continue; // partial record: no id, or no usable media
            };
            if self.state.seen.insert(rec.post_id) {
                self.state.records.push(rec);
                new_records += 1;
            }
        }

        self.state.fetched += self.page_size as u64;

        if self.state.fetched >= total {
            return Ok(self.stop(StopReason::Complete));
        }
        if new_records == 0 {
            logf!("Collect: page at {path} yielded nothing new, stopping");
            return Ok(self.stop(StopReason::Stalled));
        }
        Ok(Step::Page { new_records })
    }

    /// Drive the run to its end, reporting through `progress`.
    pub fn run(
        &mut self,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<StopReason, CollectError> {
        loop {
            let before = self.state.records.len();
            let had_total = self.state.total.is_some();

            let step = self.step()?;

            if let Some(p) = progress.as_deref_mut() {
                if !had_total {
                    if let Some(t) = self.state.total {
                        p.begin(t);
                    }
                }
                for rec in &self.state.records[before..] {
                    p.record(rec);
                }
                p.page_done(self.state.fetched, self.state.total.unwrap_or(0));
            }

            if let Step::Done(reason) = step {
                if let Some(p) = progress.as_deref_mut() {
                    if reason == StopReason::Stalled {
                        p.log("Listing stopped short of its declared total");
                    }
                    p.finish();
                }
                return Ok(reason);
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> Step {
        self.stopped = Some(reason);
        Step::Done(reason)
    }

    fn get_with_retry(&self, path: &str) -> Result<String, CollectError> {
        let mut attempt = 0u32;
        loop {
            match self.fetch.get(path) {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    loge!("Collect: {path} failed ({e}), retry {attempt}/{}", self.retries);
                    thread::sleep(Duration::from_millis(RETRY_PAUSE_MS));
                }
                Err(e) => return Err(CollectError::Network(e.to_string())),
            }
        }
    }
}
