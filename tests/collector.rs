// tests/collector.rs
//
// Collector behavior against scripted fetchers: dedupe, termination,
// malformed first pages, retries, cancellation.

use std::cell::RefCell;
use std::error::Error;

use tumblr_grab::collect::{CancelToken, CollectError, Collector, Fetch, Step, StopReason};
use tumblr_grab::config::options::CollectOptions;
use tumblr_grab::progress::{NullProgress, Progress};

/* ---------------- scripted fetcher ---------------- */

struct Scripted {
    bodies: RefCell<Vec<String>>, // served front to back
    calls: RefCell<Vec<String>>,
    fail_first: RefCell<u32>, // initial calls that fail with a transport error
}

impl Scripted {
    fn new(bodies: Vec<String>) -> Self {
        Self {
            bodies: RefCell::new(bodies),
            calls: RefCell::new(Vec::new()),
            fail_first: RefCell::new(0),
        }
    }
    fn failing_first(bodies: Vec<String>, n: u32) -> Self {
        let s = Self::new(bodies);
        *s.fail_first.borrow_mut() = n;
        s
    }
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Fetch for Scripted {
    fn get(&self, path: &str) -> Result<String, Box<dyn Error>> {
        self.calls.borrow_mut().push(path.to_string());
        let mut fails = self.fail_first.borrow_mut();
        if *fails > 0 {
            *fails -= 1;
            return Err("connection reset".into());
        }
        let mut bodies = self.bodies.borrow_mut();
        if bodies.is_empty() {
            return Err("scripted fetcher ran dry".into());
        }
        Ok(bodies.remove(0))
    }
}

/* ---------------- page builders ---------------- */

fn page(total: u64, records: &[(u64, Option<u64>)]) -> String {
    let mut b = format!("<posts start=\"0\" total=\"{}\" type=\"photo\">", total);
    push_records(&mut b, records);
    b.push_str("</posts>");
    b
}

fn page_without_total(records: &[(u64, Option<u64>)]) -> String {
    let mut b = String::from("<posts start=\"0\" type=\"photo\">");
    push_records(&mut b, records);
    b.push_str("</posts>");
    b
}

fn push_records(b: &mut String, records: &[(u64, Option<u64>)]) {
    for (id, media) in records {
        b.push_str(&format!("<post id=\"{}\" url=\"http://demo.example/{}\">", id, id));
        if let Some(m) = media {
            b.push_str(&format!(
                "<photo-url max-width=\"75\">http://data.tumblr.com/{}_75.jpg</photo-url>",
                m
            ));
        }
        b.push_str("</post>");
    }
}

fn opts(page_size: u32, retries: u32) -> CollectOptions {
    CollectOptions {
        blog: "demo.tumblr.com".to_string(),
        page_size,
        retries,
    }
}

fn run_ids(collector: &Collector) -> Vec<u64> {
    collector.records().iter().map(|r| r.post_id).collect()
}

/* ---------------- tests ---------------- */

#[test]
fn collects_each_id_once_in_first_seen_order() {
    // page 2 re-delivers id 2 (overlapping windows happen on busy blogs)
    let fetch = Scripted::new(vec![
        page(4, &[(1, Some(11)), (2, Some(22))]),
        page(4, &[(2, Some(22)), (3, Some(33)), (4, Some(44))]),
    ]);
    let mut c = Collector::new(&fetch, &opts(2, 0), CancelToken::new());

    let reason = c.run(Some(&mut NullProgress)).unwrap();

    assert_eq!(reason, StopReason::Complete);
    assert_eq!(run_ids(&c), vec![1, 2, 3, 4]);
    let frags: Vec<&str> = c.fragments().collect();
    assert_eq!(frags.len(), 4);
    assert!(frags[0].contains("demo.tumblr.com/post/1'"));
    assert!(frags[0].contains("data.tumblr.com/11_100.jpg"));
}

#[test]
fn redelivered_page_stalls_instead_of_looping() {
    // declared total says 6, but the listing keeps serving the same two posts
    let fetch = Scripted::new(vec![
        page(6, &[(1, Some(11)), (2, Some(22))]),
        page(6, &[(1, Some(11)), (2, Some(22))]),
        page(6, &[(1, Some(11)), (2, Some(22))]),
    ]);
    let mut c = Collector::new(&fetch, &opts(2, 0), CancelToken::new());

    let reason = c.run(None).unwrap();

    assert_eq!(reason, StopReason::Stalled);
    assert_eq!(run_ids(&c), vec![1, 2]);
    assert_eq!(fetch.calls().len(), 2); // stopped right after the stalled page
}

#[test]
fn stall_is_reported_through_the_sink() {
    #[derive(Default)]
    struct Recorder {
        logs: Vec<String>,
        finished: bool,
    }
    impl Progress for Recorder {
        fn log(&mut self, msg: &str) {
            self.logs.push(msg.to_string());
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    let fetch = Scripted::new(vec![
        page(6, &[(1, Some(11)), (2, Some(22))]),
        page(6, &[(1, Some(11)), (2, Some(22))]),
    ]);
    let mut c = Collector::new(&fetch, &opts(2, 0), CancelToken::new());
    let mut sink = Recorder::default();

    assert_eq!(c.run(Some(&mut sink)).unwrap(), StopReason::Stalled);
    assert!(sink.logs.iter().any(|m| m.contains("stopped short")));
    assert!(sink.finished);
}

#[test]
fn fetches_offsets_until_declared_total() {
    let mut pages = Vec::new();
    for n in 0u64..3 {
        let records: Vec<(u64, Option<u64>)> =
            (n * 50..n * 50 + 50).map(|i| (i + 1, Some(i + 1000))).collect();
        pages.push(page(120, &records));
    }
    let fetch = Scripted::new(pages);
    let mut c = Collector::new(&fetch, &opts(50, 0), CancelToken::new());

    let reason = c.run(None).unwrap();

    assert_eq!(reason, StopReason::Complete);
    assert_eq!(
        fetch.calls(),
        vec![
            "/api/read?type=photo&num=50&start=0",
            "/api/read?type=photo&num=50&start=50",
            "/api/read?type=photo&num=50&start=100",
        ]
    );
}

#[test]
fn missing_total_marker_fails_with_zero_output() {
    let fetch = Scripted::new(vec![page_without_total(&[(1, Some(11))])]);
    let mut c = Collector::new(&fetch, &opts(50, 0), CancelToken::new());

    let err = c.run(None).unwrap_err();

    assert!(matches!(err, CollectError::MalformedResponse));
    assert_eq!(c.records().len(), 0);
}

#[test]
fn media_less_page_yields_nothing_but_no_error() {
    // text posts leaking into the photo listing: ids extract, media doesn't
    let fetch = Scripted::new(vec![page(100, &[(1, None), (2, None), (3, None)])]);
    let mut c = Collector::new(&fetch, &opts(50, 0), CancelToken::new());

    let reason = c.run(None).unwrap();

    assert_eq!(reason, StopReason::Stalled);
    assert_eq!(c.records().len(), 0);
}

#[test]
fn empty_archive_completes_immediately() {
    let fetch = Scripted::new(vec![page(0, &[])]);
    let mut c = Collector::new(&fetch, &opts(50, 0), CancelToken::new());

    assert_eq!(c.run(None).unwrap(), StopReason::Complete);
    assert_eq!(c.records().len(), 0);
    assert_eq!(fetch.calls().len(), 1);
}

#[test]
fn cancelled_token_stops_before_any_request() {
    let fetch = Scripted::new(vec![page(4, &[(1, Some(11))])]);
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut c = Collector::new(&fetch, &opts(50, 0), cancel);

    assert_eq!(c.run(None).unwrap(), StopReason::Cancelled);
    assert_eq!(fetch.calls().len(), 0);
}

#[test]
fn retry_budget_recovers_a_flaky_page() {
    let fetch = Scripted::failing_first(vec![page(2, &[(1, Some(11)), (2, Some(22))])], 1);
    let mut c = Collector::new(&fetch, &opts(50, 1), CancelToken::new());

    assert_eq!(c.run(None).unwrap(), StopReason::Complete);
    assert_eq!(run_ids(&c), vec![1, 2]);
    assert_eq!(fetch.calls().len(), 2); // failed attempt + retry
}

#[test]
fn no_retries_propagates_network_failure() {
    let fetch = Scripted::failing_first(vec![page(2, &[(1, Some(11))])], 1);
    let mut c = Collector::new(&fetch, &opts(50, 0), CancelToken::new());

    let err = c.run(None).unwrap_err();
    assert!(matches!(err, CollectError::Network(_)));
    assert_eq!(c.records().len(), 0);
}

#[test]
fn step_drives_one_page_at_a_time() {
    let fetch = Scripted::new(vec![
        page(4, &[(1, Some(11)), (2, Some(22))]),
        page(4, &[(3, Some(33)), (4, Some(44))]),
    ]);
    let mut c = Collector::new(&fetch, &opts(2, 0), CancelToken::new());

    match c.step().unwrap() {
        Step::Page { new_records } => assert_eq!(new_records, 2),
        Step::Done(r) => panic!("done too early: {r:?}"),
    }
    assert_eq!(c.fetched(), 2);
    assert_eq!(c.total(), Some(4));

    // final page folds its records in and reports completion in one step
    assert!(matches!(c.step().unwrap(), Step::Done(StopReason::Complete)));
    assert_eq!(run_ids(&c), vec![1, 2, 3, 4]);

    // further steps are inert
    assert!(matches!(c.step().unwrap(), Step::Done(StopReason::Complete)));
    assert_eq!(fetch.calls().len(), 2);
}
