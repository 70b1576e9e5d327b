// src/specs/mod.rs
//! # Page specs
//!
//! Each spec encodes *where the ground truth lives in one remote page* and
//! *how to extract it*: the fixed markers, the record delimiter, the media
//! pattern. Specs only extract and render fragments; pagination, retries,
//! deduplication and progress live in `collect`, output in `gallery`/`file`.
//!
//! Conventions:
//! - Local scanning with `core::markup` helpers; no regex, no full XML parse.
//! - Markers are `pub const` so tests and docs can point at the exact contract.
//! - A fragment that fails a secondary pattern is skipped, never an error;
//!   the remote markup has always been messier than its docs.
pub mod photos;
