// src/update.rs
//
// Update check for the companion userscript: fetch its `.meta.js`, read the
// `@name` / `@version` header lines, compare against what we ship.

use std::error::Error;

use crate::collect::Fetch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    /// Remote version that is strictly newer than ours.
    Available(String),
    /// Body didn't look like our script's meta block (dead link page,
    /// renamed script, missing version header).
    Unrecognized,
}

/// `true` iff `remote` is strictly newer than `local`.
///
/// Versions are dot-separated components compared left to right; the first
/// differing pair decides and a missing trailing component counts as "0".
/// Components compare lexicographically, so "1.2.4" is newer than "1.2.10";
/// that is the ordering the updater has always used.
pub fn is_newer(remote: &str, local: &str) -> bool {
    let r_parts: Vec<&str> = remote.split('.').map(str::trim).collect();
    let l_parts: Vec<&str> = local.split('.').map(str::trim).collect();
    for i in 0..r_parts.len().max(l_parts.len()) {
        let r = r_parts.get(i).copied().unwrap_or("0");
        let l = l_parts.get(i).copied().unwrap_or("0");
        if r != l {
            return r > l;
        }
    }
    false
}

/// Value of a `// @key value` header line in a userscript meta block.
pub fn header_value<'a>(meta: &'a str, key: &str) -> Option<&'a str> {
    for line in meta.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("//") else { continue };
        let rest = rest.trim_start();
        let Some(rest) = rest.strip_prefix('@') else { continue };
        let Some(rest) = rest.strip_prefix(key) else { continue };
        // require whitespace after the key so @name doesn't match @namespace
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let value = rest.trim();
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}

/// Classify a fetched meta body against our script name and version.
pub fn classify(meta: &str, name: &str, local_version: &str) -> UpdateStatus {
    let remote_name = header_value(meta, "name");
    let remote_version = header_value(meta, "version");
    match (remote_name, remote_version) {
        (Some(n), Some(v)) if n == name => {
            if is_newer(v, local_version) {
                UpdateStatus::Available(s!(v))
            } else {
                UpdateStatus::UpToDate
            }
        }
        _ => UpdateStatus::Unrecognized,
    }
}

/// Fetch the meta file and classify it. Transport failures propagate.
pub fn check(
    fetch: &dyn Fetch,
    meta_path: &str,
    name: &str,
    local_version: &str,
) -> Result<UpdateStatus, Box<dyn Error>> {
    let body = fetch.get(meta_path)?;
    let status = classify(&body, name, local_version);
    logf!("Update: {name} {local_version} → {status:?}");
    Ok(status)
}
