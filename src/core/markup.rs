// src/core/markup.rs
//
// Fixed-pattern scanning over semi-structured markup. These are not a parser:
// each helper matches one documented shape and nothing more, so the page specs
// stay honest about how brittle their contract with the remote markup is.

/// Slice of the first `<name …>` open tag, inclusive of both angle brackets.
pub fn open_tag<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let pat = join!("<", name);
    let start = s.find(&pat)?;
    // reject partial matches like `<posts` vs `<poststuff`
    let after = s[start + pat.len()..].chars().next()?;
    if !(after.is_whitespace() || after == '>') {
        return open_tag(&s[start + pat.len()..], name);
    }
    let end = s[start..].find('>')? + start + 1;
    Some(&s[start..end])
}

/// Value of `attr="…"` within a tag slice, digits only.
/// The name must sit at a whitespace boundary so `subtotal="…"` never
/// satisfies a lookup for `total="…"`.
pub fn attr_uint(tag: &str, attr: &str) -> Option<u64> {
    let pat = join!(attr, "=\"");
    let mut from = 0;
    while let Some(i) = tag[from..].find(&pat) {
        let at = from + i;
        let after = at + pat.len();
        if at == 0 || tag.as_bytes()[at - 1].is_ascii_whitespace() {
            return leading_uint(&tag[after..]).map(|(v, _)| v);
        }
        from = after;
    }
    None
}

/// Decimal digits after the first occurrence of `marker`.
pub fn uint_after(s: &str, marker: &str) -> Option<u64> {
    let at = s.find(marker)? + marker.len();
    leading_uint(&s[at..]).map(|(v, _)| v)
}

/// Parse the run of ASCII digits at the start of `s`.
/// Returns the value and the byte length consumed; None if `s` has no digits
/// there or the run overflows u64.
pub fn leading_uint(s: &str) -> Option<(u64, usize)> {
    let len = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    s[..len].parse().ok().map(|v| (v, len))
}
