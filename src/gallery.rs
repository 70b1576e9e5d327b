// src/gallery.rs
//
// Turn accumulated fragments into one standalone HTML document.

/// Wrap the fragments in a minimal page. Fragments are already fully rendered
/// anchors (see `specs::photos::render_fragment`); this only adds the shell.
pub fn render_document(blog: &str, fragments: &[String]) -> String {
    let mut doc = String::with_capacity(256 + fragments.iter().map(String::len).sum::<usize>());
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    doc.push_str(blog);
    doc.push_str(" — photo archive</title>\n</head>\n<body>\n<h1>");
    doc.push_str(blog);
    doc.push_str("</h1>\n<div id=\"result\">\n");
    for frag in fragments {
        doc.push_str(frag);
        doc.push('\n');
    }
    doc.push_str("</div>\n</body>\n</html>\n");
    doc
}
