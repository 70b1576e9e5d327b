// src/specs/photos.rs
//
// Spec for the legacy photo-listing API:
//
//   GET http://{blog}/api/read?type=photo&num={n}&start={o}
//
// The response is XML-ish markup. We rely on exactly three shapes:
//
//   <posts start="0" total="1234" type="photo">      → declared total (page 1)
//   <post id="123456789" …>                          → record delimiter + id
//   <photo-url max-width="75">http://data.tumblr.com/{media}_75.jpg
//                                                    → media id
//
// Anything else in the body is ignored.

use crate::core::markup;

/// Record delimiter. The text before the first occurrence is preamble.
pub const POST_DELIM: &str = "post id=\"";

/// Open tag carrying the declared total.
pub const POSTS_TAG: &str = "posts";

/// Listing must be the photo listing, not some other post type.
pub const PHOTO_TYPE_ATTR: &str = "type=\"photo\"";

/// Secondary (media) pattern: smallest thumbnail URL inside a record.
pub const MEDIA_MARKER: &str = "<photo-url max-width=\"75\">http://data.tumblr.com/";

/// Host serving the rendered thumbnails.
pub const MEDIA_HOST: &str = "http://data.tumblr.com/";

/// Thumbnail size used in rendered fragments.
pub const THUMB_SUFFIX: &str = "_100.jpg";

/// One photo post, extracted and rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoRecord {
    pub post_id: u64,
    pub media_id: u64,
    pub fragment: String,
}

/// Request path for one page of the listing.
pub fn page_path(page_size: u32, offset: u32) -> String {
    format!("/api/read?type=photo&num={}&start={}", page_size, offset)
}

/// Declared total from the `<posts …>` open tag, photo listings only.
/// Only meaningful on the first page; later pages report a shifted window.
pub fn declared_total(body: &str) -> Option<u64> {
    let tag = markup::open_tag(body, POSTS_TAG)?;
    if !tag.contains(PHOTO_TYPE_ATTR) {
        return None;
    }
    markup::attr_uint(tag, "total")
}

/// Raw per-record pieces. The split consumes the delimiter, so each piece
/// starts with the record id digits.
pub fn posts(body: &str) -> impl Iterator<Item = &str> {
    body.split(POST_DELIM).skip(1)
}

/// Extract `(post_id, media_id)` from one raw piece.
/// `None` if the piece doesn't open with `{digits}"`; media id is `None` when
/// the piece has no usable thumbnail (text posts leak into photo listings).
pub fn extract_record(piece: &str) -> Option<(u64, Option<u64>)> {
    let (post_id, len) = markup::leading_uint(piece)?;
    if !piece[len..].starts_with('"') {
        return None;
    }
    let media_id = markup::uint_after(piece, MEDIA_MARKER);
    Some((post_id, media_id))
}

/// Presentation fragment: thumbnail linking to the post.
pub fn render_fragment(blog: &str, post_id: u64, media_id: u64) -> String {
    let post = post_id.to_string();
    let media = media_id.to_string();
    join!(
        "<a href='http://", blog, "/post/", &post, "' target='_blank'>",
        "<img src='", MEDIA_HOST, &media, THUMB_SUFFIX,
        "' style='position:static; width:auto; height:auto;'></a>"
    )
}

/// Extract + render in one go; `None` for pieces that don't become output.
pub fn record(blog: &str, piece: &str) -> Option<PhotoRecord> {
    let (post_id, media_id) = extract_record(piece)?;
    let media_id = media_id?;
    Some(PhotoRecord {
        post_id,
        media_id,
        fragment: render_fragment(blog, post_id, media_id),
    })
}
