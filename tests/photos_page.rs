// tests/photos_page.rs
//
// The fixed-pattern contract with the listing markup.

use tumblr_grab::specs::photos::{
    declared_total, extract_record, page_path, posts, record, render_fragment,
};

#[test]
fn page_path_carries_num_and_start() {
    assert_eq!(page_path(50, 0), "/api/read?type=photo&num=50&start=0");
    assert_eq!(page_path(25, 75), "/api/read?type=photo&num=25&start=75");
}

#[test]
fn declared_total_reads_the_posts_open_tag() {
    let body = r#"<tumblr version="1.0"><posts start="0" total="236" type="photo"><post id="1"></post></posts>"#;
    assert_eq!(declared_total(body), Some(236));
}

#[test]
fn declared_total_ignores_lookalike_attributes() {
    // a decoy attribute whose name merely ends in "total"
    let decoy_only = r#"<posts start="0" subtotal="777" type="photo"></posts>"#;
    assert_eq!(declared_total(decoy_only), None);

    let decoy_and_real = r#"<posts subtotal="777" total="236" type="photo"></posts>"#;
    assert_eq!(declared_total(decoy_and_real), Some(236));
}

#[test]
fn declared_total_requires_a_photo_listing() {
    let regular = r#"<posts start="0" total="99" type="regular"></posts>"#;
    assert_eq!(declared_total(regular), None);

    let no_total = r#"<posts start="0" type="photo"></posts>"#;
    assert_eq!(declared_total(no_total), None);
}

#[test]
fn posts_split_skips_the_preamble() {
    let body = r#"<posts start="0" total="2" type="photo"><post id="10"></post><post id="20"></post></posts>"#;
    let pieces: Vec<&str> = posts(body).collect();
    assert_eq!(pieces.len(), 2);
    assert!(pieces[0].starts_with("10\""));
    assert!(pieces[1].starts_with("20\""));
}

#[test]
fn extract_record_wants_leading_id_digits() {
    let with_media = "123\" url=\"u\">\
        <photo-url max-width=\"75\">http://data.tumblr.com/456_75.jpg</photo-url></post>";
    assert_eq!(extract_record(with_media), Some((123, Some(456))));

    let without_media = "123\" url=\"u\"><regular-body>text</regular-body></post>";
    assert_eq!(extract_record(without_media), Some((123, None)));

    // garbage piece: no id digits terminated by a quote
    assert_eq!(extract_record("x123\">"), None);
    assert_eq!(extract_record("123 url"), None);
}

#[test]
fn record_renders_only_with_media() {
    let with_media = "123\">\
        <photo-url max-width=\"75\">http://data.tumblr.com/456_75.jpg</photo-url></post>";
    let rec = record("demo.tumblr.com", with_media).unwrap();
    assert_eq!(rec.post_id, 123);
    assert_eq!(rec.media_id, 456);
    assert_eq!(rec.fragment, render_fragment("demo.tumblr.com", 123, 456));

    let without_media = "123\"><regular-body>text</regular-body></post>";
    assert!(record("demo.tumblr.com", without_media).is_none());
}

#[test]
fn fragment_links_post_and_thumbnail() {
    let frag = render_fragment("demo.tumblr.com", 123, 456);
    assert_eq!(
        frag,
        "<a href='http://demo.tumblr.com/post/123' target='_blank'>\
         <img src='http://data.tumblr.com/456_100.jpg' \
         style='position:static; width:auto; height:auto;'></a>"
    );
}
