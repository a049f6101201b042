use super::*;

const POST_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Fallback title | Blog</title>
  <meta property="og:title" content="Acne scar treatment: what to expect">
  <style>.hidden { display: none; }</style>
</head>
<body>
  <!-- tracking pixel <img src="/pixel.gif"> -->
  <h1>Acne scar treatment</h1>
  <p>Acne scar care starts with a consultation.</p>
  <img src="/a.jpg"><img src="/b.jpg" alt="before">
  <IMG SRC="/c.jpg">
  <script>var acne = "acne acne acne";</script>
  <p>Most ACNE scar patients need three sessions &amp; some downtime.</p>
  <iframe src="https://www.youtube.com/embed/abc123"></iframe>
</body>
</html>"#;

#[test]
fn extracts_all_attributes_from_a_post() {
    let m = extract_content_metrics(POST_HTML, "https://blog.example.com/1", "acne scar");
    assert_eq!(m.url, "https://blog.example.com/1");
    assert_eq!(m.title, "Acne scar treatment: what to expect");
    assert_eq!(m.image_count, 3);
    assert!(m.has_video);
    assert_eq!(m.keyword_frequency, 3);
}

#[test]
fn word_count_ignores_scripts_styles_comments_and_head() {
    let html = "<html><head><title>t t t</title></head><body><!-- a b c --><p>one two</p><script>x y z</script><style>p{}</style><p>three</p></body></html>";
    let m = extract_content_metrics(html, "", "");
    assert_eq!(m.word_count, 3);
}

#[test]
fn falls_back_to_title_tag() {
    let html = "<html><head><title>  Botox   FAQ &amp; tips </title></head><body></body></html>";
    assert_eq!(extract_title(html), "Botox FAQ & tips");
}

#[test]
fn og_title_attribute_order_does_not_matter() {
    let html = r#"<meta content='Reversed order' property='og:title'>"#;
    assert_eq!(extract_title(html), "Reversed order");
}

#[test]
fn empty_og_title_falls_back_to_title_tag() {
    let html = r#"<head><meta property="og:title" content=""><title>Real title</title></head>"#;
    assert_eq!(extract_title(html), "Real title");
}

#[test]
fn missing_title_is_empty() {
    assert_eq!(extract_title("<p>no title</p>"), "");
}

#[test]
fn video_tag_counts_as_video() {
    assert!(has_video("<video src='clip.mp4'></video>"));
}

#[test]
fn naver_editor_video_module_counts_as_video() {
    assert!(has_video(r#"<div class="se-component se-video se-l-default"></div>"#));
    assert!(has_video(r#"<div class="se-module-video"></div>"#));
}

#[test]
fn non_video_iframe_is_not_video() {
    assert!(!has_video(r#"<iframe src="https://maps.example.com/embed"></iframe>"#));
    assert!(!has_video("<p>watch our youtube.com channel</p>"));
}

#[test]
fn vimeo_and_naver_tv_embeds_count_as_video() {
    assert!(has_video(r#"<iframe src="https://player.vimeo.com/video/1"></iframe>"#));
    assert!(has_video(r#"<iframe src="https://tv.naver.com/embed/123"></iframe>"#));
}

#[test]
fn keyword_frequency_is_case_insensitive_and_non_overlapping() {
    assert_eq!(keyword_frequency("Laser laser LASER", "laser"), 3);
    assert_eq!(keyword_frequency("aaaa", "aa"), 2);
}

#[test]
fn blank_keyword_never_matches() {
    assert_eq!(keyword_frequency("anything at all", "   "), 0);
}

#[test]
fn keyword_frequency_handles_korean_text() {
    assert_eq!(keyword_frequency("여드름 흉터 치료, 여드름 관리", "여드름"), 2);
}

#[test]
fn entities_are_decoded_once() {
    assert_eq!(decode_entities("a &amp;lt; b"), "a &lt; b");
    assert_eq!(decode_entities("x&nbsp;y"), "x y");
}

#[test]
fn empty_html_yields_zeroed_metrics() {
    let m = extract_content_metrics("", "https://blog.example.com/2", "botox");
    assert_eq!(m.word_count, 0);
    assert_eq!(m.image_count, 0);
    assert!(!m.has_video);
    assert_eq!(m.keyword_frequency, 0);
    assert_eq!(m.title, "");
}

#[test]
fn images_inside_comments_and_scripts_are_not_counted() {
    let html = r#"<!-- <img src="x.gif"> --><script>document.write('<img src="y.gif">')</script><img src="z.jpg">"#;
    assert_eq!(extract_content_metrics(html, "", "").image_count, 1);
}

#[test]
fn keyword_split_by_inline_markup_still_matches() {
    let text = visible_text("<p>acne <b>scar</b> removal</p>");
    assert_eq!(text, "acne scar removal");
    assert_eq!(keyword_frequency(&text, "acne scar"), 1);
}

#[test]
fn stripped_body_keeps_only_reader_text() {
    let body = strip_non_visible(
        "<head><title>x</title></head><p>acne</p><script>acne()</script><p>scar</p>",
    );
    assert_eq!(visible_text(&body), "acne scar");
}
