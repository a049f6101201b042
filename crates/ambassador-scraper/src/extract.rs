//! Best-effort HTML → [`ContentMetrics`] extraction.
//!
//! Regex based. Pages are scanned for four coarse numbers, not rendered, so
//! counts are approximate for malformed markup.

use std::borrow::Cow;
use std::sync::LazyLock;

use ambassador_core::ContentMetrics;
use regex::Regex;

static NON_VISIBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>|<head\b[^>]*>.*?</head\s*>",
    )
    .expect("valid non-visible regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));
static VIDEO_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<video\b").expect("valid video regex"));
static EMBED_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(?:iframe|embed)\b[^>]*>").expect("valid embed regex"));
static VIDEO_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube\.com|youtube-nocookie\.com|youtu\.be|vimeo\.com|tv\.naver\.com|serviceapi\.nmv\.naver\.com")
        .expect("valid video host regex")
});
static EDITOR_VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class\s*=\s*["'][^"']*\bse-(?:module-)?video\b"#)
        .expect("valid editor video regex")
});
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));
static OG_TITLE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bproperty\s*=\s*["']og:title["']"#).expect("valid og:title regex")
});
static CONTENT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid content regex")
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid title regex"));

/// Extracts content attributes for `keyword` from a page's HTML.
///
/// `url` is copied into the result unchanged.
#[must_use]
pub fn extract_content_metrics(html: &str, url: &str, keyword: &str) -> ContentMetrics {
    let body = strip_non_visible(html);
    let text = visible_text(&body);

    ContentMetrics {
        url: url.to_owned(),
        title: extract_title(html),
        word_count: saturating_u32(text.split_whitespace().count()),
        image_count: saturating_u32(IMG_TAG_RE.find_iter(&body).count()),
        has_video: has_video(&body),
        keyword_frequency: saturating_u32(keyword_frequency(&text, keyword)),
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Blanks out comments, scripts, styles, `<noscript>` and `<head>`.
pub(crate) fn strip_non_visible(html: &str) -> Cow<'_, str> {
    NON_VISIBLE_RE.replace_all(html, " ")
}

/// Text a reader would see in a body already passed through
/// [`strip_non_visible`]: tags replaced by whitespace, entities decoded,
/// whitespace collapsed.
pub(crate) fn visible_text(body: &str) -> String {
    let without_tags = TAG_RE.replace_all(body, " ");
    clean_whitespace(&decode_entities(&without_tags))
}

fn has_video(html: &str) -> bool {
    if VIDEO_TAG_RE.is_match(html) || EDITOR_VIDEO_RE.is_match(html) {
        return true;
    }
    EMBED_TAG_RE
        .find_iter(html)
        .any(|tag| VIDEO_HOST_RE.is_match(tag.as_str()))
}

/// `og:title` if present and non-empty, else `<title>`, else empty.
pub(crate) fn extract_title(html: &str) -> String {
    let og = META_TAG_RE
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| OG_TITLE_ATTR_RE.is_match(tag))
        .find_map(|tag| {
            CONTENT_ATTR_RE
                .captures(tag)
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().to_owned())
        })
        .map(|t| clean_whitespace(&decode_entities(&t)))
        .filter(|t| !t.is_empty());

    if let Some(title) = og {
        return title;
    }

    TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| clean_whitespace(&decode_entities(m.as_str())))
        .unwrap_or_default()
}

/// Case-insensitive, non-overlapping occurrences of `keyword` in `text`.
/// A blank keyword never matches.
pub(crate) fn keyword_frequency(text: &str, keyword: &str) -> usize {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(needle.as_str()).count()
}

fn clean_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the handful of entities that show up in blog titles and bodies.
pub(crate) fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
