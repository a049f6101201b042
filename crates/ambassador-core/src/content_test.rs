use super::*;

fn page(words: u32, images: u32, video: bool, keyword: u32) -> ContentMetrics {
    ContentMetrics {
        url: "https://blog.example.com/post".to_string(),
        title: "Laser toning aftercare".to_string(),
        word_count: words,
        image_count: images,
        has_video: video,
        keyword_frequency: keyword,
    }
}

// -----------------------------------------------------------------------
// score_content
// -----------------------------------------------------------------------

#[test]
fn maxed_out_page_scores_hundred() {
    assert_eq!(score_content(&page(2600, 16, true, 6)), 100);
}

#[test]
fn empty_page_scores_zero() {
    assert_eq!(score_content(&ContentMetrics::default()), 0);
}

#[test]
fn word_count_breakpoints() {
    assert_eq!(score_content(&page(999, 0, false, 0)), 0);
    assert_eq!(score_content(&page(1000, 0, false, 0)), 10);
    assert_eq!(score_content(&page(1499, 0, false, 0)), 10);
    assert_eq!(score_content(&page(1500, 0, false, 0)), 20);
    assert_eq!(score_content(&page(2499, 0, false, 0)), 20);
    assert_eq!(score_content(&page(2500, 0, false, 0)), 30);
}

#[test]
fn image_count_breakpoints() {
    assert_eq!(score_content(&page(0, 2, false, 0)), 0);
    assert_eq!(score_content(&page(0, 3, false, 0)), 10);
    assert_eq!(score_content(&page(0, 5, false, 0)), 15);
    assert_eq!(score_content(&page(0, 10, false, 0)), 20);
    assert_eq!(score_content(&page(0, 14, false, 0)), 20);
    assert_eq!(score_content(&page(0, 15, false, 0)), 25);
}

#[test]
fn video_adds_twenty() {
    assert_eq!(score_content(&page(0, 0, true, 0)), 20);
}

#[test]
fn keyword_frequency_breakpoints() {
    assert_eq!(score_content(&page(0, 0, false, 1)), 5);
    assert_eq!(score_content(&page(0, 0, false, 2)), 5);
    assert_eq!(score_content(&page(0, 0, false, 3)), 15);
    assert_eq!(score_content(&page(0, 0, false, 5)), 25);
}

#[test]
fn extreme_values_stay_within_bounds() {
    assert_eq!(score_content(&page(10_000_000, u32::MAX, true, u32::MAX)), 100);
}

#[test]
fn score_is_monotonic_in_each_dimension() {
    let samples = [0_u32, 1, 2, 3, 4, 5, 9, 10, 14, 15, 999, 1000, 1500, 2500, 10_000];
    for base in [page(0, 0, false, 0), page(1200, 6, true, 2)] {
        let mut prev = 0;
        for &w in &samples {
            let s = score_content(&ContentMetrics { word_count: w, ..base.clone() });
            assert!(s >= prev, "word_count {w} decreased score");
            prev = s;
        }
        prev = 0;
        for &i in &samples {
            let s = score_content(&ContentMetrics { image_count: i, ..base.clone() });
            assert!(s >= prev, "image_count {i} decreased score");
            prev = s;
        }
        prev = 0;
        for &k in &samples {
            let s = score_content(&ContentMetrics { keyword_frequency: k, ..base.clone() });
            assert!(s >= prev, "keyword_frequency {k} decreased score");
            prev = s;
        }
        let without = score_content(&ContentMetrics { has_video: false, ..base.clone() });
        let with = score_content(&ContentMetrics { has_video: true, ..base.clone() });
        assert!(with >= without);
    }
}

// -----------------------------------------------------------------------
// DraftContent
// -----------------------------------------------------------------------

#[test]
fn draft_missing_fields_default_to_zero() {
    let m = DraftContent {
        word_count: Some(1600),
        ..DraftContent::default()
    }
    .into_metrics();
    assert_eq!(m.url, "");
    assert_eq!(m.word_count, 1600);
    assert_eq!(m.image_count, 0);
    assert!(!m.has_video);
    assert_eq!(score_content(&m), 20);
}

#[test]
fn draft_deserializes_from_partial_json() {
    let draft: DraftContent = serde_json::from_str(r#"{"image_count": 4}"#).unwrap();
    assert_eq!(draft.image_count, Some(4));
    assert!(draft.word_count.is_none());
}

// -----------------------------------------------------------------------
// average_top_blogs
// -----------------------------------------------------------------------

#[test]
fn average_of_empty_slice_is_none() {
    assert!(average_top_blogs(&[]).is_none());
}

#[test]
fn average_rounds_numeric_fields() {
    let blogs = [page(1000, 3, false, 1), page(2001, 4, false, 2)];
    let avg = average_top_blogs(&blogs).unwrap();
    // 1500.5 → 1501, 3.5 → 4, 1.5 → 2
    assert_eq!(avg.word_count, 1501);
    assert_eq!(avg.image_count, 4);
    assert_eq!(avg.keyword_frequency, 2);
}

#[test]
fn average_score_is_mean_of_page_scores() {
    let blogs = [page(2600, 16, true, 6), page(0, 0, false, 0), page(1000, 0, false, 0)];
    let avg = average_top_blogs(&blogs).unwrap();
    // (100 + 0 + 10) / 3 = 36.67 → 37
    assert_eq!(avg.score, 37);
}

#[test]
fn video_needs_two_pages_regardless_of_batch_size() {
    let one_of_one = [page(0, 0, true, 0)];
    assert!(!average_top_blogs(&one_of_one).unwrap().has_video);

    let one_of_two = [page(0, 0, true, 0), page(0, 0, false, 0)];
    assert!(!average_top_blogs(&one_of_two).unwrap().has_video);

    let two_of_two = [page(0, 0, true, 0), page(0, 0, true, 0)];
    assert!(average_top_blogs(&two_of_two).unwrap().has_video);

    let two_of_three = [page(0, 0, true, 0), page(0, 0, false, 0), page(0, 0, true, 0)];
    assert!(average_top_blogs(&two_of_three).unwrap().has_video);
}
