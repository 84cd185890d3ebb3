//! Integration tests for the scoring engine.
//!
//! These tests drive `calculate_recommendations` end to end and check the
//! properties callers rely on: exclusion, output size, determinism,
//! monotonicity and the popularity-only fallback.

use engine::{
    BlendWeights, ContentScorer, ItemPolicy, MediaItem, RankedRecommendation, ScoringEngine,
    UserProfile, calculate_recommendations,
};

fn create_test_setup() -> (UserProfile, Vec<MediaItem>) {
    let profile = UserProfile::new("123e4567-e89b-12d3-a456-426614174000")
        .with_genre("ACTION", 5.0)
        .with_genre("THRILLER", 3.0)
        .with_genre("HORROR", 2.0);

    let catalog = vec![
        MediaItem::new("media-uuid-1", ["ACTION", "THRILLER"], 0.8)
            .with_title("Action Thriller Movie"),
        MediaItem::new("media-uuid-2", ["HORROR"], 0.6).with_title("Horror Film"),
        MediaItem::new("media-uuid-3", ["ACTION"], 0.9).with_title("Pure Action"),
    ];

    (profile, catalog)
}

fn ids(recommendations: &[RankedRecommendation]) -> Vec<&str> {
    recommendations.iter().map(|r| r.media_id.as_str()).collect()
}

fn position(recommendations: &[RankedRecommendation], media_id: &str) -> usize {
    recommendations
        .iter()
        .position(|r| r.media_id == media_id)
        .unwrap_or_else(|| panic!("{media_id} missing from output"))
}

fn assert_non_increasing(recommendations: &[RankedRecommendation]) {
    for pair in recommendations.windows(2) {
        assert!(
            pair[0].recommendation_score >= pair[1].recommendation_score,
            "scores out of order: {} before {}",
            pair[0].recommendation_score,
            pair[1].recommendation_score
        );
    }
}

#[test]
fn test_three_genre_scenario() {
    let (profile, catalog) = create_test_setup();

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();

    assert_eq!(recommendations.len(), 3, "All three items are eligible");
    assert!(
        position(&recommendations, "media-uuid-1") < position(&recommendations, "media-uuid-2"),
        "Two strong genres should outrank the weakest genre"
    );
    assert_non_increasing(&recommendations);

    for rec in &recommendations {
        assert!((0.0..=1.0).contains(&rec.content_score));
        assert!((0.0..=1.0).contains(&rec.popularity_score));
        assert!((0.0..=1.0).contains(&rec.recommendation_score));
    }

    let horror = &recommendations[position(&recommendations, "media-uuid-2")];
    assert_eq!(horror.details.title.as_deref(), Some("Horror Film"));
}

#[test]
fn test_zero_limit_returns_empty() {
    let (profile, catalog) = create_test_setup();

    let recommendations = calculate_recommendations(&profile, &catalog, 0).unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn test_negative_limit_returns_empty() {
    let (profile, catalog) = create_test_setup();

    let recommendations = calculate_recommendations(&profile, &catalog, -1).unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn test_all_interacted_returns_empty() {
    let (mut profile, catalog) = create_test_setup();
    for item in &catalog {
        profile.interacted_media_ids.insert(item.media_id.clone());
    }

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn test_empty_catalog_returns_empty() {
    let (profile, _) = create_test_setup();

    let recommendations = calculate_recommendations(&profile, &[], 10).unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn test_excluded_ids_never_returned() {
    let (profile, mut catalog) = create_test_setup();
    let profile = profile
        .with_interaction("media-uuid-3")
        .with_interaction("not-in-catalog");
    catalog.push(MediaItem::new("media-uuid-4", ["THRILLER"], 0.1));

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();

    for rec in &recommendations {
        assert!(
            !profile.interacted_media_ids.contains(&rec.media_id),
            "{} was already interacted with",
            rec.media_id
        );
    }
    assert_eq!(recommendations.len(), 3);
}

#[test]
fn test_output_length_is_min_of_limit_and_eligible() {
    let profile = UserProfile::new("u1")
        .with_genre("ACTION", 1.0)
        .with_interaction("m0")
        .with_interaction("m1");
    let catalog: Vec<MediaItem> = (0..8)
        .map(|i| MediaItem::new(format!("m{i}"), ["ACTION"], i as f64 / 10.0))
        .collect();
    let eligible = 6;

    for limit in 0..12 {
        let recommendations = calculate_recommendations(&profile, &catalog, limit).unwrap();
        assert_eq!(
            recommendations.len(),
            (limit as usize).min(eligible),
            "wrong length for limit {limit}"
        );
    }
}

#[test]
fn test_idempotent_output() {
    let (profile, mut catalog) = create_test_setup();
    catalog.push(MediaItem::new("media-uuid-4", ["THRILLER", "HORROR"], 0.75));
    catalog.push(MediaItem::new("media-uuid-5", ["ROMANCE"], 0.95));

    let engine = ScoringEngine::new();
    let first = engine.calculate_recommendations(&profile, &catalog, Some(10)).unwrap();
    let second = engine.calculate_recommendations(&profile, &catalog, Some(10)).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.recommendation_score.to_bits(), b.recommendation_score.to_bits());
        assert_eq!(a.content_score.to_bits(), b.content_score.to_bits());
    }
}

#[test]
fn test_inputs_not_mutated() {
    let (profile, catalog) = create_test_setup();
    let profile_before = profile.clone();
    let catalog_before = catalog.clone();

    let _ = calculate_recommendations(&profile, &catalog, 2).unwrap();

    assert_eq!(profile, profile_before);
    assert_eq!(catalog, catalog_before);
}

#[test]
fn test_monotonic_content_score() {
    let catalog = vec![
        MediaItem::new("a", ["DRAMA", "COMEDY"], 0.5),
        MediaItem::new("b", ["COMEDY"], 0.5),
        MediaItem::new("c", ["DRAMA", "WAR", "COMEDY"], 0.5),
    ];

    for item in &catalog {
        for genre in item.distinct_genres() {
            let mut previous = 0.0_f64;
            for step in 0..=10 {
                let profile = UserProfile::new("u1")
                    .with_genre("DRAMA", 2.0)
                    .with_genre("COMEDY", 4.0)
                    .with_genre("WAR", 1.0)
                    .with_genre("HORROR", 6.0)
                    .with_genre(genre.clone(), step as f64);

                let recommendations =
                    calculate_recommendations(&profile, std::slice::from_ref(item), 1).unwrap();
                let score = recommendations[0].content_score;
                assert!(
                    score + 1e-6 >= previous,
                    "{} content score dropped when raising {genre} to {step}",
                    item.media_id
                );
                previous = score;
            }
        }
    }
}

#[test]
fn test_empty_genre_profile_ranks_by_popularity() {
    let profile = UserProfile::new("u1");
    let catalog = vec![
        MediaItem::new("low", ["ACTION"], 0.2),
        MediaItem::new("tied-first", ["DRAMA"], 0.7),
        MediaItem::new("high", ["HORROR"], 0.9),
        MediaItem::new("tied-second", ["ACTION"], 0.7),
    ];

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();

    assert!(recommendations.iter().all(|r| r.content_score == 0.0));
    assert_eq!(
        ids(&recommendations),
        vec!["high", "tied-first", "tied-second", "low"]
    );
}

#[test]
fn test_all_zero_scores_keep_catalog_order() {
    let profile = UserProfile::new("u1").with_genre("WESTERN", 3.0);
    let catalog = vec![
        MediaItem::new("z", ["ACTION"], 0.0),
        MediaItem::new("y", ["DRAMA"], 0.0),
        MediaItem::new("x", Vec::<String>::new(), 0.0),
    ];

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();
    assert_eq!(ids(&recommendations), vec!["z", "y", "x"]);
}

#[test]
fn test_strong_content_match_beats_raw_popularity() {
    let profile = UserProfile::new("u1")
        .with_genre("DOCUMENTARY", 4.0)
        .with_genre("ACTION", 0.5);
    let catalog = vec![
        MediaItem::new("blockbuster", ["ACTION"], 1.0),
        MediaItem::new("niche", ["DOCUMENTARY"], 0.1),
    ];

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();
    assert_eq!(ids(&recommendations), vec!["niche", "blockbuster"]);
}

#[test]
fn test_out_of_range_popularity_does_not_fail() {
    let profile = UserProfile::new("u1").with_genre("ACTION", 1.0);
    let catalog = vec![
        MediaItem::new("a", ["ACTION"], 42.0),
        MediaItem::new("b", ["ACTION"], -3.0),
        MediaItem::new("c", ["ACTION"], f64::NAN),
    ];

    let recommendations = calculate_recommendations(&profile, &catalog, 10).unwrap();
    assert_eq!(ids(&recommendations), vec!["a", "b", "c"]);
    assert_eq!(recommendations[0].popularity_score, 1.0);
    assert_eq!(recommendations[2].popularity_score, 0.0);
}

#[test]
fn test_custom_weights_change_blend() {
    let (profile, catalog) = create_test_setup();
    let engine = ScoringEngine::new().with_weights(BlendWeights::new(1.0, 0.0).unwrap());

    let recommendations = engine
        .calculate_recommendations(&profile, &catalog, None)
        .unwrap();

    for rec in &recommendations {
        assert!((rec.recommendation_score - rec.content_score).abs() < 1e-6);
    }
}

#[test]
fn test_strict_and_lenient_policies() {
    let (profile, mut catalog) = create_test_setup();
    catalog.insert(1, MediaItem::new("", ["ACTION"], 1.0));

    let lenient = ScoringEngine::new()
        .calculate_recommendations(&profile, &catalog, Some(10))
        .unwrap();
    assert_eq!(lenient.len(), 3);

    let strict = ScoringEngine::new()
        .with_item_policy(ItemPolicy::Strict)
        .calculate_recommendations(&profile, &catalog, Some(10));
    assert!(matches!(
        strict,
        Err(engine::EngineError::InvalidMediaItem { position: 1, .. })
    ));
}

#[test]
fn test_engagement_score_does_not_change_ranking() {
    let (profile, catalog) = create_test_setup();
    let mut engaged = profile.clone();
    engaged.total_engagement_score = Some(100.0);

    let plain = calculate_recommendations(&profile, &catalog, 10).unwrap();
    let normalized = calculate_recommendations(&engaged, &catalog, 10).unwrap();

    assert_eq!(ids(&plain), ids(&normalized));
    let scorer = ContentScorer::new(&engaged);
    assert!((scorer.score(&catalog[1]) - 0.4).abs() < 1e-5);
}

#[test]
fn test_shared_catalog_across_threads() {
    let (profile, catalog) = create_test_setup();
    let engine = ScoringEngine::new();
    let expected = engine.calculate_recommendations(&profile, &catalog, Some(10)).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.calculate_recommendations(&profile, &catalog, Some(10))))
            .collect();
        for handle in handles {
            let result = handle.join().expect("scoring thread panicked").unwrap();
            assert_eq!(result, expected);
        }
    });
}
