mod common;

use assert2::check;
use catalog_search::engine::Engine;
use common::{engine, product};
use rstest::rstest;
use std::sync::Arc;

/// More frequent completions rank first.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_orders_by_frequency(engine: Arc<Engine>) {
    for i in 0..10 {
        engine
            .index_product(product(
                &format!("CAM{i}"),
                "Camera Tripod",
                "",
                &[],
                3999,
                1,
            ))
            .await;
    }
    engine
        .index_product(product("C99", "Silk Camisole", "", &[], 2599, 2))
        .await;

    let suggestions = engine.autocomplete("cam", Some(5)).await.unwrap();
    check!(suggestions == vec!["camera", "camisole"]);
}

/// Prefixes shorter than two characters after trimming yield nothing.
#[rstest]
#[case("")]
#[case("c")]
#[case("  c  ")]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_requires_two_chars(engine: Arc<Engine>, #[case] prefix: &str) {
    engine
        .index_product(product("P1", "Camera", "", &[], 3999, 1))
        .await;

    check!(engine.autocomplete(prefix, None).await.unwrap().is_empty());
}

/// A surrounding-whitespace prefix still matches after trimming.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_trims_prefix(engine: Arc<Engine>) {
    engine
        .index_product(product("P1", "Camera", "", &[], 3999, 1))
        .await;

    check!(engine.autocomplete(" cam ", None).await.unwrap() == vec!["camera"]);
}

/// Category labels complete as whole phrases alongside title tokens.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_includes_category_labels(engine: Arc<Engine>) {
    engine
        .index_product(product(
            "P1",
            "Garden Trowel",
            "",
            &["Home & Garden"],
            1299,
            9,
        ))
        .await;

    let suggestions = engine.autocomplete("ga", Some(10)).await.unwrap();
    check!(suggestions.contains(&"garden".to_string()));

    let suggestions = engine.autocomplete("home", Some(10)).await.unwrap();
    check!(suggestions == vec!["home & garden"]);
}

/// Suggestions always start with the (case-folded) prefix.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_suggestions_extend_prefix(engine: Arc<Engine>) {
    engine
        .index_product(product("P1", "Camera Cable Cart", "", &[], 999, 1))
        .await;

    let suggestions = engine.autocomplete("CA", Some(10)).await.unwrap();
    check!(!suggestions.is_empty());
    check!(suggestions.iter().all(|s| s.starts_with("ca")));
}

/// Re-indexing keeps incrementing frequencies rather than duplicating
/// entries.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autocomplete_no_duplicate_suggestions(engine: Arc<Engine>) {
    for _ in 0..3 {
        engine
            .index_product(product("P1", "Camera", "", &[], 3999, 1))
            .await;
    }

    let suggestions = engine.autocomplete("cam", Some(10)).await.unwrap();
    check!(suggestions == vec!["camera"]);
}
