use dioxus::prelude::*;
use survey_core::model::{CardIndex, CompletionMode, ItemId};

use super::test_harness::{ENERGY_BARS, catalog, drive_dom, setup_view_harness};
use crate::vm::SurveyIntent;

fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_renders_shuffled_deck() {
    let mut harness = setup_view_harness(catalog(ENERGY_BARS, CompletionMode::RedirectOnContinue));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Energy Bar Research"), "missing title in {html}");
    assert!(html.contains("Progress: 1 / 3"), "missing progress in {html}");
    assert_eq!(count(&html, "class=\"product-card\""), 3, "{html}");
    assert_eq!(count(&html, ">Next<"), 2, "{html}");
    assert_eq!(count(&html, ">Continue<"), 1, "{html}");
    assert!(html.contains("Honey Crunch information card"), "{html}");
    assert!(html.contains("Oats, honey, almonds"), "{html}");
    assert!(html.contains("toast hidden"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_empty_deck_reads_zero() {
    let raw = r#"{ "form_url": "https://forms.gle/x", "items": [] }"#;
    let mut harness = setup_view_harness(catalog(raw, CompletionMode::RedirectOnContinue));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Progress: 0 / 0"), "{html}");
    assert!(html.contains("There are no products to show."), "{html}");
    assert_eq!(count(&html, "class=\"product-card\""), 0, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_blocks_continue_until_all_seen() {
    let mut harness = setup_view_harness(catalog(ENERGY_BARS, CompletionMode::RedirectOnContinue));
    harness.rebuild();

    let dispatch = harness.handles.dispatch();
    harness
        .dom
        .in_scope(ScopeId::ROOT, || dispatch.call(SurveyIntent::Forward(CardIndex::new(2))));
    drive_dom(&mut harness.dom);
    let html = harness.render();

    assert!(html.contains("role=\"alert\""), "{html}");
    assert!(
        html.contains("Please view all products before continuing."),
        "missing notice in {html}"
    );
    assert!(html.contains("Progress: 1 / 3"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_compare_mode_shows_options() {
    let mut harness = setup_view_harness(catalog(ENERGY_BARS, CompletionMode::Compare));
    harness.rebuild();

    let dispatch = harness.handles.dispatch();
    harness.dom.in_scope(ScopeId::ROOT, || {
        for i in 0..3 {
            dispatch.call(SurveyIntent::Visible {
                index: Some(CardIndex::new(i)),
                ratio: 0.6,
            });
        }
        dispatch.call(SurveyIntent::Forward(CardIndex::new(2)));
    });
    drive_dom(&mut harness.dom);
    let html = harness.render();

    assert!(html.contains("Progress: 3 / 3"), "{html}");
    assert!(html.contains("Choose RXBAR"), "{html}");
    assert!(html.contains("Choose Clif Bar"), "{html}");
    assert_eq!(count(&html, "class=\"product-card\""), 0, "{html}");

    let survey = harness.handles.survey();
    let comparing = harness.dom.in_scope(ScopeId::ROOT, || {
        matches!(&*survey.peek(), Ok(vm) if vm.is_comparing())
    });
    assert!(comparing);

    harness.dom.in_scope(ScopeId::ROOT, || {
        dispatch.call(SurveyIntent::Choose(ItemId::new("missing").unwrap()));
    });
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains("Something went wrong. Please try again."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_compare_choice_keeps_deck_hidden() {
    let mut harness = setup_view_harness(catalog(ENERGY_BARS, CompletionMode::Compare));
    harness.rebuild();

    let dispatch = harness.handles.dispatch();
    harness.dom.in_scope(ScopeId::ROOT, || {
        for i in 0..3 {
            dispatch.call(SurveyIntent::Visible {
                index: Some(CardIndex::new(i)),
                ratio: 0.6,
            });
        }
        dispatch.call(SurveyIntent::Forward(CardIndex::new(2)));
        dispatch.call(SurveyIntent::Choose(ItemId::new("rxbar").unwrap()));
    });
    drive_dom(&mut harness.dom);
    let html = harness.render();

    assert!(html.contains("class=\"toast\""), "toast hidden in {html}");
    assert!(html.contains("Thanks! Taking you to the survey..."), "{html}");
    assert_eq!(count(&html, "class=\"product-card\""), 0, "{html}");
    assert_eq!(count(&html, "comparison-option chosen"), 1, "{html}");
    assert!(html.contains("Choose RXBAR"), "{html}");
}
