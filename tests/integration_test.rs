/// End-to-end integration tests for the truthverify pipeline.
///
/// Tests the complete flow:
///   Config → Verifier (mock model) → Extract → Render → Report file
use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use truthverify::config::Config;
use truthverify::gemini::mock::MockClient;
use truthverify::geo::{Coordinates, FixedLocation, Geolocation};
use truthverify::models::{GroundingChunk, MapSource, WebSource};
use truthverify::progress::{self, ProgressStepper};
use truthverify::render::landscape;
use truthverify::render::{render_page, render_summary};
use truthverify::verifier::{Mode, Verifier};

const CLAIM_REPLY: &str = r#"I checked several sources.

```json
{
  "overall_verdict": "False",
  "overall_confidence_score": 96,
  "overall_explanation": "The Eiffel Tower is **330 m** tall; the Empire State Building is 443 m.",
  "is_complex_claim": true,
  "sub_claim_analyses": [
    {
      "sub_claim": "The Eiffel Tower is taller than the Empire State Building",
      "verdict": "False",
      "confidence_score": 98,
      "explanation": "- Eiffel Tower: 330 m\n- Empire State Building: 443 m"
    },
    {
      "sub_claim": "The Eiffel Tower is the most visited monument",
      "verdict": "Misleading",
      "confidence_score": 60,
      "explanation": "It is the most visited *paid* monument."
    }
  ],
  "definitive_sources": [
    {"uri": "https://www.toureiffel.paris/en", "title": "Official site", "analysis": {"bias": "Corporate", "sentiment": "Positive", "tone": "Promotional"}},
    {"uri": "https://www.esbnyc.com", "title": "ESB", "analysis": {"bias": "Corporate", "sentiment": "Positive", "tone": "Promotional"}},
    {"uri": "https://news.example/op-ed", "title": "Op-ed", "analysis": {"bias": "Left-leaning", "sentiment": "Negative", "tone": "Opinionated"}}
  ]
}
```
"#;

fn web(uri: &str, title: &str) -> GroundingChunk {
    GroundingChunk {
        web: Some(WebSource {
            uri: uri.to_string(),
            title: title.to_string(),
        }),
        maps: None,
    }
}

/// Full pipeline: mock model → verification → report page on disk
#[tokio::test]
async fn test_full_pipeline() {
    let temp_dir = tempdir().unwrap();
    let report = temp_dir.path().join("report.html");

    let grounding = vec![
        web("https://en.wikipedia.org/wiki/Eiffel_Tower", "Eiffel Tower"),
        GroundingChunk {
            web: None,
            maps: Some(MapSource {
                uri: "https://maps.google.com/?cid=1".to_string(),
                title: "Tour Eiffel".to_string(),
                place_answer_sources: None,
            }),
        },
        web("https://en.wikipedia.org/wiki/Eiffel_Tower", "Eiffel Tower (again)"),
    ];
    let verifier = Verifier::new(MockClient::with_grounding(CLAIM_REPLY, grounding));

    let verification = verifier
        .verify(
            Mode::Text,
            "  The Eiffel Tower is taller than the Empire State Building and is the most visited monument.  ",
            None,
        )
        .await
        .unwrap();

    // Input is trimmed before it reaches the prompt
    let requests = verifier.client().requests();
    assert!(requests[0].prompt.contains(
        "Claim: \"The Eiffel Tower is taller than the Empire State Building and is the most visited monument.\""
    ));

    assert_eq!(verification.results.len(), 1);
    let result = &verification.results[0];
    assert_eq!(result.sub_claim_analyses.len(), 2);
    assert_eq!(result.definitive_sources.len(), 3);

    // Two corporate/promotional sources share a base position
    let points = landscape::layout(&result.definitive_sources);
    let gap = (points[1].cx - points[0].cx).hypot(points[1].cy - points[0].cy);
    assert!((gap - 8.0).abs() < 1e-6, "jittered by one ring, got {gap}");
    assert_ne!((points[2].cx, points[2].cy), (points[0].cx, points[0].cy));

    let page = render_page(&verification);
    fs::write(&report, &page).unwrap();
    let written = fs::read_to_string(&report).unwrap();

    assert!(written.starts_with("<!DOCTYPE html>"));
    assert!(written.contains("Analysis for Claim:"));
    assert!(written.contains("<strong>330 m</strong>"));
    assert!(written.contains("Claim Deconstruction"));
    assert!(written.contains("Source Landscape"));
    assert!(written.contains("All Sources Consulted"));
    // Wikipedia chunk deduplicated; last title wins
    assert_eq!(written.matches("https://en.wikipedia.org/wiki/Eiffel_Tower").count(), 1);
    assert!(written.contains("Eiffel Tower (again)"));

    let summary = render_summary(&verification);
    assert!(summary.contains("Verdict:    False"));
    assert!(summary.contains("Confidence: 96%"));
    assert!(summary.contains("Sources consulted (2):"));
}

/// URL mode yields one card per extracted claim
#[tokio::test]
async fn test_url_mode_multiple_claims() {
    let reply = "```json\n{\"claims_analyses\": [\
        {\"overall_verdict\": \"True\", \"overall_confidence_score\": 80, \"sub_claim_analyses\": [{\"sub_claim\": \"A\"}]},\
        {\"overall_verdict\": \"Unverified\", \"overall_confidence_score\": 20, \"sub_claim_analyses\": [{\"sub_claim\": \"B\"}]}\
    ]}\n```";
    let verifier = Verifier::new(MockClient::new(reply));

    let verification = verifier
        .verify_with_geo(Mode::Url, "https://news.example/story", &Geolocation::new())
        .await
        .unwrap();

    assert_eq!(verification.results.len(), 2);
    let page = render_page(&verification);
    assert_eq!(page.matches("<section class=\"card\">").count(), 2);
    assert!(page.contains("meter-high"));
    assert!(page.contains("meter-low"));
}

/// Geolocation toggle: coordinates flow into the request once acquired
#[tokio::test]
async fn test_geolocation_flow() {
    let verifier = Verifier::new(MockClient::new(CLAIM_REPLY));
    let coords = Coordinates::new(40.7484, -73.9857).unwrap();

    let mut geo = Geolocation::new();
    geo.enable(&FixedLocation(coords)).await;
    assert_eq!(geo.message(), "Location acquired!");

    verifier
        .verify_with_geo(Mode::Text, "The closest coffee shop is open now", &geo)
        .await
        .unwrap();
    assert_eq!(verifier.client().requests()[0].location, Some(coords));

    geo.disable();
    verifier
        .verify_with_geo(Mode::Text, "The closest coffee shop is open now", &geo)
        .await
        .unwrap();
    assert_eq!(verifier.client().requests()[1].location, None);
}

/// Failures never panic and surface the generic message
#[tokio::test]
async fn test_invalid_reply_surfaces_generic_message() {
    let verifier = Verifier::new(MockClient::new("```json\n{ not json }\n```"));
    let err = verifier
        .verify(Mode::Text, "The moon is made of cheese", None)
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        format!(
            "An error occurred: {err}. The model may have returned an invalid response. Check the console for details."
        )
    );
}

/// Config save → load round trip through a temp file
#[test]
fn test_config_round_trip() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut cfg = Config::default();
    cfg.model = "gemini-2.5-pro".to_string();
    cfg.progress_interval_ms = 500;
    cfg.geo.enabled = true;
    cfg.geo.latitude = Some(48.8584);
    cfg.geo.longitude = Some(2.2945);
    cfg.save(&path).unwrap();

    let loaded = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.model, "gemini-2.5-pro");
    assert_eq!(loaded.progress_interval_ms, 500);
    assert_eq!(loaded.fixed_location(), Some((48.8584, 2.2945)));
    loaded.validate().unwrap();
}

/// Stepper runs alongside slow work and ends fully completed
#[tokio::test(start_paused = true)]
async fn test_progress_alongside_work() {
    let mut stepper = ProgressStepper::default();
    let mut changes = 0;

    let out = progress::drive(
        &mut stepper,
        Duration::from_millis(1800),
        async {
            tokio::time::sleep(Duration::from_secs(20)).await;
            "done"
        },
        |_| changes += 1,
    )
    .await;

    assert_eq!(out, "done");
    assert!(stepper.is_finished());
    assert_eq!(stepper.current(), stepper.len());
    assert!(changes >= 4);
}
