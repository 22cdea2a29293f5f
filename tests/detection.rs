use rust_waf_hunter::matcher::{Detection, Matcher};
use rust_waf_hunter::ranker::Ranker;
use rust_waf_hunter::report::Report;
use rust_waf_hunter::response::ResponseView;
use rust_waf_hunter::signatures::SignatureCatalog;
use std::time::Duration;

fn test_catalog() -> SignatureCatalog {
    SignatureCatalog::from_entries(vec![
        (
            "Cloudflare".to_string(),
            vec!["cloudflare-nginx".to_string(), "__cfduid".to_string()],
        ),
        ("Akamai".to_string(), vec!["akamai".to_string()]),
    ])
}

#[test]
fn test_cloudflare_header_detected_end_to_end() {
    let catalog = test_catalog();
    let response = ResponseView {
        headers: vec![("Server".to_string(), "cloudflare-nginx".to_string())],
        body: "<html><body>welcome</body></html>".to_string(),
        cookies: String::new(),
        elapsed: Duration::from_millis(1200),
        scripts: vec![],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);

    assert_eq!(
        outcome.detections,
        vec![Detection::SignatureMatch {
            waf: "Cloudflare".to_string(),
            signature: "cloudflare-nginx".to_string(),
        }]
    );
    assert_eq!(outcome.confidence.get("Cloudflare"), Some(&100));
    assert_eq!(
        outcome.fingerprints.get("cloudflare-nginx"),
        Some(&"Cloudflare".to_string())
    );

    let ranked = Ranker::rank(&outcome.fingerprint_keys(), &catalog);
    assert_eq!(ranked[0], ("Cloudflare".to_string(), 100));
}

#[test]
fn test_timing_only_response_has_no_fingerprints() {
    let catalog = test_catalog();
    let response = ResponseView {
        headers: vec![("Server".to_string(), "nginx".to_string())],
        body: "plain page".to_string(),
        cookies: String::new(),
        elapsed: Duration::from_millis(6100),
        scripts: vec![],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);

    assert_eq!(outcome.detections, vec![Detection::TimingAnomaly]);
    assert_eq!(
        outcome.confidence.get("Possible WAF (timing analysis)"),
        Some(&60)
    );

    let ranked = Ranker::rank(&outcome.fingerprint_keys(), &catalog);
    assert!(ranked.is_empty());
}

#[test]
fn test_three_challenge_scripts_yield_three_labels() {
    let catalog = test_catalog();
    let response = ResponseView {
        headers: vec![],
        body: "static body".to_string(),
        cookies: String::new(),
        elapsed: Duration::from_millis(900),
        scripts: vec![
            "startChallenge()".to_string(),
            "challenge stage two".to_string(),
            "finish the CHALLENGE".to_string(),
        ],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);

    let challenges = outcome
        .detections
        .iter()
        .filter(|d| **d == Detection::ScriptChallenge)
        .count();
    assert_eq!(challenges, 3);
    assert_eq!(
        outcome.confidence.get("JavaScript challenge detected"),
        Some(&70)
    );
}

#[test]
fn test_clean_fast_response_detects_nothing() {
    let catalog = test_catalog();
    let response = ResponseView {
        headers: vec![("Server".to_string(), "Apache".to_string())],
        body: "<html><body>nothing here</body></html>".to_string(),
        cookies: "session=abc123".to_string(),
        elapsed: Duration::from_millis(300),
        scripts: vec!["console.log('hi')".to_string()],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);

    assert!(outcome.detections.is_empty());
    assert!(outcome.fingerprints.is_empty());
}

#[test]
fn test_report_pairs_labels_with_confidence() {
    let catalog = test_catalog();
    let response = ResponseView {
        headers: vec![("Set-Cookie".to_string(), "__cfduid=x".to_string())],
        body: String::new(),
        cookies: "__cfduid=x".to_string(),
        elapsed: Duration::from_millis(800),
        scripts: vec![],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);
    let ranked = Ranker::rank(&outcome.fingerprint_keys(), &catalog);
    let report = Report::assemble(&outcome, ranked, None);

    let lines = report.lines();
    assert_eq!(
        lines[0],
        "[+] WAF detected: Cloudflare (Confidence: 100%)"
    );
    assert!(lines.contains(&"[~] WAF Fingerprint:".to_string()));
}

#[test]
fn test_shipped_catalog_loads_and_lists() {
    let catalog = SignatureCatalog::load("docs/waf_signatures.json").unwrap();

    assert!(!catalog.is_empty());
    let names: Vec<&str> = catalog.names().collect();
    assert!(names.contains(&"Cloudflare"));
    assert!(names.contains(&"ModSecurity"));
}

#[test]
fn test_shipped_catalog_detects_incapsula_cookie() {
    let catalog = SignatureCatalog::load("docs/waf_signatures.json").unwrap();
    let response = ResponseView {
        headers: vec![(
            "Set-Cookie".to_string(),
            "incap_ses_123=abc; path=/".to_string(),
        )],
        body: String::new(),
        cookies: "incap_ses_123=abc".to_string(),
        elapsed: Duration::from_millis(400),
        scripts: vec![],
    };

    let matcher = Matcher::new().unwrap();
    let outcome = matcher.analyze(&response, &catalog);

    assert_eq!(outcome.confidence.get("Imperva Incapsula"), Some(&100));
}
