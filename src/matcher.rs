// src/matcher.rs
//! Response matching against the signature catalog.
//!
//! One pass over the response credits each WAF with at most one signature
//! hit. Two independent heuristic passes look for scripted challenges and
//! timing anomalies. All scoring constants are fixed per detection kind.

use crate::response::ResponseView;
use crate::signatures::SignatureCatalog;
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;

/// Confidence assigned to a direct signature hit.
pub const SIGNATURE_CONFIDENCE: u32 = 100;
/// Confidence assigned to a scripted-challenge detection.
pub const SCRIPT_CHALLENGE_CONFIDENCE: u32 = 70;
/// Confidence assigned to a timing anomaly.
pub const TIMING_CONFIDENCE: u32 = 60;

/// Responses slower than this are flagged as a timing anomaly.
const TIMING_THRESHOLD: Duration = Duration::from_secs(5);

const CHALLENGE_TOKEN: &str = "challenge";

/// One detection produced by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A catalog signature was found in the headers, body, or cookies.
    SignatureMatch { waf: String, signature: String },
    /// A challenge token was found in a script block or the body.
    ScriptChallenge,
    /// The response took suspiciously long.
    TimingAnomaly,
}

impl Detection {
    /// Display label, also the key into the confidence map.
    pub fn label(&self) -> String {
        match self {
            Detection::SignatureMatch { waf, .. } => waf.clone(),
            Detection::ScriptChallenge => "JavaScript challenge detected".to_string(),
            Detection::TimingAnomaly => "Possible WAF (timing analysis)".to_string(),
        }
    }
}

/// Detection label or WAF name mapped to its confidence score (0-100).
pub type ConfidenceMap = HashMap<String, u32>;

/// Matched signature string mapped to the WAF that owns it.
pub type FingerprintMap = HashMap<String, String>;

/// Everything one matching pass produced.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Detections in discovery order, duplicates preserved.
    pub detections: Vec<Detection>,
    pub confidence: ConfidenceMap,
    pub fingerprints: FingerprintMap,
}

impl MatchOutcome {
    pub fn fingerprint_keys(&self) -> Vec<String> {
        self.fingerprints.keys().cloned().collect()
    }
}

pub struct Matcher {
    challenge_re: Regex,
}

impl Matcher {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Matcher {
            challenge_re: Regex::new("(?i)challenge")?,
        })
    }

    /// Scan one response against the catalog.
    ///
    /// Signature matching is case-insensitive substring search over the
    /// header dump, the body, and the cookie dump. Scanning for a WAF stops
    /// at its first matching signature, so a WAF is credited at most once
    /// per response.
    pub fn analyze(&self, response: &ResponseView, catalog: &SignatureCatalog) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        let headers_lower = response.header_dump().to_lowercase();
        let body_lower = response.body.to_lowercase();
        let cookies_lower = response.cookies.to_lowercase();

        for (waf, signatures) in catalog.iter() {
            for signature in signatures {
                let needle = signature.to_lowercase();
                if headers_lower.contains(&needle)
                    || body_lower.contains(&needle)
                    || cookies_lower.contains(&needle)
                {
                    outcome.detections.push(Detection::SignatureMatch {
                        waf: waf.to_string(),
                        signature: signature.clone(),
                    });
                    outcome
                        .confidence
                        .insert(waf.to_string(), SIGNATURE_CONFIDENCE);
                    outcome
                        .fingerprints
                        .insert(signature.clone(), waf.to_string());
                    break;
                }
            }
        }

        // One detection per challenge-bearing script block, duplicates kept.
        for script in &response.scripts {
            if script.to_lowercase().contains(CHALLENGE_TOKEN) {
                let detection = Detection::ScriptChallenge;
                outcome
                    .confidence
                    .insert(detection.label(), SCRIPT_CHALLENGE_CONFIDENCE);
                outcome.detections.push(detection);
            }
        }

        // Coarser body-wide pass. Can fire in addition to the script pass
        // for the same response.
        if self.challenge_re.is_match(&response.body) {
            let detection = Detection::ScriptChallenge;
            outcome
                .confidence
                .insert(detection.label(), SCRIPT_CHALLENGE_CONFIDENCE);
            outcome.detections.push(detection);
        }

        if response.elapsed > TIMING_THRESHOLD {
            let detection = Detection::TimingAnomaly;
            outcome
                .confidence
                .insert(detection.label(), TIMING_CONFIDENCE);
            outcome.detections.push(detection);
        }

        outcome
    }
}
