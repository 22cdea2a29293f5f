// src/ranker.rs
//! Fuzzy ranking of WAF candidates.
//!
//! Every catalog signature is compared against every observed fingerprint
//! with a normalized Levenshtein ratio. Per-WAF totals are sorted and the
//! top three are rescaled so the best candidate reads as 100.

use crate::signatures::SignatureCatalog;
use strsim::levenshtein;

/// How many ranked candidates the report keeps.
const TOP_N: usize = 3;

/// Ordered (WAF name, normalized score) pairs, best first.
pub type RankedResult = Vec<(String, u32)>;

/// Normalized edit-distance similarity between two strings, 0-100.
/// Identical strings score 100.
pub fn similarity_ratio(a: &str, b: &str) -> u32 {
    let len = a.chars().count().max(b.chars().count()).max(1);
    let dist = levenshtein(a, b);
    (100.0 * (1.0 - dist as f64 / len as f64)).round() as u32
}

pub struct Ranker;

impl Ranker {
    /// Rank catalog WAFs by aggregate similarity to the observed
    /// fingerprints. A WAF accumulates once per catalog signature compared
    /// against every fingerprint; only positive ratios count.
    ///
    /// Pure function over its inputs. Ties keep catalog order. An empty
    /// fingerprint set produces an empty result.
    pub fn rank(fingerprints: &[String], catalog: &SignatureCatalog) -> RankedResult {
        let mut totals: Vec<(String, u32)> = Vec::new();

        for (waf, signatures) in catalog.iter() {
            let mut total = 0u32;
            for signature in signatures {
                for fingerprint in fingerprints {
                    let score = similarity_ratio(signature, fingerprint);
                    if score > 0 {
                        total += score;
                    }
                }
            }
            if total > 0 {
                totals.push((waf.to_string(), total));
            }
        }

        // Stable sort keeps catalog order for equal totals.
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals.truncate(TOP_N);

        let max_score = totals.first().map(|(_, s)| *s).unwrap_or(100);
        totals
            .into_iter()
            .map(|(waf, score)| {
                let normalized = (score as f64 / max_score as f64 * 100.0) as u32;
                (waf, normalized.min(100))
            })
            .collect()
    }
}
