// src/report.rs
//! Final report assembly and output.
//!
//! Pure merge step: detections pair with their confidence in discovery
//! order, the ranked fingerprint list rides alongside. A detection whose
//! label is missing from the confidence map renders as "Unknown" instead
//! of failing. File output is a single write, all or nothing.

use crate::matcher::MatchOutcome;
use crate::ranker::RankedResult;
use crate::recon::SiteInfo;
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Report {
    /// (label, confidence text) pairs in discovery order.
    pub detections: Vec<(String, String)>,
    /// Top-ranked WAF candidates with normalized scores.
    pub ranked: RankedResult,
    pub site: Option<SiteInfo>,
}

impl Report {
    pub fn assemble(
        outcome: &MatchOutcome,
        ranked: RankedResult,
        site: Option<SiteInfo>,
    ) -> Self {
        let detections = outcome
            .detections
            .iter()
            .map(|detection| {
                let label = detection.label();
                let confidence = outcome
                    .confidence
                    .get(&label)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                (label, confidence)
            })
            .collect();

        Report {
            detections,
            ranked,
            site,
        }
    }

    /// Plain-text report lines, free of ANSI escapes.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.detections.is_empty() {
            lines.push("[!] No WAF detected or unknown WAF".to_string());
        } else {
            for (label, confidence) in &self.detections {
                lines.push(format!(
                    "[+] WAF detected: {} (Confidence: {}%)",
                    label, confidence
                ));
            }
        }

        if let Some(site) = &self.site {
            lines.push(format!("[~] URL: {}", site.url));
            lines.push(format!("[~] IP Address: {}", site.ip_address));
            lines.push(format!("[~] Server Info: {}", site.server));
            lines.push(format!("[~] X-Powered-By: {}", site.x_powered_by));
            lines.push("[~] Meta Information:".to_string());
            for (key, value) in &site.meta {
                lines.push(format!("    {}: {}", key, value));
            }
        }

        if self.ranked.is_empty() {
            lines.push("[!] No WAF detected.".to_string());
        } else {
            lines.push("[~] WAF Fingerprint:".to_string());
            for (waf, score) in &self.ranked {
                lines.push(format!("    [+] WAF: {} (Confidence: {}%)", waf, score));
            }
        }

        lines
    }

    /// Print the report to the console with colored status prefixes.
    pub fn print(&self) {
        if self.detections.is_empty() {
            println!(
                "{} No WAF detected or unknown WAF",
                "[!]".yellow()
            );
        } else {
            for (label, confidence) in &self.detections {
                println!(
                    "{} WAF detected: {} (Confidence: {}%)",
                    "[+]".green(),
                    label,
                    confidence
                );
            }
        }

        if let Some(site) = &self.site {
            println!("{} URL: {}", "[~]".blue(), site.url);
            println!("{} IP Address: {}", "[~]".blue(), site.ip_address);
            println!("{} Server Info: {}", "[~]".blue(), site.server);
            println!("{} X-Powered-By: {}", "[~]".blue(), site.x_powered_by);
            println!("{} Meta Information:", "[~]".blue());
            for (key, value) in &site.meta {
                println!("    {}: {}", key, value);
            }
        }

        if self.ranked.is_empty() {
            println!("{} No WAF detected.", "[!]".yellow());
        } else {
            println!("{} WAF Fingerprint:", "[~]".blue());
            for (waf, score) in &self.ranked {
                println!(
                    "    {} WAF: {} (Confidence: {}%)",
                    "[+]".green(),
                    waf,
                    score
                );
            }
        }
    }

    /// Write the plain-text report to a file in one write call.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.lines().join("\n");

        let mut file = File::create(path.as_ref())
            .context("Failed to create report file")?;
        file.write_all(content.as_bytes())
            .context("Failed to write report file")?;

        Ok(())
    }
}
