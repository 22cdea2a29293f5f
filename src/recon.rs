// src/recon.rs
//! Passive target reconnaissance: DNS resolution, server banner headers,
//! and HTML meta information. Everything here is best-effort and degrades
//! to "N/A" instead of failing the scan.

use crate::response::ResponseView;
use log::{info, warn};
use scraper::{Html, Selector};
use tokio::net::lookup_host;
use url::Url;

const NOT_AVAILABLE: &str = "N/A";

/// Supplementary information about the target site.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub url: String,
    pub ip_address: String,
    pub server: String,
    pub x_powered_by: String,
    /// (label, value) pairs scraped from the HTML head.
    pub meta: Vec<(String, String)>,
}

impl SiteInfo {
    pub async fn gather(target: &Url, response: &ResponseView) -> Self {
        let ip_address = resolve_ip(target).await;

        let server = response
            .header("server")
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        let x_powered_by = response
            .header("x-powered-by")
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        SiteInfo {
            url: target.to_string(),
            ip_address,
            server,
            x_powered_by,
            meta: extract_meta_info(&response.body),
        }
    }
}

/// Resolve the target host to an IP address. Non-fatal on failure.
async fn resolve_ip(target: &Url) -> String {
    let host = match target.host_str() {
        Some(h) => h,
        None => return NOT_AVAILABLE.to_string(),
    };
    let port = target.port_or_known_default().unwrap_or(80);

    match lookup_host((host, port)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => {
                let ip = addr.ip().to_string();
                info!("Resolved {} to {}", host, ip);
                ip
            }
            None => NOT_AVAILABLE.to_string(),
        },
        Err(e) => {
            warn!("Failed to resolve {}: {}", host, e);
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Scrape title, description, and keywords from the HTML head.
pub fn extract_meta_info(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .filter(|t| !t.is_empty());

    vec![
        (
            "Title".to_string(),
            title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (
            "Meta Description".to_string(),
            meta_content(&document, "description"),
        ),
        (
            "Meta Keywords".to_string(),
            meta_content(&document, "keywords"),
        ),
    ]
}

fn meta_content(document: &Html, name: &str) -> String {
    let selector_str = format!("meta[name='{}']", name);
    if let Ok(selector) = Selector::parse(&selector_str) {
        if let Some(el) = document.select(&selector).next() {
            if let Some(content) = el.value().attr("content") {
                return content.to_string();
            }
        }
    }
    NOT_AVAILABLE.to_string()
}
