// src/http.rs
//! HTTP fetch collaborator. Owns the client, performs the single request,
//! and projects the response into a `ResponseView` for the engine.

use crate::response::ResponseView;
use crate::utils::UserAgentRotator;
use anyhow::{Context, Result};
use log::debug;
use rand::Rng;
use rquest::header::{self, HeaderMap, SET_COOKIE};
use rquest::{Client, Proxy};
use rquest_util::Emulation;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};

pub struct Fetcher {
    client: Client,
    ua_rotator: UserAgentRotator,
}

impl Fetcher {
    pub fn new(proxy: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let profile = {
            let mut rng = rand::thread_rng();
            match rng.gen_range(0..4) {
                0 => Emulation::Chrome126,
                1 => Emulation::Safari15_5,
                2 => Emulation::Firefox117,
                _ => Emulation::OkHttp4_10,
            }
        };

        let mut builder = Client::builder()
            .emulation(profile)
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(timeout_secs));

        if let Some(proxy_url) = proxy {
            let proxy = Proxy::all(proxy_url)
                .with_context(|| format!("Invalid proxy URL: {}", proxy_url))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Fetcher {
            client,
            ua_rotator: UserAgentRotator::new(),
        })
    }

    /// Fetch the target once and project the response for analysis.
    pub async fn fetch(&self, url: &str) -> Result<ResponseView> {
        let ua = self.ua_rotator.get_random();
        debug!("Fetching {} as {}", url, ua);

        let start = Instant::now();
        let resp = self
            .client
            .get(url)
            .header(header::USER_AGENT, &ua)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .text()
            .await
            .context("Failed to read response body")?;
        let elapsed = start.elapsed();

        debug!("Got {} in {:?} ({} bytes)", status, elapsed, body.len());

        let scripts = extract_scripts(&body);

        Ok(ResponseView {
            headers: flatten_headers(&headers),
            cookies: cookie_dump(&headers),
            body,
            elapsed,
            scripts,
        })
    }
}

fn flatten_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or("").to_string(),
            )
        })
        .collect()
}

fn cookie_dump(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Inline text of every script block in the document.
pub fn extract_scripts(html: &str) -> Vec<String> {
    let mut scripts = Vec::new();

    let document = Html::parse_document(html);
    if let Ok(selector) = Selector::parse("script") {
        for element in document.select(&selector) {
            let text: String = element.text().collect();
            if !text.trim().is_empty() {
                scripts.push(text);
            }
        }
    }

    scripts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_scripts_inline_text() {
        let html = r#"
            <html><body>
                <script>var challenge = solve();</script>
                <script src="/app.js"></script>
                <script>   </script>
                <p>not a script</p>
            </body></html>
        "#;

        let scripts = extract_scripts(html);
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("var challenge"));
    }

    #[test]
    fn test_extract_scripts_empty_document() {
        assert!(extract_scripts("<html><body></body></html>").is_empty());
    }
}
