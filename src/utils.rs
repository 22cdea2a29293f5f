use rand::seq::SliceRandom;
use url::Url;

pub struct UserAgentRotator {
    agents: Vec<String>,
}

impl UserAgentRotator {
    pub fn new() -> Self {
        UserAgentRotator {
            agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:89.0) Gecko/20100101 Firefox/89.0".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0".to_string(),
            ]
        }
    }

    #[allow(dead_code)]
    pub fn from_list(list: Vec<String>) -> Self {
        UserAgentRotator { agents: list }
    }

    pub fn get_random(&self) -> String {
        let mut rng = rand::thread_rng();
        self.agents.choose(&mut rng).cloned().unwrap_or_else(|| "WafHunter/1.0".to_string())
    }
}

impl Default for UserAgentRotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a target URL. Requires a scheme and a host.
pub fn validate_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|u| u.has_host() && matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_some());
        assert!(validate_url("https://example.com/path?q=1").is_some());
    }

    #[test]
    fn test_validate_url_rejects_garbage() {
        assert!(validate_url("example.com").is_none());
        assert!(validate_url("ftp://example.com").is_none());
        assert!(validate_url("not a url").is_none());
        assert!(validate_url("").is_none());
    }

    #[test]
    fn test_rotator_returns_known_agent() {
        let rotator = UserAgentRotator::new();
        let ua = rotator.get_random();
        assert!(ua.starts_with("Mozilla/5.0"));
    }
}
