use std::time::Duration;

/// Read-only projection of one HTTP response, as consumed by the detection
/// engine. Built by the fetch layer; the engine never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ResponseView {
    /// Header name/value pairs in wire order.
    pub headers: Vec<(String, String)>,
    /// Raw body text.
    pub body: String,
    /// Flattened Set-Cookie text.
    pub cookies: String,
    /// Wall time the request took.
    pub elapsed: Duration,
    /// Inline text of every script block in the body.
    pub scripts: Vec<String>,
}

impl ResponseView {
    /// Flatten the headers into one scannable text block.
    pub fn header_dump(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
