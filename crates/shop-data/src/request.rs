//! Outbound request description.
//!
//! A [`RequestBuilder`] is plain data: the [`Transport`](crate::Transport)
//! decides how it reaches the wire, so tests can inspect it directly.

use std::collections::HashMap;

/// Request verbs the storefront issues. The catalog is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Set a header, replacing any earlier value under the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    pub(crate) fn headers(self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        headers
            .into_iter()
            .fold(self, |req, (name, value)| req.header(name, value))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Fully resolved URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header that will be sent, looked up without regard to case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_merge_in_order() {
        let req = RequestBuilder::new(Method::Get, "https://catalog.test").headers([
            ("Accept".to_string(), "text/html".to_string()),
            ("X-Trace".to_string(), "1".to_string()),
            ("accept".to_string(), "application/json".to_string()),
        ]);

        assert_eq!(req.method().as_str(), "GET");
        assert_eq!(req.header_value("Accept"), Some("application/json"));
        assert_eq!(req.header_value("x-trace"), Some("1"));
    }

    #[test]
    fn test_header_replaces_case_insensitively() {
        let req = RequestBuilder::new(Method::Get, "https://catalog.test")
            .header("accept", "text/html")
            .header("Accept", "application/json");

        assert_eq!(req.header_value("ACCEPT"), Some("application/json"));
        assert_eq!(req.headers.len(), 1);
    }
}
