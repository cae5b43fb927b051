//! URL path and query string handling

use smallvec::SmallVec;

/// Ordered query parameters; keys are unique after `set`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: SmallVec<[(String, String); 2]>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=two`, with or without a leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((key, value)) => (decode(key), decode(value)),
                None => (decode(part), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing any existing values
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encoded form without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// A same-origin URL split into path and query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: QueryParams,
}

impl Location {
    /// Parse `/path?query#hash`; the fragment is discarded
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            query: QueryParams::parse(query),
        }
    }

    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = QueryParams::parse("?bigText=Hello+World&x=%26%3D&flag");
        assert_eq!(params.get("bigText"), Some("Hello World"));
        assert_eq!(params.get("x"), Some("&="));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_set_replaces() {
        let mut params = QueryParams::parse("a=1&a=2");
        params.set("a", "3");
        assert_eq!(params.to_query_string(), "a=3");
    }

    #[test]
    fn test_unicode_survives_query_string() {
        let text = "Grüße 👋 a+b=c & <p>";
        let params = QueryParams::new().with("bigText", text);
        let parsed = QueryParams::parse(&params.to_query_string());
        assert_eq!(parsed.get("bigText"), Some(text));
    }

    #[test]
    fn test_malformed_escape_kept_verbatim() {
        let params = QueryParams::parse("q=%E0%A4%A");
        assert_eq!(params.get("q"), Some("%E0%A4%A"));
    }

    #[test]
    fn test_location_parse() {
        let loc = Location::parse("/big-text-now/show?bigText=hi#top");
        assert_eq!(loc.path, "/big-text-now/show");
        assert_eq!(loc.query.get("bigText"), Some("hi"));
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?redirect=/show").path, "/");
    }
}
