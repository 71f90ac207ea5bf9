//! Request parameter extraction (query string and url-encoded form bodies).

use axum::extract::Request;

/// Ordered string parameters of a single request.
///
/// Mirrors servlet-style `getParameter`: query parameters come first, form
/// body parameters after them, and a lookup returns the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw (still percent-encoded) query string. Unparseable input yields no parameters.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::new();
        if let Some(q) = query {
            params.extend_urlencoded(q.as_bytes());
        }
        params
    }

    /// Build from the request URI query.
    #[must_use]
    pub fn from_request(req: &Request) -> Self {
        Self::from_query(req.uri().query())
    }

    /// Append `application/x-www-form-urlencoded` pairs after the existing ones.
    pub fn extend_urlencoded(&mut self, raw: &[u8]) {
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(raw) {
            Ok(pairs) => self.pairs.extend(pairs),
            Err(e) => tracing::debug!(error = %e, "Ignoring unparseable url-encoded parameters"),
        }
    }

    /// First value for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether the request carries an url-encoded form body.
#[must_use]
pub fn is_form_urlencoded(req: &Request) -> bool {
    req.headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|main| {
            main.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}
