use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

/// Reply shape of the hello endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HelloResponse {
    pub message: String,
    pub status: String,
}

/// Anything that can resolve a name into a greeting. The TUI and the
/// classic prompt both work against this; tests substitute a stub.
pub trait GreetingSource {
    fn greet(&self, name: &str) -> Result<HelloResponse>;
}

/// Substitution rule for the query input: only a truly empty value falls
/// back to the default. Whitespace is a real name and passes through as-is.
pub fn name_or_default(raw: &str, fallback: &str) -> String {
    if raw.is_empty() {
        fallback.to_string()
    } else {
        raw.to_string()
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        // No overall request deadline; the blocking client would otherwise
        // impose its 30s default.
        let client = Client::builder()
            .timeout(None)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL with `name` percent-encoded as the single query parameter.
    pub fn hello_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?.join("/api/hello")?;
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }
}

impl GreetingSource for ApiClient {
    fn greet(&self, name: &str) -> Result<HelloResponse> {
        let url = self.hello_url(name)?;
        tracing::debug!(target: "api", "GET {}", url);

        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(anyhow!("server returned {}", response.status()));
        }

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_encoding() {
        let client = ApiClient::new("http://localhost:5000");
        for name in [
            "Alice",
            "a b c",
            "a&b=c",
            "fish & chips?",
            "100%",
            "héllo wörld",
            "a+b",
        ] {
            let url = client.hello_url(name).unwrap();
            let pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            assert_eq!(pairs.len(), 1, "one query parameter for {:?}", name);
            assert_eq!(pairs[0].0, "name");
            assert_eq!(pairs[0].1, name);
        }
    }

    #[test]
    fn url_targets_hello_endpoint() {
        let client = ApiClient::new("http://localhost:5000/");
        let url = client.hello_url("World").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.path(), "/api/hello");
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(name_or_default("", "World"), "World");
        assert_eq!(name_or_default("Alice", "World"), "Alice");
        // Whitespace counts as a value, not as empty.
        assert_eq!(name_or_default("  ", "World"), "  ");
    }

    #[test]
    fn response_parses_from_server_shape() {
        let json = r#"{"message": "Hello, Alice!", "status": "success"}"#;
        let parsed: HelloResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.message, "Hello, Alice!");
        assert_eq!(parsed.status, "success");
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(serde_json::from_str::<HelloResponse>("<html>oops</html>").is_err());
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let client = ApiClient::new("not a url");
        assert!(client.hello_url("World").is_err());
    }
}
