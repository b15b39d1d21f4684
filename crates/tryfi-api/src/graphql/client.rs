// GraphQL HTTP client
//
// Wraps `reqwest::blocking::Client` with TryFi URL construction, session
// tracking, and response envelope handling. Login lives in `auth.rs` and
// the `Transport` impl in `endpoints.rs`; this module only deals with
// transport mechanics.

use std::sync::{PoisonError, RwLock};

use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{LoginSession, TransportConfig};

const GRAPHQL_PATH: &str = "graphql";

/// Blocking client for the TryFi GraphQL backend.
///
/// Queries go out as GET with `query`/`variables` URL parameters,
/// mutations as POST with a JSON body. Every method returns the
/// `data` payload (or a sub-path of it); the envelope never reaches
/// the caller.
pub struct GraphqlClient {
    http: reqwest::blocking::Client,
    base_url: Url,
    session: RwLock<Option<LoginSession>>,
}

impl GraphqlClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::with_client(http, config.api_host.clone()))
    }

    /// Create a client around a pre-built `reqwest` client.
    ///
    /// The client must keep cookies, otherwise the session established by
    /// `login` is lost between calls.
    pub fn with_client(http: reqwest::blocking::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: RwLock::new(None),
        }
    }

    /// The backend root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The identity from the last successful login, if any.
    pub fn session(&self) -> Option<LoginSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn store_session(&self, session: LoginSession) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{path}`, tolerant of a trailing slash on the base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn require_session(&self) -> Result<(), Error> {
        if self.session().is_some() {
            Ok(())
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Run a read-only query. Returns the `data` object.
    pub(crate) fn query(&self, document: &str, variables: Option<&Value>) -> Result<Value, Error> {
        self.require_session()?;
        let url = self.url(GRAPHQL_PATH)?;
        debug!("GET {}", url);

        let mut params: Vec<(&str, String)> = vec![("query", document.to_owned())];
        if let Some(vars) = variables {
            params.push(("variables", vars.to_string()));
        }

        let resp = self
            .http
            .get(url)
            .query(&params)
            .send()
            .map_err(Error::Transport)?;

        parse_envelope(resp)
    }

    /// Run a mutation. Returns the `data` object.
    pub(crate) fn mutate(&self, document: &str, variables: &Value) -> Result<Value, Error> {
        self.require_session()?;
        let url = self.url(GRAPHQL_PATH)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .map_err(Error::Transport)?;

        parse_envelope(resp)
    }
}

/// Check HTTP status, decode the body, surface GraphQL `errors`, and
/// return the `data` member.
fn parse_envelope(resp: reqwest::blocking::Response) -> Result<Value, Error> {
    let resp = resp.error_for_status().map_err(Error::Transport)?;
    let body = resp.text().map_err(Error::Transport)?;

    let mut envelope: Value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.clone(),
    })?;

    if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map_or_else(|| e.to_string(), str::to_owned)
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Graphql { message });
        }
    }

    match envelope.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => Err(Error::MissingData {
            path: "data".into(),
        }),
        Some(data) => Ok(data),
    }
}

/// Walk `keys` into `value`, taking ownership of the leaf.
///
/// A missing or `null` segment yields `Error::MissingData` naming the
/// full dotted path from `data`.
pub(crate) fn take_path(mut value: Value, keys: &[&str]) -> Result<Value, Error> {
    for key in keys {
        value = match value.get_mut(*key).map(Value::take) {
            Some(Value::Null) | None => {
                return Err(Error::MissingData {
                    path: format!("data.{}", keys.join(".")),
                });
            }
            Some(next) => next,
        };
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn take_path_walks_nested_objects() {
        let data = json!({ "pet": { "ongoingActivity": { "__typename": "OngoingRest" } } });
        let leaf = take_path(data, &["pet", "ongoingActivity"]).unwrap();
        assert_eq!(leaf["__typename"], "OngoingRest");
    }

    #[test]
    fn take_path_reports_full_path_on_null() {
        let data = json!({ "pet": null });
        let err = take_path(data, &["pet", "device"]).unwrap_err();
        assert_eq!(err.to_string(), "Response is missing data.pet.device");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = GraphqlClient::with_client(
            reqwest::blocking::Client::new(),
            Url::parse("https://api.tryfi.com/").unwrap(),
        );
        assert_eq!(
            client.url("graphql").unwrap().as_str(),
            "https://api.tryfi.com/graphql"
        );
    }

    #[test]
    fn queries_require_login() {
        let client = GraphqlClient::with_client(
            reqwest::blocking::Client::new(),
            Url::parse("https://api.tryfi.com").unwrap(),
        );
        let err = client.query("query { currentUser { id } }", None).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }
}
