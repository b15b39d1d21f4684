// Session login
//
// The backend authenticates with a form POST to `/auth/login`. A
// successful response carries `userId` and `sessionId` and sets the
// session cookie used by every later GraphQL call.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::graphql::client::GraphqlClient;
use crate::transport::LoginSession;

const LOGIN_PATH: &str = "auth/login";

impl GraphqlClient {
    /// Authenticate and remember the session.
    ///
    /// HTTP failures surface as `Error::Transport`; an `error` member in
    /// an otherwise successful body becomes `Error::Login`.
    pub fn login(&self, email: &str, password: &SecretString) -> Result<LoginSession, Error> {
        let url = self.url(LOGIN_PATH)?;
        debug!("POST {} (email={})", url, email);

        let form = [("email", email), ("password", password.expose_secret())];
        let resp = self
            .http()
            .post(url)
            .form(&form)
            .send()
            .map_err(Error::Transport)?;

        let resp = resp.error_for_status().map_err(Error::Transport)?;
        let body = resp.text().map_err(Error::Transport)?;
        let parsed: Option<Value> = serde_json::from_str(&body).ok();

        if let Some(error) = parsed.as_ref().and_then(|v| v.get("error")) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), str::to_owned);
            return Err(Error::Login { message });
        }

        let Some(parsed) = parsed else {
            return Err(Error::Deserialization {
                message: "login response is not JSON".into(),
                body,
            });
        };

        let session = match (id_field(&parsed, "userId"), id_field(&parsed, "sessionId")) {
            (Some(user_id), Some(session_id)) => LoginSession {
                user_id,
                session_id,
            },
            _ => {
                return Err(Error::Deserialization {
                    message: "login response lacks userId or sessionId".into(),
                    body,
                });
            }
        };

        debug!("login succeeded for user {}", session.user_id);
        self.store_session(session.clone());
        Ok(session)
    }
}

/// Identifiers arrive as strings, occasionally as numbers.
fn id_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
