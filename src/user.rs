//! `users.lookupByEmail` request path and envelope decoding.

use crate::models::{User, null_as_default};
use crate::{Error, Result};
use serde::Deserialize;

/// Success/error wrapper around a user payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    ok: bool,
    #[serde(deserialize_with = "null_as_default")]
    error: String,
    #[serde(deserialize_with = "null_as_default")]
    user: User,
}

/// Path and query string for looking up `email`.
pub(crate) fn lookup_by_email_path(email: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("email", email)
        .finish();
    format!("users.lookupByEmail?{query}")
}

/// Decode the lookup envelope, turning `"ok": false` into [`Error::Remote`].
pub(crate) fn decode_user(body: &[u8]) -> Result<User> {
    let envelope: UserEnvelope = serde_json::from_slice(body).map_err(Error::Decode)?;

    if !envelope.ok {
        tracing::warn!(code = %envelope.error, "slack rejected user lookup");
        return Err(Error::Remote {
            code: envelope.error,
        });
    }

    Ok(envelope.user)
}
