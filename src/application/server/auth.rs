//! Write access check.
//!
//! A request may write when its query string carries `auth=<token>`. This is
//! a stand-in for local and demo use, not access control.

use axum::http::Uri;

pub const AUTH_PARAM: &str = "auth";

/// True iff the first `auth` query parameter equals `expected`.
pub fn is_authenticated(uri: &Uri, expected: &str) -> bool {
    let Some(query) = uri.query() else {
        return false;
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == AUTH_PARAM)
        .is_some_and(|(_, value)| value == expected)
}
