//! Deny response writer.

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

/// Value of the `code` field in every deny body.
pub const DENY_CODE: i32 = 0;

const DENY_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Render the deny body: `{\n"code": 0,\n"msg": "<message>"\n}`.
///
/// The message is JSON-escaped, so any configured text yields a valid document.
#[must_use]
pub fn deny_body(message: &str) -> String {
    // serde_json cannot fail on a plain &str
    let msg = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_owned());
    format!("{{\n\"code\": {DENY_CODE},\n\"msg\": {msg}\n}}")
}

/// Build the complete deny response. Nothing else is written to the
/// response after this; the caller must not invoke the handler.
#[must_use]
pub fn deny_response(message: &str, status: StatusCode) -> Response {
    let mut response = Response::new(Body::from(deny_body(message)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(DENY_CONTENT_TYPE),
    );
    response
}
