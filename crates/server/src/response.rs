use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::error;

/// JSON body indented with four spaces.
pub struct PrettyJson<T>(pub T);

pub fn to_pretty_vec<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match to_pretty_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"))],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "response serialization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_with_four_spaces() {
        let body = to_pretty_vec(&serde_json::json!({"error": "Invalid Id"})).expect("serialize");
        assert_eq!(String::from_utf8(body).expect("utf8"), "{\n    \"error\": \"Invalid Id\"\n}");
    }

    #[test]
    fn sets_json_content_type() {
        let res = PrettyJson(serde_json::json!([])).into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json; charset=utf-8")
        );
    }
}
