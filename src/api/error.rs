use thiserror::Error;

/// Response bodies embedded in errors are clipped to this many bytes.
const ERROR_BODY_CLIP: usize = 400;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unauthorized: credential rejected by the API")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited by the API")]
    RateLimited,

    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response ({status}): {body}")]
    Unexpected { status: u16, body: String },
}

impl ApiError {
    /// Map a non-success HTTP status and its body to an error variant.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = clip(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimited,
            status @ 500..=599 => ApiError::Server { status, body },
            status => ApiError::Unexpected { status, body },
        }
    }
}

fn clip(body: &str) -> String {
    if body.len() <= ERROR_BODY_CLIP {
        return body.to_string();
    }
    // Clip on a char boundary.
    let mut end = ERROR_BODY_CLIP;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "gone"),
            ApiError::NotFound(body) if body == "gone"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "oops"),
            ApiError::Server { status: 502, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn test_long_bodies_are_clipped() {
        let long = "x".repeat(5000);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &long) {
            ApiError::Server { body, .. } => {
                assert!(body.len() < 500);
                assert!(body.ends_with("(5000 bytes total)"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
