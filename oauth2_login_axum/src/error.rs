use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use http::header::InvalidHeaderValue;
use oauth2_login::CoordinationError;

#[derive(Template)]
#[template(path = "error.j2", escape = "html")]
struct ErrorTemplate<'a> {
    title: &'a str,
    message: &'a str,
    hint: Option<&'a str>,
}

/// HTML error page returned by failing handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorPage {
    /// An error page without a remediation hint.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            hint: None,
        }
    }

    fn title(&self) -> &'static str {
        if self.status.is_client_error() {
            "Sign-in failed"
        } else {
            "Something went wrong"
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let template = ErrorTemplate {
            title: self.title(),
            message: &self.message,
            hint: self.hint.as_deref(),
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (self.status, self.message).into_response()
            }
        }
    }
}

/// Helper trait for converting errors to an [`ErrorPage`]
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorPage>;
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ErrorPage> {
        self.map_err(|e| {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            ErrorPage {
                status,
                message: e.to_string(),
                hint: e.hint().map(str::to_string),
            }
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, ErrorPage> {
        self.map_err(|e| ErrorPage::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

impl<T> IntoResponseError<T> for Result<T, InvalidHeaderValue> {
    fn into_response_error(self) -> Result<T, ErrorPage> {
        self.map_err(|e| ErrorPage::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
