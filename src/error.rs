//! Defines the app level error type and its conversion to HTML alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::alert::Alert;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The category value is not one of the known categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The base URL of the price table could not be parsed.
    #[error("invalid price table URL: {0}")]
    InvalidTableUrl(String),

    /// The API key for the price table cannot be sent as an HTTP header.
    #[error("the price table API key contains characters that are not allowed in a header")]
    InvalidApiKey,

    /// The HTTP client for the price table could not be created.
    #[error("could not create the HTTP client: {0}")]
    HttpClient(String),

    /// The request to the price table could not be sent or did not complete.
    ///
    /// The string holds the underlying transport error and should only be
    /// logged, it is not meant for the client.
    #[error("could not reach the price table: {0}")]
    LookupRequest(String),

    /// The price table answered with a non-success status code.
    #[error("the price table responded with status {0}: {1}")]
    LookupStatus(u16, String),

    /// The response body from the price table could not be parsed.
    #[error("could not parse the price table response: {0}")]
    LookupResponse(String),

    /// More than one price row matched a location and item.
    ///
    /// A lookup expects at most one row, so this is treated as a failed
    /// query rather than picking one of the rows.
    #[error("expected at most one price row, got {0}")]
    DuplicatePriceRows(usize),

    /// A lookup for the same form is still waiting on the price table.
    #[error("a price check for this form is already in progress")]
    LookupPending,
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Handlers return this for [Error::LookupPending] and
    /// [Error::InvalidCategory]. Failed lookups are shown inside the price
    /// check form instead, and configuration errors stop the server before it
    /// starts, so the remaining variants only get a generic 500 alert that
    /// keeps their details out of the page.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::LookupPending => (
                StatusCode::CONFLICT,
                Alert::Info {
                    message: "Price check in progress".to_owned(),
                    details: "Wait for the current price check to finish before \
                        submitting again."
                        .to_owned(),
                },
            ),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: format!("\"{category}\" is not a category, please select one."),
                },
            ),
            Error::InvalidTableUrl(_)
            | Error::InvalidApiKey
            | Error::HttpClient(_)
            | Error::LookupRequest(_)
            | Error::LookupStatus(..)
            | Error::LookupResponse(_)
            | Error::DuplicatePriceRows(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
