use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Unexpected response code '{got}' (expected '{expected}') while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        expected: StatusCode,
        requested_url: String,
    },

    #[error("No access token issued for tenant '{tenant}': {description}")]
    NoAccessToken { tenant: String, description: String },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
