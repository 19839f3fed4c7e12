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

    #[error("Invalid {kind} id '{id}'")]
    InvalidId { kind: &'static str, id: String },

    #[error("Unexpected response code '{got}' (expected '{expected}') while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        expected: StatusCode,
        requested_url: String,
    },

    #[error("No such html element (selector: {0:?})")]
    NoSuchElementMatchesToSelector(&'static str),

    #[error("Element has no inner text (selector: {0:?})")]
    NoInnerText(&'static str),

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
}
