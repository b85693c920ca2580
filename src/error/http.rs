use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("URL list was empty.")]
    UrlListEmpty,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Invalid user agent '{value}': {source}")]
    InvalidUserAgent {
        value: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
