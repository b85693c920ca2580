use std::sync::Arc;

use url::Url;

use crate::error::HttpError;

/// One probed endpoint, validated once at startup.
#[derive(Debug, Clone)]
pub struct Target {
    /// URL as given by the user; used as the per-target report key.
    pub label: Arc<str>,
    pub url: Url,
}

/// Parses every target URL up front so dispatch never builds an invalid request.
///
/// # Errors
///
/// Returns an error for an empty list, an unparsable URL or a non-HTTP scheme.
pub fn parse_targets(urls: &[String]) -> Result<Vec<Target>, HttpError> {
    if urls.is_empty() {
        return Err(HttpError::UrlListEmpty);
    }
    urls.iter()
        .map(|raw| {
            let url = Url::parse(raw).map_err(|err| HttpError::InvalidUrl {
                url: raw.clone(),
                source: err,
            })?;
            match url.scheme() {
                "http" | "https" => Ok(Target {
                    label: Arc::from(raw.as_str()),
                    url,
                }),
                scheme => Err(HttpError::UnsupportedScheme {
                    url: raw.clone(),
                    scheme: scheme.to_owned(),
                }),
            }
        })
        .collect()
}
