//! Where the two content collections come from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use super::ContentKind;
use crate::error::ContentError;

/// A directory holding `prayers.json` and `predictions.json`, or an HTTP(S)
/// base URL serving the same two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Dir(PathBuf),
    Http(Url),
}

impl ContentSource {
    /// Fetch the raw JSON for one collection.
    ///
    /// # Errors
    /// Returns [`ContentError::LoadFailed`] when the file cannot be read or
    /// the server does not answer with a success status.
    pub async fn fetch(&self, kind: ContentKind) -> Result<String, ContentError> {
        let failed = |message: String| ContentError::LoadFailed {
            kind,
            origin: self.to_string(),
            message,
        };

        match self {
            ContentSource::Dir(dir) => tokio::fs::read_to_string(dir.join(kind.file_name()))
                .await
                .map_err(|e| failed(e.to_string())),
            ContentSource::Http(base) => {
                let url = base
                    .join(kind.file_name())
                    .map_err(|e| failed(e.to_string()))?;
                let response = reqwest::Client::new()
                    .get(url)
                    .header(reqwest::header::CACHE_CONTROL, "no-store")
                    .send()
                    .await
                    .map_err(|e| failed(e.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(failed(format!("HTTP {}", status.as_u16())));
                }
                response.text().await.map_err(|e| failed(e.to_string()))
            }
        }
    }
}

impl FromStr for ContentSource {
    type Err = url::ParseError;

    /// `http://` and `https://` values become URLs (with a trailing slash so
    /// file names join under them); anything else is a directory path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let mut url = Url::parse(s)?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(ContentSource::Http(url))
        } else {
            Ok(ContentSource::Dir(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Dir(dir) => write!(f, "{}", dir.display()),
            ContentSource::Http(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_paths() {
        let http: ContentSource = "https://example.org/data".parse().unwrap();
        assert_eq!(
            http,
            ContentSource::Http(Url::parse("https://example.org/data/").unwrap())
        );

        let dir: ContentSource = "./content".parse().unwrap();
        assert_eq!(dir, ContentSource::Dir(PathBuf::from("./content")));
    }

    #[test]
    fn url_base_joins_file_names() {
        let ContentSource::Http(base) = "http://localhost:8080/data".parse().unwrap() else {
            panic!("expected an HTTP source");
        };
        let joined = base.join(ContentKind::Prayers.file_name()).unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8080/data/prayers.json");
    }
}
