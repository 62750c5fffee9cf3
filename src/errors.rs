use reqwest::header::HeaderMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Server answered with a non-success status
    #[error("HTTP {status} {reason} while fetching {url}")]
    Http {
        url: String,
        status: u16,
        reason: String,
        headers: HeaderMap,
    },
    /// Request could not be sent or the body could not be read
    #[error("Network error while fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// FTP session failed
    #[error("FTP error while fetching {url}: {message}")]
    Ftp { url: String, message: String },
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),
    /// Bytes are not valid in the requested encoding
    #[error("Content is not valid {encoding}")]
    Decode { encoding: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Corrupt or unreadable ZIP data
    #[error("ZIP archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Member '{0}' not found in archive")]
    MemberNotFound(String),
    #[error("Archive has no entries")]
    EmptyArchive,
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    /// Fixed-width line does not fit its layout
    #[error("Fixed-width parse error at line {line}: {message}")]
    Fwf { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before or while talking to the remote end.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Http { .. }
                | AppError::Transport { .. }
                | AppError::Ftp { .. }
                | AppError::InvalidUrl(_)
                | AppError::UnsupportedScheme { .. }
        )
    }
}

// Custom type alias for Results in this crate
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    #[test]
    fn test_http_error_display() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        let err = AppError::Http {
            url: "http://localhost/missing".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
            headers,
        };

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));
        assert!(msg.contains("http://localhost/missing"));
        assert_eq!(err.status(), Some(404));
        assert!(err.is_transport());
    }

    #[test]
    fn test_decode_error_display() {
        let err = AppError::Decode {
            encoding: "UTF-8".to_string(),
        };
        assert!(err.to_string().contains("not valid UTF-8"));
        assert_eq!(err.status(), None);
        assert!(!err.is_transport());
    }

    #[test]
    fn test_fwf_error_display() {
        let err = AppError::Fwf {
            line: 3,
            message: "too short".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_url_error_from_parse_error() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_app_error_implements_error_trait() {
        use std::error::Error;
        let err: Box<dyn Error> = Box::new(AppError::EmptyArchive);
        assert!(!err.to_string().is_empty());
    }
}
