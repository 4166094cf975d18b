use std::path::PathBuf;
use uuid::Uuid;

/// Longest response body kept in an error message.
const BODY_EXCERPT_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported request method '{0}'")]
    UnsupportedMethod(String),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from '{endpoint}': {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected result '{result}' from '{endpoint}': {body}")]
    UnexpectedResult {
        endpoint: String,
        result: String,
        body: String,
    },

    #[error("malformed response from '{endpoint}'")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("manga {0} has no romanized (ja-ro) title")]
    MissingMangaName(Uuid),

    #[error("invalid url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("io error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

/// Cuts a response body down to something that fits in a log line.
pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
