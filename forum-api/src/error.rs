use http::StatusCode;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Content is required")]
    ContentRequired,

    #[error("Content must be less than {max} characters (got {len})")]
    ContentTooLong { len: usize, max: usize },

    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be less than {max} characters (got {len})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Invalid vote value {0}")]
    InvalidVote(i64),

    #[error("{0}")]
    InvalidEmail(&'static str),

    #[error("{0}")]
    InvalidUsername(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// The server answers errors with a plain-text body, so only the status
    /// code carries the error kind.
    pub fn from_response(status: StatusCode, body: &str) -> Error {
        let body = body.trim();
        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthenticated,
            StatusCode::FORBIDDEN => Error::PermissionDenied,
            StatusCode::NOT_FOUND => Error::NotFound,
            StatusCode::BAD_REQUEST => Error::BadRequest(String::from(body)),
            _ => Error::Unknown(format!("{status}: {body}")),
        }
    }

    /// Whether the error came from input the client could have checked
    /// before sending anything
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ContentRequired
                | Error::ContentTooLong { .. }
                | Error::TitleRequired
                | Error::TitleTooLong { .. }
                | Error::NullByteInString(_)
                | Error::InvalidVote(_)
                | Error::InvalidEmail(_)
                | Error::InvalidUsername(_)
        )
    }
}
