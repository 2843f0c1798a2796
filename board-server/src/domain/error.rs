use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum BoardError {
    #[error("Post does not exist")]
    PostNotFound,

    #[error("unexpected storage error: {0}")]
    Unexpected(String),
}

impl BoardError {
    pub(crate) fn status_code(&self) -> u16 {
        match self {
            BoardError::PostNotFound => 404,
            BoardError::Unexpected(_) => 500,
        }
    }
}
