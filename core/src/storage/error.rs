use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not logged in: no sandbox credential at '{}' (run `bear ps create-cred` first)", .0.to_string_lossy())]
    NotLoggedIn(PathBuf),

    #[error("Malformed sandbox credential {0:?}: {1}")]
    Malformed(PathBuf, #[source] serde_json::Error),

    #[error("Failed to get user's config dir path")]
    NoConfigDir,

    #[error(transparent)]
    Fs(#[from] fsutil::Error),
}

impl Error {
    pub fn is_not_logged_in(&self) -> bool {
        matches!(self, Error::NotLoggedIn(_))
    }
}
