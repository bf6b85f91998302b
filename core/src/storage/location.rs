use std::path::{Path, PathBuf};

use super::error::*;

pub const APP_NAME: &str = "bear";

/// Where the sandbox credential file lives.
pub trait StoreLocation {
    fn credential_file(&self) -> Result<PathBuf>;
}

/// `<user config dir>/bear/ps/sandbox_cred.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct UserConfigDir;

impl UserConfigDir {
    pub const CREDENTIAL_FILENAME: &str = "sandbox_cred.json";

    pub fn app_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(dir.join(APP_NAME))
    }
}

impl StoreLocation for UserConfigDir {
    fn credential_file(&self) -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("ps").join(Self::CREDENTIAL_FILENAME))
    }
}

impl StoreLocation for Path {
    fn credential_file(&self) -> Result<PathBuf> {
        Ok(self.to_owned())
    }
}

impl StoreLocation for PathBuf {
    fn credential_file(&self) -> Result<PathBuf> {
        Ok(self.clone())
    }
}
