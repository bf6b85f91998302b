use std::path::PathBuf;

use crate::error::*;

/// Where the sandbox page HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    Clipboard,
    File(PathBuf),
}

impl HtmlSource {
    /// A given file path wins over the clipboard.
    pub fn from_path(html_path: Option<PathBuf>) -> Self {
        match html_path {
            Some(path) => HtmlSource::File(path),
            None => HtmlSource::Clipboard,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            HtmlSource::File(path) => Ok(fsutil::read_to_string(path)?),
            HtmlSource::Clipboard => {
                let mut clipboard =
                    arboard::Clipboard::new().map_err(|e| anyhow!("Failed to open clipboard: {}", e))?;
                clipboard
                    .get_text()
                    .map_err(|e| anyhow!("Failed to read clipboard: {}", e))
            }
        }
    }
}
