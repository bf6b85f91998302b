//! Replacing a stale sandbox resource group name in infrastructure code.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use ::lazy_regex::{lazy_regex, BytesRegex, Lazy};
use bear_sandbox::{Provider, SandboxCredential as _};

use crate::storage::{self, SandboxStore};

/// e.g. `1-8f3c2a-playground-sandbox`
///
/// Matches raw bytes, so files that are not valid UTF-8 are still searched.
pub static RE_LEGACY_RESOURCE_GROUP: Lazy<BytesRegex> =
    lazy_regex!(r"(?-u)\b\d+-[a-z0-9-]+-playground-sandbox\b"B);

/// Only files with these extensions are touched while walking a dir.
pub const REWRITABLE_EXTENSIONS: [&str; 4] = [".tf", ".tfvars", ".txt", ".sh"];

pub const TERRAFORM_STATE_FILENAMES: [&str; 2] = ["terraform.tfstate", "terraform.tfstate.backup"];

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not authenticated: {0}")]
    NotAuthenticated(#[source] storage::Error),

    #[error("The stored {0} sandbox credential has no resource group")]
    MissingResourceGroup(Provider),

    #[error(transparent)]
    Storage(storage::Error),

    #[error(transparent)]
    Fs(#[from] fsutil::Error),
}

/// Byte range of a resource group token within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Locates the first legacy resource group token in `content`.
pub fn locate_legacy_resource_group(content: impl AsRef<[u8]>) -> Option<MatchSpan> {
    RE_LEGACY_RESOURCE_GROUP.find(content.as_ref()).map(|m| MatchSpan {
        start: m.start(),
        end: m.end(),
    })
}

/// ```
/// use bear_core::rewrite::detect_legacy_resource_group;
///
/// let tf = r#"resource_group_name = "42-foo-bar-playground-sandbox""#;
/// assert_eq!(detect_legacy_resource_group(tf), Some("42-foo-bar-playground-sandbox"));
/// assert_eq!(detect_legacy_resource_group("rg-prod"), None);
/// ```
pub fn detect_legacy_resource_group(content: &str) -> Option<&str> {
    locate_legacy_resource_group(content).map(|span| span.as_str(content))
}

/// Returns true if a dir walk should try to rewrite `path`.
///
/// ```
/// use bear_core::rewrite::is_rewritable;
///
/// assert!(is_rewritable("infra/main.tf"));
/// assert!(is_rewritable("infra/prod.tfvars"));
/// assert!(is_rewritable("scripts/deploy.sh"));
/// assert!(!is_rewritable("README.md"));
/// assert!(!is_rewritable("main.TF"));
/// ```
pub fn is_rewritable(path: impl AsRef<Path>) -> bool {
    let ext = fsutil::dotted_extension(path);
    REWRITABLE_EXTENSIONS.contains(&ext.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'a> {
    pub content: Cow<'a, [u8]>,
    /// The stale token that was replaced, if any.
    pub replaced: Option<String>,
}

impl<'a> Rewrite<'a> {
    pub fn changed(&self) -> bool {
        self.replaced.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Files that were actually rewritten, in walk order.
    pub rewritten: Vec<PathBuf>,
    pub scanned: usize,
}

/// Replaces stale resource group names with the current sandbox's.
#[derive(Debug, Clone)]
pub struct ResourceGroupRewriter {
    resource_group: String,
}

impl ResourceGroupRewriter {
    pub fn new(resource_group: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
        }
    }

    /// Loads the current resource group once from the stored sandbox credential.
    pub fn from_store(store: &SandboxStore) -> Result<Self> {
        let record = store.load().map_err(|e| match e {
            e if e.is_not_logged_in() => Error::NotAuthenticated(e),
            e => Error::Storage(e),
        })?;
        match record.as_azure() {
            Some(c) if !c.resource_group.is_empty() => Ok(Self::new(&c.resource_group)),
            _ => Err(Error::MissingResourceGroup(record.provider())),
        }
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    /// First legacy token in `content` that differs from the current resource group.
    pub fn find_stale<'c>(&self, content: &'c [u8]) -> Option<&'c [u8]> {
        RE_LEGACY_RESOURCE_GROUP
            .find_iter(content)
            .map(|m| m.as_bytes())
            .find(|&token| token != self.resource_group.as_bytes())
    }

    /// Replaces every word-bounded occurrence of the first stale token.
    /// Other tokens, including longer ones containing it, are left alone.
    /// Bytes outside the replaced tokens are copied as they are.
    pub fn rewrite_content<'c>(&self, content: &'c [u8]) -> Rewrite<'c> {
        let Some(stale) = self.find_stale(content) else {
            return Rewrite {
                content: Cow::Borrowed(content),
                replaced: None,
            };
        };

        let mut updated = Vec::with_capacity(content.len());
        let mut last = 0;
        for m in RE_LEGACY_RESOURCE_GROUP.find_iter(content) {
            if m.as_bytes() != stale {
                continue;
            }
            updated.extend_from_slice(&content[last..m.start()]);
            updated.extend_from_slice(self.resource_group.as_bytes());
            last = m.end();
        }
        updated.extend_from_slice(&content[last..]);

        Rewrite {
            content: Cow::Owned(updated),
            replaced: Some(String::from_utf8_lossy(stale).into_owned()),
        }
    }

    /// Rewrites one file in place. Files without a stale token are not written.
    pub fn rewrite_file(&self, filepath: impl AsRef<Path>) -> Result<bool> {
        let filepath = filepath.as_ref();
        let content = fsutil::read(filepath)?;

        let rewrite = self.rewrite_content(&content);
        let Some(stale) = &rewrite.replaced else {
            return Ok(false)
        };

        fsutil::write(filepath, &rewrite.content)?;
        log::info!(
            "Replaced '{}' with '{}' in {:?}",
            stale,
            self.resource_group,
            filepath
        );
        Ok(true)
    }

    /// Rewrites `root` if it is a file, or every rewritable file below it if it is a dir.
    /// The first failure aborts the walk.
    pub fn rewrite_path(&self, root: impl AsRef<Path>) -> Result<RewriteReport> {
        let root = root.as_ref();
        let mut report = RewriteReport::default();

        if !fsutil::metadata(root)?.is_dir() {
            report.scanned = 1;
            if self.rewrite_file(root)? {
                report.rewritten.push(root.to_owned());
            }
            return Ok(report);
        }

        for file in fsutil::walk_files(root)? {
            if !self::is_rewritable(&file) {
                log::trace!("Skipping {:?}", file);
                continue;
            }
            report.scanned += 1;
            if self.rewrite_file(&file)? {
                report.rewritten.push(file);
            }
        }
        Ok(report)
    }
}

/// Removes every `terraform.tfstate` and `terraform.tfstate.backup` below `root`.
/// Returns the removed files; files that vanished meanwhile are not an error.
pub fn remove_terraform_state_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for file in fsutil::walk_files(root)? {
        let is_state_file = file
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| TERRAFORM_STATE_FILENAMES.contains(&name));
        if !is_state_file {
            continue;
        }
        if fsutil::remove_file_if_exists(&file)? {
            log::info!("Removed {:?}", file);
            removed.push(file);
        }
    }
    Ok(removed)
}
