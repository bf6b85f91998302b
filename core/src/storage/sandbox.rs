use std::path::Path;

use bear_sandbox::CredentialRecord;
use fsutil::SingleFileDriver;

use super::{error::*, location::StoreLocation};

/// The single on-disk sandbox credential.
///
/// Concurrent `bear` processes writing the same file are not coordinated.
pub struct SandboxStore {
    file: SingleFileDriver,
}

impl SandboxStore {
    pub fn new<L: StoreLocation + ?Sized>(location: &L) -> Result<Self> {
        Ok(Self::at(location.credential_file()?))
    }

    pub fn at(filepath: impl AsRef<Path>) -> Self {
        Self {
            file: SingleFileDriver::new(filepath),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.filepath
    }

    /// Writes `record` as indented JSON readable by the owner only.
    #[must_use]
    pub fn save(&self, record: &CredentialRecord) -> Result<()> {
        self.file.write_json(record)?;
        log::debug!("Saved sandbox credential to {:?}", self.path());
        Ok(())
    }

    #[must_use]
    pub fn load(&self) -> Result<CredentialRecord> {
        self.file.read_json().map_err(|e| match e {
            e if e.is_not_found() => Error::NotLoggedIn(self.path().to_owned()),
            fsutil::Error::DeserializeFromJson(path, e) => Error::Malformed(path, e),
            e => Error::Fs(e),
        })
    }

    /// Deletes the credential file. Returns `false` if there was nothing to delete.
    #[must_use]
    pub fn purge(&self) -> Result<bool> {
        Ok(self.file.remove()?)
    }
}
