use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File, Metadata},
    io::{self, BufReader, Write as _},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Cannot walk dir '{0}': {1}")]
        WalkDir(PathBuf, #[source] walkdir::Error),

        #[error("Cannot serialize to JSON (dest='{0}'): {1}")]
        SerializeToJson(PathBuf, #[source] serde_json::Error),

        #[error("Cannot deserialize from JSON (src='{0}'): {1}")]
        DeserializeFromJson(PathBuf, #[source] serde_json::Error),
    }

    impl Error {
        /// Returns true if this error was caused by a missing file or dir.
        pub fn is_not_found(&self) -> bool {
            match self {
                Error::SingleIO(_, _, e) => e.kind() == io::ErrorKind::NotFound,
                Error::WalkDir(_, e) => e
                    .io_error()
                    .map_or(false, |e| e.kind() == io::ErrorKind::NotFound),
                _ => false,
            }
        }
    }
}
pub use error::{Error, Result};

#[cfg(unix)]
const PRIVATE_DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

/// Creates `path` and its missing parents, readable only by the owner.
#[must_use]
pub fn mkdir_all_private(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(PRIVATE_DIR_MODE);
    }
    builder
        .create(dir)
        .map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

/// Writes `contents` to a file that only the owner can read and write.
/// Parent dirs are created with owner-only permissions as well.
#[must_use]
pub fn write_private_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let filepath = filepath.as_ref();
    if let Some(dir) = filepath.parent() {
        self::mkdir_all_private(dir)?;
    }

    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        opts.mode(PRIVATE_FILE_MODE);
    }
    let to_err = |e| Error::SingleIO("Cannot write file", filepath.to_owned(), e);
    let mut f = opts.open(filepath).map_err(to_err)?;
    f.write_all(contents.as_ref()).map_err(to_err)?;

    // `mode()` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        fs::set_permissions(filepath, fs::Permissions::from_mode(PRIVATE_FILE_MODE))
            .map_err(to_err)?;
    }
    Ok(())
}

/// Reads raw bytes; no encoding is assumed.
#[must_use]
pub fn read(filepath: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn metadata(path: impl AsRef<Path>) -> Result<Metadata> {
    fs::metadata(&path)
        .map_err(|e| Error::SingleIO("Cannot stat path", path.as_ref().to_owned(), e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    fs::remove_file(&filepath)
        .map_err(|e| Error::SingleIO("Cannot remove file", filepath.as_ref().to_owned(), e))
}

/// Removes the file, treating "already gone" as success.
/// Returns whether a file was actually removed.
#[must_use]
pub fn remove_file_if_exists(filepath: impl AsRef<Path>) -> Result<bool> {
    match fs::remove_file(&filepath) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::SingleIO(
            "Cannot remove file",
            filepath.as_ref().to_owned(),
            e,
        )),
    }
}

#[must_use]
pub fn write_json_pretty_private<P, T>(filepath: P, data: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let s = serde_json::to_string_pretty(data)
        .map_err(|e| Error::SerializeToJson(filepath.as_ref().to_owned(), e))?;
    write_private_with_mkdir(filepath, &s)
}

#[must_use]
pub fn read_json_with_deserialize<P, T>(filepath: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let filepath = filepath.as_ref();
    let f = File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.to_owned(), e))?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| Error::DeserializeFromJson(filepath.to_owned(), e))
}

/// Collects every regular file under `root` in lexicographic order
/// (per directory, by file name). The first unreadable entry aborts the walk.
///
/// When `root` itself is a file, the result contains just that file.
#[must_use]
pub fn walk_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::WalkDir(root.to_owned(), e))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Returns the extension of `path` with a leading dot (e.g. `".tf"`),
/// or an empty string if there is none.
///
/// ```
/// use fsutil::dotted_extension;
///
/// assert_eq!(dotted_extension("main.tf"), ".tf");
/// assert_eq!(dotted_extension("dir/vars.auto.tfvars"), ".tfvars");
/// assert_eq!(dotted_extension("Makefile"), "");
/// ```
pub fn dotted_extension(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub struct SingleFileDriver {
    pub filepath: PathBuf,
}

impl SingleFileDriver {
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            filepath: filepath.as_ref().to_owned(),
        }
    }

    #[must_use]
    pub fn write_json<T: Serialize>(&self, data: &T) -> Result<()> {
        self::write_json_pretty_private(&self.filepath, data)
    }

    #[must_use]
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        self::read_json_with_deserialize(&self.filepath)
    }

    #[must_use]
    pub fn remove(&self) -> Result<bool> {
        self::remove_file_if_exists(&self.filepath)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn walk_files_is_sorted_and_skips_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_with_mkdir(root.join("b/z.tf"), "").unwrap();
        write_with_mkdir(root.join("b/a.tf"), "").unwrap();
        write_with_mkdir(root.join("a.txt"), "").unwrap();
        mkdir_all(root.join("empty")).unwrap();

        let files = walk_files(root).unwrap();
        assert_eq!(
            files,
            vec![root.join("a.txt"), root.join("b/a.tf"), root.join("b/z.tf")]
        );
    }

    #[test]
    fn walk_files_on_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("main.tf");
        write(&file, "x").unwrap();
        assert_eq!(walk_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn walk_files_missing_root_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = walk_files(tmp.path().join("nope")).unwrap_err();
        assert!(err.is_not_found(), "{:?}", err);
    }

    #[test]
    fn read_returns_raw_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("latin1.txt");
        write(&file, b"caf\xe9").unwrap();
        assert_eq!(read(&file).unwrap(), b"caf\xe9");
        assert!(read_to_string(&file).is_err());
    }

    #[test]
    fn remove_file_if_exists_tolerates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("gone.json");
        assert_eq!(remove_file_if_exists(&file).unwrap(), false);

        write(&file, "{}").unwrap();
        assert_eq!(remove_file_if_exists(&file).unwrap(), true);
        assert!(!file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn private_write_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt as _;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("nested/dir/secret.json");
        write_private_with_mkdir(&file, "{}").unwrap();

        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let dir_mode = fs::metadata(file.parent().unwrap())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
    }
}
