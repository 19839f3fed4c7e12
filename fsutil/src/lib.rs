use std::{
    fs,
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

        #[error("No file named '{0}' in '{1}' or its ancestors")]
        NotFoundInAncestors(String, PathBuf),
    }

    impl Error {
        pub fn is_not_found(&self) -> bool {
            match self {
                Self::SingleIO(_, _, e) => e.kind() == io::ErrorKind::NotFound,
                Self::NotFoundInAncestors(..) => true,
            }
        }
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
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
        if !dir.as_os_str().is_empty() {
            self::mkdir_all(dir)?;
        }
    }
    log::debug!("Writing {}", filepath.as_ref().to_string_lossy());
    self::write(filepath, contents)
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

/// Find `filename` in `start_dir` and its ancestor dirs, nearest first.
pub fn find_file_in_ancestors(start_dir: impl AsRef<Path>, filename: &str) -> Result<PathBuf> {
    let start_dir = start_dir.as_ref();
    start_dir
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::NotFoundInAncestors(filename.to_owned(), start_dir.to_owned()))
}

/// Split a path into (path without extension, extension).
/// ```
/// use fsutil::split_extension;
/// use std::path::Path;
///
/// assert_eq!(split_extension("dir/a.cpp"), (Path::new("dir/a").to_owned(), Some("cpp".to_owned())));
/// assert_eq!(split_extension("a.tar.gz"), (Path::new("a.tar").to_owned(), Some("gz".to_owned())));
/// assert_eq!(split_extension("Makefile"), (Path::new("Makefile").to_owned(), None));
/// ```
pub fn split_extension(path: impl AsRef<Path>) -> (PathBuf, Option<String>) {
    let path = path.as_ref();
    match path.extension() {
        Some(ext) => (
            path.with_extension(""),
            Some(ext.to_string_lossy().into_owned()),
        ),
        None => (path.to_owned(), None),
    }
}
