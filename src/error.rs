use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the txtc library.
///
/// Everything except [`Error::Config`] and a failure to create the output
/// root is reported per item and never stops a traversal.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// A file or directory could not be opened.
    #[error("Unable to open '{path}': {message}")]
    Open {
        /// Path that could not be opened
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Reading from an input file failed mid-copy.
    #[error("Failed to read file '{path}': {message}")]
    Read {
        /// Input file path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Writing to an output file could not complete.
    #[error("Failed to write file '{path}': {message}")]
    Write {
        /// Output file path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// File extension is not in the recognized set.
    #[error("Unsupported input file format '{path}', skipping this file...")]
    UnsupportedFormat {
        /// Skipped file
        path: PathBuf,
    },

    /// An output directory could not be created.
    #[error("Unable to make output directory '{path}': {message}")]
    DirectoryCreate {
        /// Directory that could not be created
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The directory walk itself failed (e.g. a symlink loop).
    #[error("Walk error at '{path}': {message}")]
    Walk {
        /// Path where the walk failed
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Creates an open error with path context.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a read error with path context.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a write error with path context.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an unsupported format notice.
    #[must_use]
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Creates a directory creation error.
    #[must_use]
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Converts a walkdir error, falling back to `root` when it carries no path.
    #[must_use]
    pub fn walk(root: impl Into<PathBuf>, source: &walkdir::Error) -> Self {
        let path = source
            .path()
            .map_or_else(|| root.into(), std::path::Path::to_path_buf);

        // An unreadable directory is an open failure; loops are walk failures.
        if source.loop_ancestor().is_none() {
            if let Some(io) = source.io_error() {
                return Self::Open {
                    path,
                    message: io.to_string(),
                };
            }
        }

        Self::Walk {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is an open error.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Returns true if this is a write error.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    /// Returns true if this is a directory creation error.
    #[must_use]
    pub const fn is_directory_create(&self) -> bool {
        matches!(self, Self::DirectoryCreate { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::DirectoryCreate { path, .. }
            | Self::Walk { path, .. } => Some(path),
            Self::Config { .. } => None,
        }
    }
}

impl From<globset::Error> for Error {
    fn from(e: globset::Error) -> Self {
        Self::Config {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test message");
        assert!(err.is_config());
        assert!(err.to_string().contains("test message"));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_open_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::open("/tmp/test.cpp", io_err);
        assert!(err.is_open());
        assert!(err.to_string().contains("/tmp/test.cpp"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_write_error() {
        let io_err = io::Error::new(io::ErrorKind::WriteZero, "short write");
        let err = Error::write("/tmp/out.cpp.txt", io_err);
        assert!(err.is_write());
        assert_eq!(err.path(), Some(std::path::Path::new("/tmp/out.cpp.txt")));
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = Error::unsupported_format("notes.md");
        assert_eq!(
            err.to_string(),
            "Unsupported input file format 'notes.md', skipping this file..."
        );
    }

    #[test]
    fn test_directory_create_error() {
        let io_err = io::Error::new(io::ErrorKind::AlreadyExists, "exists");
        let err = Error::directory_create("out/a", io_err);
        assert!(err.is_directory_create());
        assert!(err.to_string().contains("out/a"));
    }

    #[test]
    fn test_glob_error_is_config() {
        let glob_err = globset::Glob::new("a[").unwrap_err();
        let err: Error = glob_err.into();
        assert!(err.is_config());
    }

    #[test]
    fn test_walk_error_for_missing_root_is_open() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let walk_err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();

        let err = Error::walk(&missing, &walk_err);
        assert!(err.is_open());
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::config("test");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
