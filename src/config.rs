use crate::error::{Error, Result};
use std::path::PathBuf;

/// Extensions recognized by default, without the leading dot.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["h", "c", "hpp", "cpp"];

const DEFAULT_OUTPUT_SUFFIX: &str = ".txt";
const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration for a txtc conversion run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Root directory to read source files from
    pub input_dir: PathBuf,

    /// Root directory the mirrored `.txt` files are written to
    pub output_dir: PathBuf,

    /// Descend into sub-directories
    pub recursive: bool,

    /// Recognized extensions, lowercase and without the leading dot
    pub extensions: Vec<String>,

    /// Suffix appended to every output file name
    pub output_suffix: String,

    /// Size of the copy buffer in bytes
    pub buffer_size: usize,

    /// Glob patterns for files and directories to leave out
    pub exclude: Vec<String>,

    /// Dry run mode (no directories created, no files written)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtc::Config;
    ///
    /// let config = Config::builder()
    ///     .input_dir("./src")
    ///     .output_dir("./out")
    ///     .recursive(true)
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.buffer_size, 4096);
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The input directory is deliberately not checked here: an unreadable
    /// input root is reported by the walk, not rejected up front.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either root path is empty
    /// - The extension set is empty or contains an empty entry
    /// - The output suffix is empty
    /// - The buffer size is zero
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::config("Input folder name must be specified."));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config("Output folder name must be specified."));
        }

        if self.extensions.is_empty() {
            return Err(Error::config("at least one file extension is required"));
        }

        if let Some(bad) = self.extensions.iter().find(|e| e.is_empty() || e.contains('.')) {
            return Err(Error::config(format!(
                "invalid extension '{bad}': expected a non-empty name such as \"cpp\""
            )));
        }

        if self.output_suffix.is_empty() {
            return Err(Error::config("output_suffix must not be empty"));
        }

        if self.buffer_size == 0 {
            return Err(Error::config("buffer_size must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            recursive: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            exclude: Vec::new(),
            dry_run: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    recursive: bool,
    extensions: Option<Vec<String>>,
    output_suffix: Option<String>,
    buffer_size: Option<usize>,
    exclude: Vec<String>,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the input root directory.
    #[must_use]
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(path.into());
        self
    }

    /// Sets the output root directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enables or disables recursive descent.
    #[must_use]
    pub fn recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    /// Replaces the recognized extension set.
    ///
    /// Entries may be given with or without a leading dot and in any case;
    /// they are normalized to lowercase without the dot.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Sets the suffix appended to output file names.
    #[must_use]
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    /// Sets the copy buffer size in bytes.
    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = Some(size);
        self
    }

    /// Sets glob patterns for files and directories to exclude.
    #[must_use]
    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let config = Config {
            input_dir: self.input_dir.unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            recursive: self.recursive,
            extensions: self.extensions.unwrap_or(defaults.extensions),
            output_suffix: self.output_suffix.unwrap_or(defaults.output_suffix),
            buffer_size: self.buffer_size.unwrap_or(defaults.buffer_size),
            exclude: self.exclude,
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
