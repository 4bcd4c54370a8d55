use crate::{
    config::Config,
    copier::copy_file,
    error::{Error, Result},
    filter::{ExtensionFilter, PathFilter},
};
use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Counters collected during a walk.
#[derive(Debug, Default, Clone)]
pub(crate) struct WalkStats {
    /// Eligible files found
    pub files_matched: usize,

    /// Files copied successfully
    pub files_converted: usize,

    /// Files skipped for an unsupported extension
    pub files_skipped: usize,

    /// Files and directories left out by exclusion globs
    pub excluded: usize,

    /// Output sub-directories created (or already present)
    pub directories_mirrored: usize,

    /// Bytes copied across all files
    pub bytes_copied: u64,

    /// Per-item failures; none of these stopped the walk
    pub failures: Vec<Error>,
}

impl WalkStats {
    fn record_failure(&mut self, error: Error) {
        warn!("{error}");
        self.failures.push(error);
    }
}

/// Walks the input tree depth-first and mirrors eligible files into the
/// output tree.
pub(crate) struct Walker {
    input_root: PathBuf,
    output_root: PathBuf,
    recursive: bool,
    dry_run: bool,
    output_suffix: String,
    buffer_size: usize,
    extensions: ExtensionFilter,
    paths: PathFilter,
}

impl Walker {
    /// Creates a new walker from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the exclusion globs do not compile.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            input_root: config.input_dir.clone(),
            output_root: config.output_dir.clone(),
            recursive: config.recursive,
            dry_run: config.dry_run,
            output_suffix: config.output_suffix.clone(),
            buffer_size: config.buffer_size,
            extensions: ExtensionFilter::new(&config.extensions),
            paths: PathFilter::new(&config.exclude)?,
        })
    }

    /// Walks the input root. The output root must already exist unless this
    /// is a dry run.
    ///
    /// Never fails as a whole: every problem is logged and collected into
    /// [`WalkStats::failures`].
    pub(crate) fn walk(&self) -> WalkStats {
        let mut stats = WalkStats::default();

        // Known only once the output root exists; used to avoid walking
        // into our own output when it lives under the input root.
        let output_canonical = fs::canonicalize(&self.output_root).ok();

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut entries = WalkDir::new(&self.input_root)
            .follow_links(true)
            .max_depth(max_depth)
            .into_iter();

        debug!(
            "Walking {} (recursive: {})",
            self.input_root.display(),
            self.recursive
        );

        while let Some(result) = entries.next() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    stats.record_failure(Error::walk(&self.input_root, &e));
                    continue;
                }
            };

            if entry.depth() == 0 {
                if !entry.file_type().is_dir() {
                    stats.record_failure(Error::open(
                        entry.path(),
                        io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
                    ));
                }
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.input_root) else {
                continue;
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if !self.visit_dir(&entry, relative, output_canonical.as_deref(), &mut stats) {
                    entries.skip_current_dir();
                }
            } else if file_type.is_file() {
                self.visit_file(&entry, relative, &mut stats);
            } else {
                trace!("Skipping special file: {}", entry.path().display());
            }
        }

        debug!(
            "Walk complete: {} matched, {} converted, {} skipped, {} excluded, {} failures",
            stats.files_matched,
            stats.files_converted,
            stats.files_skipped,
            stats.excluded,
            stats.failures.len()
        );

        stats
    }

    /// Handles a sub-directory. Returns true if the walk should descend.
    fn visit_dir(
        &self,
        entry: &DirEntry,
        relative: &Path,
        output_canonical: Option<&Path>,
        stats: &mut WalkStats,
    ) -> bool {
        let name = entry.file_name();
        if name == "." || name == ".." || !self.recursive {
            return false;
        }

        if self.paths.is_excluded(relative) {
            debug!("Excluded directory: {}", relative.display());
            stats.excluded += 1;
            return false;
        }

        if let Some(output) = output_canonical {
            if fs::canonicalize(entry.path()).is_ok_and(|p| p == output) {
                debug!("Not descending into output directory {}", entry.path().display());
                return false;
            }
        }

        let out_dir = self.output_root.join(relative);
        if self.dry_run {
            debug!("Would create directory {}", out_dir.display());
            return true;
        }

        match fs::create_dir_all(&out_dir) {
            Ok(()) => {
                trace!("Mirrored directory {}", out_dir.display());
                stats.directories_mirrored += 1;
                true
            }
            Err(e) => {
                stats.record_failure(Error::directory_create(&out_dir, e));
                false
            }
        }
    }

    fn visit_file(&self, entry: &DirEntry, relative: &Path, stats: &mut WalkStats) {
        if self.paths.is_excluded(relative) {
            debug!("Excluded file: {}", relative.display());
            stats.excluded += 1;
            return;
        }

        if !self.extensions.is_eligible(entry.file_name()) {
            info!("{}", Error::unsupported_format(entry.path()));
            stats.files_skipped += 1;
            return;
        }

        stats.files_matched += 1;
        let output = mirrored_file_path(&self.output_root, relative, &self.output_suffix);

        if self.dry_run {
            info!("Would copy {} -> {}", entry.path().display(), output.display());
            return;
        }

        match copy_file(entry.path(), &output, self.buffer_size) {
            Ok(bytes) => {
                debug!("Converted {} -> {}", entry.path().display(), output.display());
                stats.files_converted += 1;
                stats.bytes_copied += bytes;
            }
            Err(e) => stats.record_failure(e),
        }
    }
}

/// Output location of a file: `output_root/relative` with `suffix` appended
/// to the file name.
///
/// ```
/// use std::path::Path;
///
/// let out = txtc::mirrored_file_path(Path::new("out"), Path::new("a/b/file.cpp"), ".txt");
/// assert_eq!(out, Path::new("out/a/b/file.cpp.txt"));
/// ```
#[must_use]
pub fn mirrored_file_path(output_root: &Path, relative: &Path, suffix: &str) -> PathBuf {
    let mut name = relative
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(suffix);

    output_root.join(relative.with_file_name(name))
}
