use crate::{
    config::Config,
    error::{Error, Result},
    walker::{WalkStats, Walker},
};
use serde::Serialize;
use std::{
    fs,
    time::{Duration, Instant},
};
use tracing::{error, info, instrument, warn};

/// Statistics collected during a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertStats {
    /// Eligible source files found
    pub files_matched: usize,

    /// Files copied to their `.txt` mirror
    pub files_converted: usize,

    /// Files skipped for an unsupported extension
    pub files_skipped: usize,

    /// Files and directories left out by exclusion globs
    pub excluded: usize,

    /// Output sub-directories created
    pub directories_mirrored: usize,

    /// Total bytes copied
    pub bytes_copied: u64,

    /// Number of per-item failures
    pub failure_count: usize,

    /// Per-item failures, in the order they happened
    #[serde(skip)]
    pub failures: Vec<Error>,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// Total execution time
    pub duration: Duration,

    /// Local start time
    pub started_at: String,

    /// Output directory path
    pub output_directory: String,
}

impl ConvertStats {
    fn new(walk: WalkStats, config: &Config, duration: Duration, started_at: String) -> Self {
        Self {
            files_matched: walk.files_matched,
            files_converted: walk.files_converted,
            files_skipped: walk.files_skipped,
            excluded: walk.excluded,
            directories_mirrored: walk.directories_mirrored,
            bytes_copied: walk.bytes_copied,
            failure_count: walk.failures.len(),
            failures: walk.failures,
            dry_run: config.dry_run,
            duration,
            started_at,
            output_directory: config.output_dir.display().to_string(),
        }
    }

    /// Returns true if every eligible file was handled without failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n{}", self.render_summary());
    }

    /// Renders the summary box printed by [`ConvertStats::print_summary`].
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut lines = vec![
            "╔═══════════════════════════════════════════════════════╗".to_string(),
            "║               Conversion Summary                      ║".to_string(),
            "╠═══════════════════════════════════════════════════════╣".to_string(),
            format!("║ Files Matched:        {:>8}                        ║", self.files_matched),
            format!("║   - Converted:        {:>8}                        ║", self.files_converted),
            format!("║ Files Skipped:        {:>8}                        ║", self.files_skipped),
            format!("║ Excluded:             {:>8}                        ║", self.excluded),
            format!("║ Directories Mirrored: {:>8}                        ║", self.directories_mirrored),
            format!("║ Bytes Copied:         {:>8}                        ║", self.bytes_copied),
            format!("║ Failures:             {:>8}                        ║", self.failure_count),
            "║ Output Directory:                                     ║".to_string(),
            // Paths longer than the box push the border out but keep it.
            format!("║   {:<52}║", self.output_directory),
            format!(
                "║ Total Time:           {:>8.2}s                       ║",
                self.duration.as_secs_f64()
            ),
        ];
        if self.dry_run {
            lines.push("║ ⚠ No files were written (dry run mode)                ║".to_string());
        }
        lines.push("╚═══════════════════════════════════════════════════════╝".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Converts a source tree into its `.txt` mirror.
pub struct Converter {
    config: Config,
    walker: Walker,
}

impl Converter {
    /// Creates a new converter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or an exclusion
    /// glob is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let walker = Walker::new(&config)?;

        Ok(Self { config, walker })
    }

    /// Runs the conversion and returns statistics.
    ///
    /// The output root is created first (with missing ancestors). Failures on
    /// individual files or sub-directories are logged and collected in
    /// [`ConvertStats::failures`]; they do not make this call fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryCreate`] if the output root cannot be
    /// created. Nothing is traversed in that case.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use txtc::{Config, Converter};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .input_dir("./engine")
    ///     .output_dir("./engine-txt")
    ///     .recursive(true)
    ///     .build()?;
    ///
    /// let stats = Converter::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(self) -> Result<ConvertStats> {
        let start_time = Instant::now();
        let started_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if self.config.dry_run {
            warn!("Dry run mode enabled - skipping directory creation and file writes");
        } else if let Err(e) = fs::create_dir_all(&self.config.output_dir) {
            let err = Error::directory_create(&self.config.output_dir, e);
            error!("{err}");
            return Err(err);
        }

        info!(
            "Converting {} -> {}",
            self.config.input_dir.display(),
            self.config.output_dir.display()
        );

        let walk = self.walker.walk();
        let stats = ConvertStats::new(walk, &self.config, start_time.elapsed(), started_at);

        if !stats.is_clean() {
            warn!(
                "Encountered {} errors during conversion (non-fatal)",
                stats.failure_count
            );
        }

        info!(
            "✓ Converted {} of {} files ({} skipped) in {:.2}s",
            stats.files_converted,
            stats.files_matched,
            stats.files_skipped,
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_converter_creates_output_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/main.c").write_str("int main;").unwrap();
        let output = temp.child("deep/nested/out");

        let config = Config::builder()
            .input_dir(temp.child("in").path())
            .output_dir(output.path())
            .build()
            .unwrap();
        let stats = Converter::new(config).unwrap().run().unwrap();

        assert!(stats.is_clean());
        assert_eq!(stats.files_converted, 1);
        assert_eq!(stats.bytes_copied, 9);
        output.child("main.c.txt").assert("int main;");
    }

    #[test]
    fn test_converter_output_root_collision_is_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/main.c").write_str("int main;").unwrap();
        let output = temp.child("out");
        output.write_str("a file, not a directory").unwrap();

        let config = Config::builder()
            .input_dir(temp.child("in").path())
            .output_dir(output.path())
            .build()
            .unwrap();
        let err = Converter::new(config).unwrap().run().unwrap_err();

        assert!(err.is_directory_create());
        output.assert("a file, not a directory");
    }

    #[test]
    fn test_converter_rejects_bad_glob() {
        let config = Config::builder().exclude(vec!["[".to_string()]).build().unwrap();
        assert!(Converter::new(config).err().is_some_and(|e| e.is_config()));
    }

    #[test]
    fn test_converter_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/main.c").write_str("int main;").unwrap();
        let output = temp.child("out");

        let config = Config::builder()
            .input_dir(temp.child("in").path())
            .output_dir(output.path())
            .dry_run(true)
            .build()
            .unwrap();
        let stats = Converter::new(config).unwrap().run().unwrap();

        assert!(stats.dry_run);
        assert_eq!(stats.files_matched, 1);
        assert_eq!(stats.files_converted, 0);
        output.assert(predicates::path::missing());
    }

    #[test]
    fn test_summary_box_is_closed_on_every_line() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/main.c").write_str("int main;").unwrap();
        let config = Config::builder()
            .input_dir(temp.child("in").path())
            .output_dir("out-dir")
            .dry_run(true)
            .build()
            .unwrap();
        let stats = Converter::new(config).unwrap().run().unwrap();

        let summary = stats.render_summary();
        assert!(summary.contains("║   out-dir"));
        for line in summary.lines() {
            assert!(
                line.ends_with('║') || line.ends_with('╗') || line.ends_with('╣') || line.ends_with('╝'),
                "unclosed line: {line:?}"
            );
            if line.starts_with('║') {
                assert_eq!(line.chars().count(), 57, "misaligned line: {line:?}");
            }
        }
    }

    #[test]
    fn test_stats_serialize_without_failures_list() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .input_dir(temp.child("missing").path())
            .output_dir(temp.child("out").path())
            .build()
            .unwrap();
        let stats = Converter::new(config).unwrap().run().unwrap();

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["failure_count"], 1);
        assert!(json.get("failures").is_none());
    }
}
