//! # txtc
//!
//! Mirrors a C/C++ source tree into plain `.txt` copies.
//!
//! Every file ending in `.h`, `.c`, `.hpp` or `.cpp` (case-insensitive) is
//! copied byte-for-byte to `<output>/<relative path>/<name>.txt`. Nothing is
//! transcoded; only the name changes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use txtc::{Config, Converter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input_dir("./src")
//!     .output_dir("./out")
//!     .recursive(true)
//!     .build()?;
//!
//! let stats = Converter::new(config)?.run()?;
//! println!("{} files converted", stats.files_converted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Converter**: creates the output root, then runs the walk
//! 2. **Walker**: depth-first over the input tree, mirroring directories
//! 3. **Filter**: decides which files are eligible
//! 4. **Copier**: streams each eligible file through a 4 KiB buffer
//!
//! Per-file failures are logged and collected; only a failure to create the
//! output root stops a run.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod converter;
mod error;
mod filter;
mod walker;

pub mod copier;

pub use config::{Config, ConfigBuilder, DEFAULT_EXTENSIONS};
pub use converter::{ConvertStats, Converter};
pub use error::{Error, Result};
pub use filter::ExtensionFilter;
pub use walker::mirrored_file_path;

/// Runs a complete conversion with the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the output root
/// cannot be created.
///
/// # Examples
///
/// ```no_run
/// use txtc::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .input_dir("include")
///     .output_dir("include-txt")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<ConvertStats> {
    Converter::new(config)?.run()
}
