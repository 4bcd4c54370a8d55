//! Dry run example
//!
//! Walks the tree and reports what would be copied without touching the disk.

use txtc::{Config, Converter};

fn main() -> anyhow::Result<()> {
    let config = Config::builder()
        .input_dir("./src")
        .output_dir("./output")
        .recursive(true)
        .exclude(vec!["**/third_party".to_string()])
        .dry_run(true)
        .build()?;

    let stats = Converter::new(config)?.run()?;

    println!("Dry run completed!");
    println!("Would convert {} files", stats.files_matched);
    println!("Would skip {} unsupported files", stats.files_skipped);
    println!("Excluded {} entries", stats.excluded);

    Ok(())
}
