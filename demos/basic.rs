//! Basic example of using txtc as a library
//!
//! This example shows the simplest way to mirror a source tree into `.txt` files.

use txtc::{Config, Converter};

fn main() -> anyhow::Result<()> {
    // Create a simple configuration
    let config = Config::builder()
        .input_dir("./src")
        .output_dir("./output")
        .recursive(true)
        .build()?;

    // Run the conversion
    let stats = Converter::new(config)?.run()?;

    // Print summary
    stats.print_summary();

    println!(
        "\n✓ Converted {} of {} source files ({} skipped)",
        stats.files_converted, stats.files_matched, stats.files_skipped
    );

    println!("✓ Output written to: {}", stats.output_directory);

    Ok(())
}
