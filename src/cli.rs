//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

/// Generate descriptive analytics from a Telegram chat export:
/// twelve charts and a flattened CSV, from one result.json.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens
    chatlens result.json
    chatlens export.json -o reports/chat
    chatlens result.json --delimiter ';' --preview-rows 10")]
pub struct Args {
    /// Path to the exported chat archive (JSON)
    #[arg(default_value = "result.json")]
    pub input: PathBuf,

    /// Directory for chart images and the CSV export
    #[arg(short, long, default_value = "outputs/graphs")]
    pub output: PathBuf,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Number of rows shown in the console preview
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,
}
