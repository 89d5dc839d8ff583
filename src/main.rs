//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;

use clap::Parser;

use chatlens::archive::Archive;
use chatlens::cli::Args;
use chatlens::table::FlatTable;
use chatlens::{ReportError, aggregate, export, loader, render};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ReportError> {
    let args = Args::parse();

    let delimiter = u8::try_from(args.delimiter)
        .map_err(|_| ReportError::invalid_format("delimiter must be an ASCII character"))?;

    println!("📊 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output.display());
    println!();

    // Step 1: load. A missing file or undecodable JSON ends the run
    // gracefully: diagnostic, no artifacts, success exit.
    let root = match loader::load(&args.input) {
        Ok(root) => root,
        Err(e) if e.is_recoverable_load() => {
            println!("⚠️  {}", e);
            println!("🪹 No data to display");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // Step 2: flatten.
    let archive = Archive::from_value(root)?;
    println!("⏳ Flattening {} messages...", archive.len());
    let table = FlatTable::from_archive(archive)?;

    // Step 3: explore.
    println!();
    print!("{}", table.preview(args.preview_rows));
    println!();
    print!("{}", table.schema_summary());
    println!();

    // Step 4: aggregate and render.
    let aggregates = aggregate::compute_all(&table);
    println!("📈 Rendering {} charts...", aggregates.len());
    let failures = render::render_all(&aggregates, &args.output)?;
    for failure in &failures {
        println!("   ⚠️  {}", failure);
    }
    println!(
        "   {} of {} charts written",
        aggregates.len() - failures.len(),
        aggregates.len()
    );
    println!("✅ Figures saved to {}", args.output.display());

    // Step 5: export the flattened table.
    let csv_path = args.output.join("process.csv");
    export::write_csv(&table, &csv_path, delimiter)?;
    println!("✅ Table saved to {}", csv_path.display());

    Ok(())
}
