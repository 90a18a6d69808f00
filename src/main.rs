//! Pcaload CLI - Convert PCA planning sheets to the PNCP import format
//!
//! # Main Commands
//!
//! ```bash
//! pcaload convert "PCA 2025.csv"          # Full conversion + summary
//! pcaload convert in.csv -o out.csv --json out.json --year 2025
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! pcaload parse in.csv                    # Just parse rows to JSON
//! pcaload classify "Aquisição de notebooks"
//! pcaload classes                         # Show the catalog taxonomy
//! ```

use clap::{Parser, Subcommand};
use pcaload::{
    convert_file, render_summary, write_csv, write_json, Classifier, ConvertOptions,
    MATERIAL_CLASSES, SERVICE_CLASSES,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pcaload")]
#[command(about = "Convert PCA planning sheets to the PNCP import format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full conversion: sheet → classified records → CSV/JSON + summary
    Convert {
        /// Input sheet file (delimited export of the PCA spreadsheet)
        input: PathBuf,

        /// Output CSV file (PNCP layout, UTF-8 BOM, semicolons)
        #[arg(short, long, default_value = "PCA_PNCP.csv")]
        output: PathBuf,

        /// Also write the JSON import document
        #[arg(long)]
        json: Option<PathBuf>,

        /// Delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Target year for the desired-date field (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Skip the console summary
        #[arg(long)]
        quiet: bool,
    },

    /// Parse a sheet file and output the raw rows as JSON
    Parse {
        /// Input sheet file
        input: PathBuf,

        /// Delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify a single description and show the resulting codes
    Classify {
        /// Item description text
        description: String,

        /// Coarse category hint (e.g. MATERIAL or SERVICO)
        #[arg(long, default_value = "SERVICO")]
        hint: String,
    },

    /// Show the catalog taxonomy (classes, keywords, prefixes)
    Classes,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            json,
            delimiter,
            year,
            quiet,
        } => cmd_convert(&input, &output, json.as_deref(), delimiter, year, quiet),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Classify { description, hint } => cmd_classify(&description, &hint),

        Commands::Classes => cmd_classes(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    json_output: Option<&Path>,
    delimiter: Option<char>,
    year: Option<i32>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let defaults = ConvertOptions::default();
    let options = ConvertOptions {
        target_year: year.unwrap_or(defaults.target_year),
        delimiter,
    };
    let target_year = options.target_year;

    let result = convert_file(input, options)?;

    eprintln!("   Encoding: {}", result.input.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.input.delimiter));
    eprintln!("   Rows: {}", result.input.row_count);
    eprintln!("   Target year: {}", target_year);
    eprintln!("\n⚙️  Converted: {} items ({} ignored)", result.records.len(), result.ignored);

    write_csv(&result.records, output)?;
    eprintln!("💾 CSV written to: {}", output.display());

    if let Some(json_path) = json_output {
        write_json(&result.records, json_path)?;
        eprintln!("💾 JSON written to: {}", json_path.display());
    }

    if !quiet {
        println!("\n{}", render_summary(&result));
    }

    eprintln!("✨ Done!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing sheet: {}", input.display());

    let sheet = pcaload::read_sheet_file(input, delimiter)?;

    eprintln!("   Encoding: {}", sheet.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(sheet.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("✅ Parsed {} rows", sheet.rows.len());

    let rows: Vec<serde_json::Value> = sheet
        .rows
        .iter()
        .map(|row| {
            json!({
                "requester": row.requester,
                "objective": row.objective,
                "quantity": row.quantity,
                "expectation": row.expectation,
                "value": row.value,
                "program": row.program,
                "justification": row.justification,
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_classify(description: &str, hint: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut classifier = Classifier::new();
    let result = classifier.classify(description, hint);

    println!("Class code: {}", result.class_code);
    println!("Class name: {}", result.class_name);
    println!("Item code:  {}", result.item_code);

    Ok(())
}

fn cmd_classes() -> Result<(), Box<dyn std::error::Error>> {
    println!("Service classes:");
    for entry in SERVICE_CLASSES {
        println!("  {} [{}] {}", entry.class_code, entry.prefix, entry.class_name);
        println!("      keywords: {}", entry.keywords.join(", "));
    }

    println!("\nMaterial classes:");
    for entry in MATERIAL_CLASSES {
        println!("  {} [{}] {}", entry.class_code, entry.prefix, entry.class_name);
        println!("      keywords: {}", entry.keywords.join(", "));
    }

    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
