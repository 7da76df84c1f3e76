//! minimesh CLI - STL mesh analysis tool
//!
//! Parses STL files and reports volume, surface area, counts, and
//! bounding-box dimensions; merges meshes into a single binary STL.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use minimesh_core::{summary_lines, to_markdown, Mesh, MeshReport, StlParser};

#[derive(Parser)]
#[command(name = "minimesh", version, about = "STL mesh analysis and reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mesh summary for an STL file
    Info {
        /// STL file to analyze
        file: PathBuf,

        /// Print the full report as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Write a markdown or JSON report for an STL file
    Report {
        /// STL file to analyze
        file: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
    },

    /// Merge STL files into a single binary STL
    Merge {
        /// STL files to merge (at least two)
        #[arg(num_args = 2.., required = true)]
        files: Vec<PathBuf>,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Report {
            file,
            output,
            format,
        } => cmd_report(&file, output.as_deref(), format),
        Commands::Merge { files, output } => cmd_merge(&files, &output),
    }
}

fn parse_mesh(file: &std::path::Path) -> Result<Mesh> {
    StlParser::parse_file(file).with_context(|| format!("failed to analyze {}", file.display()))
}

fn cmd_info(file: &std::path::Path, json: bool) -> Result<()> {
    let mesh = parse_mesh(file)?;
    let report = MeshReport::from_mesh(&mesh);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summary_lines(&report));
    }
    Ok(())
}

fn cmd_report(
    file: &std::path::Path,
    output: Option<&std::path::Path>,
    format: ReportFormat,
) -> Result<()> {
    let mesh = parse_mesh(file)?;
    let report = MeshReport::from_mesh(&mesh);

    let rendered = match format {
        ReportFormat::Markdown => to_markdown(&report),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("{} {}", "✓".green(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_merge(files: &[PathBuf], output: &std::path::Path) -> Result<()> {
    let (first, rest) = files
        .split_first()
        .context("at least two input files are required")?;

    let mut merged = parse_mesh(first)?;
    for file in rest {
        merged.merge(parse_mesh(file)?);
    }

    merged.name = output
        .file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string);

    minimesh_core::write_stl_file(&merged, output)
        .with_context(|| format!("failed to write merged mesh to {}", output.display()))?;

    println!(
        "{} merged {} files into {} ({} triangles)",
        "✓".green(),
        files.len(),
        output.display(),
        merged.triangle_count()
    );
    Ok(())
}
