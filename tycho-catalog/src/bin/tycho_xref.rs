use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;
use std::path::PathBuf;
use std::time::Instant;
use tycho_catalog::query::{CatalogRecord, CatalogSearchEngine, SearchConfig, DEFAULT_MAX_RESULTS};
use tycho_catalog::xref::{self, HdMapping};

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "tycho-xref")]
#[command(about = "Cross-reference the Bright Star Catalogue against Tycho-2")]
#[command(version)]
struct Cli {
    /// Region index file (one "<first>; <last>" line per tyc1 group)
    #[arg(long)]
    index: PathBuf,

    /// Tycho-2 binary catalog (33-byte records)
    #[arg(long)]
    catalog: PathBuf,

    /// Log level spec, e.g. "info" or "debug,tycho_catalog::query=trace"
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Maximum candidate records decoded per region scan
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print region index statistics
    Info,
    /// Look up a single Tycho-2 identifier
    Lookup {
        /// Group id (tyc1)
        #[arg(allow_hyphen_values = true)]
        id1: i16,
        /// Number within group (tyc2)
        #[arg(allow_hyphen_values = true)]
        id2: i16,
        /// Component (tyc3), a single character
        id3: char,
        /// Print lookup timing
        #[arg(long)]
        timing: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Cross-reference a BSC file and write the corrected catalog
    Xref {
        /// Bright Star Catalogue (fixed-width BSC5 format)
        #[arg(long)]
        bsc: PathBuf,
        /// HD to Tycho-2 mapping ("<hd> <id1> <id2> <id3>" per line)
        #[arg(long)]
        map: PathBuf,
        /// Cross-reference output ("<hr> <id1>-<id2>-<id3>" per line)
        #[arg(long)]
        xref_out: PathBuf,
        /// Corrected BSC output
        #[arg(long)]
        bsc_out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_str(&cli.log_level)
        .with_context(|| format!("Invalid log level: {}", cli.log_level))?
        .log_to_stderr()
        .start()
        .context("Failed to start logger")?;

    let mut engine = CatalogSearchEngine::open(&cli.index, &cli.catalog)
        .with_context(|| format!("Failed to open catalog {:?} with index {:?}", cli.catalog, cli.index))?
        .with_config(SearchConfig {
            max_results: cli.max_results,
        });

    match cli.command {
        Commands::Info => {
            println!("{}", engine.index());
            let size = engine.file_len();
            println!(
                "Catalog size: {} bytes ({:.2} MB)",
                size,
                size as f64 / 1_048_576.0
            );
        }
        Commands::Lookup {
            id1,
            id2,
            id3,
            timing,
            format,
        } => {
            let id3 = u8::try_from(u32::from(id3))
                .map_err(|_| anyhow::anyhow!("id3 must be a single-byte character, got {:?}", id3))?;

            let start = if timing { Some(Instant::now()) } else { None };
            let found = engine.lookup(id1, id2, id3)?;
            if let Some(start_time) = start {
                eprintln!(
                    "Lookup completed in {:.3} ms",
                    start_time.elapsed().as_secs_f64() * 1000.0
                );
            }

            match format {
                OutputFormat::Table => print_table(found.as_ref()),
                OutputFormat::Json => print_json(found.as_ref())?,
                OutputFormat::Csv => print_csv(found.as_ref()),
            }
        }
        Commands::Xref {
            bsc,
            map,
            xref_out,
            bsc_out,
        } => {
            let mapping = HdMapping::open(&map)
                .with_context(|| format!("Failed to load HD mapping {:?}", map))?;
            let stats = xref::run_files(&mut engine, &mapping, &bsc, &xref_out, &bsc_out)
                .with_context(|| format!("Cross-reference of {:?} failed", bsc))?;
            println!("{}", stats);
        }
    }

    Ok(())
}

fn print_table(found: Option<&CatalogRecord>) {
    match found {
        Some(r) => println!("TYC {}  Mag={:5.2}", r.tyc_id(), r.magnitude),
        None => println!("No record found."),
    }
}

#[derive(serde::Serialize)]
struct JsonRecord {
    tyc: String,
    id1: i16,
    id2: i16,
    id3: String,
    magnitude: f32,
}

fn print_json(found: Option<&CatalogRecord>) -> anyhow::Result<()> {
    let record = found.map(|r| JsonRecord {
        tyc: r.tyc_id().to_string(),
        id1: r.id1,
        id2: r.id2,
        id3: r.id3_char().to_string(),
        magnitude: r.magnitude,
    });
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn print_csv(found: Option<&CatalogRecord>) {
    println!("id1,id2,id3,magnitude");
    if let Some(r) = found {
        println!("{},{},{},{}", r.id1, r.id2, r.id3_char(), r.magnitude);
    }
}
