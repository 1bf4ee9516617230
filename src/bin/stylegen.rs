use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stylegen", version)]
struct Cli {
    /// Log generator activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate CSS (and SVG, for curve and blob tools) from a tool config JSON.
    Generate(GenerateArgs),
    /// Print the path data of a seeded blob.
    Blob(BlobArgs),
    /// Print coordinate pairs found in SVG path text, as JSON.
    Points(PointsArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input tool config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory for generated SVG files. Without it SVG output is discarded.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BlobArgs {
    #[arg(long)]
    seed: u32,

    /// Anchor count (3..=12).
    #[arg(long, default_value_t = 6)]
    complexity: u32,

    /// Radius variance (0, 1].
    #[arg(long, default_value_t = 0.5)]
    contrast: f64,
}

#[derive(Parser, Debug)]
struct PointsArgs {
    /// SVG path `d` text.
    path: String,
}

/// Stdout stands in for the clipboard; files land in a directory.
struct FsSink {
    out_dir: Option<PathBuf>,
}

impl stylegen::OutputSink for FsSink {
    fn emit_file(&mut self, bytes: &[u8], filename: &str) -> stylegen::StyleResult<()> {
        stylegen::sink::validate_filename(filename)?;
        let Some(dir) = &self.out_dir else {
            tracing::debug!(filename, "no output directory; skipping file");
            return Ok(());
        };
        std::fs::create_dir_all(dir).map_err(|e| {
            stylegen::StyleError::sink(format!("create output dir '{}': {e}", dir.display()))
        })?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes).map_err(|e| {
            stylegen::StyleError::sink(format!("write '{}': {e}", path.display()))
        })?;
        eprintln!("wrote {}", path.display());
        Ok(())
    }

    fn copy_text(&mut self, text: &str) -> stylegen::StyleResult<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}").map_err(|e| stylegen::StyleError::sink(e.to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Blob(args) => cmd_blob(args),
        Command::Points(args) => cmd_points(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_tool_json(path: &Path) -> anyhow::Result<stylegen::ToolConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: stylegen::ToolConfig =
        serde_json::from_reader(r).with_context(|| "parse tool config JSON")?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = read_tool_json(&args.in_path)?;
    let out = cfg
        .generate()
        .with_context(|| format!("generate {}", cfg.name()))?;
    let mut sink = FsSink {
        out_dir: args.out_dir,
    };
    out.deliver(&mut sink)?;
    Ok(())
}

fn cmd_blob(args: BlobArgs) -> anyhow::Result<()> {
    let d = stylegen::blob_path(args.complexity, args.contrast, args.seed)?;
    println!("{d}");
    Ok(())
}

fn cmd_points(args: PointsArgs) -> anyhow::Result<()> {
    let set = stylegen::extract_points(&args.path);
    println!("{}", serde_json::to_string(&set)?);
    Ok(())
}
