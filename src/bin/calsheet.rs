use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "calsheet", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the calibration sheet PNG (the default).
    Generate(GenerateArgs),
    /// Check the rectangle geometry of a written sheet.
    Verify(VerifyArgs),
    /// Grade a printed rectangle measured with a ruler.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Sheet config JSON. Missing fields take the reference values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font file to try before the configured chain (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Draw the rectangle only.
    #[arg(long)]
    no_labels: bool,

    /// Print which font each label size resolved to (family + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Sheet PNG to check.
    path: PathBuf,

    /// Sheet config JSON the PNG was generated from.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Measured rectangle width in inches.
    #[arg(long)]
    width: f64,

    /// Measured rectangle height in inches.
    #[arg(long)]
    height: f64,

    /// Sheet config JSON the printed sheet was generated from.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::Generate(args)) => cmd_generate(args),
        Some(Command::Verify(args)) => cmd_verify(args),
        Some(Command::Check(args)) => cmd_check(args),
        None => cmd_generate(cli.generate),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<calsheet::SheetConfig> {
    match path {
        Some(p) => Ok(calsheet::SheetConfig::from_json_file(p)?),
        None => Ok(calsheet::SheetConfig::default()),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(out) = args.out {
        cfg.output_path = out;
    }
    if !args.fonts.is_empty() {
        let mut chain: Vec<calsheet::FontSource> = args
            .fonts
            .into_iter()
            .map(|path| calsheet::FontSource::File { path })
            .collect();
        chain.append(&mut cfg.fonts);
        cfg.fonts = chain;
    }
    if args.no_labels {
        cfg.labels.enabled = false;
    }

    if args.dump_fonts {
        dump_font_diagnostics(&cfg);
    }

    let summary = calsheet::generate(&cfg)
        .with_context(|| format!("generate '{}'", cfg.output_path.display()))?;
    println!("{summary}");
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let check = calsheet::verify_png(&args.path, &cfg)?;
    if !check.is_ok() {
        anyhow::bail!("sheet '{}' failed verification: {check}", args.path.display());
    }
    println!("{}: {check}", args.path.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let expected = calsheet::PhysicalSize::new(cfg.rect_width_in, cfg.rect_height_in);
    let measured = calsheet::PhysicalSize::new(args.width, args.height);
    let report = calsheet::assess(expected, measured, cfg.rect_size_px())?;
    println!("{report}");
    Ok(())
}

fn dump_font_diagnostics(cfg: &calsheet::SheetConfig) {
    let l = &cfg.labels;
    let mut resolver = calsheet::FontResolver::new(cfg.fonts.clone());

    eprintln!("font diagnostics:");
    for (name, size) in [
        ("title", l.title_size_px),
        ("caption", l.caption_size_px),
        ("tip", l.tip_size_px),
    ] {
        let font = resolver.resolve(size);
        eprintln!("  {name} ({size} px):");
        match &font.source {
            Some(source) => eprintln!("    source: {source}"),
            None => eprintln!("    source: builtin"),
        }
        eprintln!("    family: {}", font.family());
        if let calsheet::FontFace::Outline(face) = &font.face {
            eprintln!("    sha256: {}", sha256_hex(&face.bytes));
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
