use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use vitrine::{Animator, GalleryConfig, Manifest, PoseOverride, SectionCount};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame of the gallery and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate a progress sweep and print the frames as a JSON array.
    Sweep(SweepArgs),
    /// Resolve a runtime override table and print the export snapshot.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Directory to scan for .glb files.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Explicit model file names, comma separated.
    #[arg(long, value_delimiter = ',')]
    files: Vec<String>,

    /// Fixed section count (defaults to one section per item).
    #[arg(long)]
    sections: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f32,

    /// Elapsed time per tick, seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Number of ticks to run at this progress (lets damping settle).
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Runtime overrides JSON (file name -> partial override).
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Number of evenly spaced progress samples over [0, 1].
    #[arg(long, default_value_t = 24)]
    steps: u32,

    /// Elapsed time per tick, seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Runtime overrides JSON (file name -> partial override).
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Runtime overrides JSON (file name -> partial override).
    #[arg(long)]
    overrides: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn build_manifest(args: &ManifestArgs) -> anyhow::Result<Manifest> {
    match (&args.dir, args.files.is_empty()) {
        (Some(_), false) => anyhow::bail!("pass either --dir or --files, not both"),
        (Some(dir), true) => {
            let m = Manifest::from_dir(dir)
                .with_context(|| format!("scan model dir '{}'", dir.display()))?;
            anyhow::ensure!(!m.is_empty(), "no .glb files under '{}'", dir.display());
            Ok(m)
        }
        (None, false) => Ok(Manifest::from_files(args.files.clone())),
        (None, true) => anyhow::bail!("a manifest is required: pass --dir or --files"),
    }
}

fn build_animator(args: &ManifestArgs, overrides: Option<&Path>) -> anyhow::Result<Animator> {
    let manifest = build_manifest(args)?;
    let config = GalleryConfig {
        sections: match args.sections {
            Some(n) => SectionCount::Fixed(n),
            None => SectionCount::Auto,
        },
        ..GalleryConfig::default()
    };
    config.validate()?;

    let mut animator = Animator::new(config, manifest);
    if let Some(path) = overrides {
        for (file, ov) in read_overrides_json(path)? {
            animator.set_override(file, ov);
        }
    }
    Ok(animator)
}

fn read_overrides_json(path: &Path) -> anyhow::Result<BTreeMap<String, PoseOverride>> {
    let f = File::open(path).with_context(|| format!("open overrides '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| "parse overrides JSON")
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("write output '{}'", path.display()))?;
            serde_json::to_writer_pretty(f, value)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
            println!();
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.ticks >= 1, "--ticks must be at least 1");
    let mut animator = build_animator(&args.manifest, args.overrides.as_deref())?;

    let mut frame = animator.advance(args.progress, args.dt);
    for _ in 1..args.ticks {
        frame = animator.advance(args.progress, args.dt);
    }

    write_json(&frame, args.out.as_deref())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps >= 2, "--steps must be at least 2");
    let mut animator = build_animator(&args.manifest, args.overrides.as_deref())?;

    let mut frames = Vec::with_capacity(args.steps as usize);
    for i in 0..args.steps {
        let progress = i as f32 / (args.steps - 1) as f32;
        frames.push(animator.advance(progress, args.dt));
    }

    write_json(&frames, args.out.as_deref())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut table = vitrine::OverrideTable::default();
    for (file, ov) in read_overrides_json(&args.overrides)? {
        table.replace(file, ov);
    }
    write_json(&table.export(), args.out.as_deref())
}
