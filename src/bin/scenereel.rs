use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scenereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in durations, animations and styles and print the resolved document.
    Expand(ExpandArgs),
    /// Print the composition descriptor and per-segment frame intervals.
    Timeline(TimelineArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ExpandArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the resolved document here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Speaking rate used to estimate missing durations.
    #[arg(long)]
    wpm: Option<f64>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Frames per second.
    #[arg(long, default_value_t = scenereel::DEFAULT_FPS)]
    fps: u32,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = scenereel::DEFAULT_CANVAS.width)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = scenereel::DEFAULT_CANVAS.height)]
    height: u32,

    /// Speaking rate used to estimate missing durations.
    #[arg(long)]
    wpm: Option<f64>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// TTF/OTF file used for all text.
    #[arg(long)]
    font: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// TTF/OTF file used for all text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Reuse pixels of frames whose content did not change.
    #[arg(long)]
    static_frame_elision: bool,

    #[command(flatten)]
    output: OutputArgs,
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
        Command::Expand(args) => cmd_expand(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_document(path: &Path, wpm: Option<f64>) -> anyhow::Result<scenereel::TimelineDocument> {
    let def = scenereel::TimelineDef::from_path(path)
        .with_context(|| format!("read timeline '{}'", path.display()))?;
    let mut defaults = scenereel::ExpandDefaults::default();
    if let Some(wpm) = wpm {
        defaults.words_per_minute = wpm;
    }
    let doc = scenereel::expand(&def, &defaults)
        .with_context(|| format!("expand timeline '{}'", path.display()))?;
    Ok(doc)
}

fn assemble(in_path: &Path, output: &OutputArgs) -> anyhow::Result<scenereel::Assembly> {
    let doc = read_document(in_path, output.wpm)?;
    let fps = scenereel::Fps::whole(output.fps)?;
    Ok(scenereel::assemble(doc, fps)?)
}

fn prepare_assets(
    in_path: &Path,
    assembly: &scenereel::Assembly,
    font: Option<&Path>,
) -> anyhow::Result<scenereel::AssetStore> {
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut assets = scenereel::AssetStore::prepare(assembly.document(), assets_root)?;
    if let Some(font) = font {
        assets = assets
            .with_font_file(font)
            .with_context(|| format!("load font '{}'", font.display()))?;
    }
    Ok(assets)
}

fn cmd_expand(args: ExpandArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, args.wpm)?;
    let json = doc.to_json_pretty()?;
    match args.out {
        Some(out) => {
            scenereel::ensure_parent_dir(&out)?;
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct TimelineReport<'a> {
    composition: scenereel::CompositionDescriptor,
    layout: &'a scenereel::TimelineLayout,
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let assembly = assemble(&args.in_path, &args.output)?;
    let canvas = scenereel::Canvas::new(args.output.width, args.output.height)?;
    let report = TimelineReport {
        composition: assembly.descriptor(canvas),
        layout: assembly.layout(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let assembly = assemble(&args.in_path, &args.output)?;
    let assets = prepare_assets(&args.in_path, &assembly, args.font.as_deref())?;
    let canvas = scenereel::Canvas::new(args.output.width, args.output.height)?;
    let mut backend = scenereel::CpuRasterizer::new(canvas, &assets)?;

    let frame = scenereel::render_frame(
        &assembly,
        scenereel::FrameIndex(args.frame),
        &mut backend,
        &assets,
    )?;

    scenereel::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &unpremultiply(&frame.data),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !scenereel::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg was not found on PATH");
    }

    let assembly = assemble(&args.in_path, &args.output)?;
    let assets = prepare_assets(&args.in_path, &assembly, args.font.as_deref())?;
    let canvas = scenereel::Canvas::new(args.output.width, args.output.height)?;
    let mut backend = scenereel::CpuRasterizer::new(canvas, &assets)?;

    let opts = scenereel::RenderOpts {
        range: None,
        static_frame_elision: args.static_frame_elision,
    };
    let stats = scenereel::render_to_mp4(&assembly, &args.out, &opts, &mut backend, &assets)?;

    eprintln!(
        "wrote {} ({} frames, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_elided
    );
    Ok(())
}

fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
