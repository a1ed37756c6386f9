use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the derived timing schedule without rendering anything.
    Timing(TimingArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TimingArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Timing(args) => cmd_timing(args),
    }
}

fn read_project_json(path: &Path) -> anyhow::Result<slidecast::ProjectSpec> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: slidecast::ProjectSpec =
        serde_json::from_reader(r).with_context(|| "parse project JSON")?;
    Ok(spec)
}

fn prepare(in_path: &Path) -> anyhow::Result<slidecast::RenderConfig> {
    let spec = read_project_json(in_path)?;
    let root = in_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(slidecast::prepare_config(&spec, root)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = prepare(&args.in_path)?;
    let frame = slidecast::render_frame(slidecast::FrameIndex(args.frame), &config)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = prepare(&args.in_path)?;
    let stats = slidecast::export_to_mp4(&config, &args.out, slidecast::ExportOpts::default())?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_delivered
    );
    Ok(())
}

fn cmd_timing(args: TimingArgs) -> anyhow::Result<()> {
    let config = prepare(&args.in_path)?;
    let info = slidecast::timing_breakdown(&config);

    eprintln!("images:             {}", config.images.len());
    eprintln!("total frames:       {}", config.export.total_frames());
    eprintln!("hold per image:     {:.3} s", info.hold_per_image);
    eprintln!("transition:         {:.3} s", info.transition_seconds);
    eprintln!("time per cycle:     {:.3} s", info.time_per_cycle);
    eprintln!("total cycles:       {:.3}", info.total_cycles);
    Ok(())
}
