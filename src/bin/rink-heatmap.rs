use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rink_heatmap::{
    DensityConfig, DensityLayer, DisplayScale, PixmapSurface, Point, RecordingSurface,
    RenderDimensions, Rgba8, parse_hex, parse_records,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rink-heatmap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the fully faded-in heatmap as a PNG.
    Render(RenderArgs),
    /// Render every animation frame as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Print the grid cell under a pointer position as JSON.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct LayerArgs {
    /// Input JSON array of point records.
    #[arg(long)]
    points: PathBuf,

    /// Layer configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 820)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 370)]
    height: u32,

    /// Margin on every side, in pixels.
    #[arg(long, default_value_t = 10.0)]
    margin: f64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Background color (`#rrggbb` or `#rrggbbaa`); transparent when omitted.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second of the sequence.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Background color (`#rrggbb` or `#rrggbbaa`); transparent when omitted.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    layer: LayerArgs,

    /// Pointer x, in displayed pixels.
    #[arg(long)]
    x: f64,

    /// Pointer y, in displayed pixels.
    #[arg(long)]
    y: f64,

    /// Width the surface is displayed at (defaults to its intrinsic width).
    #[arg(long)]
    display_width: Option<f64>,

    /// Height the surface is displayed at (defaults to its intrinsic height).
    #[arg(long)]
    display_height: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_layer(args: &LayerArgs, animate: bool) -> anyhow::Result<DensityLayer> {
    let mut config = match &args.config {
        Some(path) => DensityConfig::from_path(path)?,
        None => DensityConfig::default(),
    };
    if !animate {
        config.animate = false;
    }

    let json = std::fs::read_to_string(&args.points)
        .with_context(|| format!("read points '{}'", args.points.display()))?;
    let records = parse_records(&json)?;

    let dims = RenderDimensions::fit(f64::from(args.width), f64::from(args.height), args.margin)?;
    let mut layer = DensityLayer::new(config, dims)?;
    layer.set_point_records(&records);
    tracing::debug!(
        records = records.len(),
        points = layer.points().len(),
        "loaded points"
    );
    Ok(layer)
}

fn background(arg: Option<&str>) -> anyhow::Result<Option<Rgba8>> {
    arg.map(|s| parse_hex(s).map_err(|e| anyhow::anyhow!("invalid --background: {e}")))
        .transpose()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut layer = load_layer(&args.layer, false)?;
    let mut surface = PixmapSurface::new(args.layer.width, args.layer.height)?
        .with_background(background(args.background.as_deref())?);
    layer.render(Duration::ZERO, &mut surface)?;
    surface.frame().save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let mut layer = load_layer(&args.layer, true)?;
    let mut surface = PixmapSurface::new(args.layer.width, args.layer.height)?
        .with_background(background(args.background.as_deref())?);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out_dir: &Path = &args.out_dir;
    let interval = Duration::from_secs(1) / args.fps;
    let frames = layer.render_to_completion(Duration::ZERO, interval, &mut surface, |i, s| {
        s.frame()
            .save_png(&out_dir.join(format!("frame_{i:04}.png")))
    })?;

    eprintln!("wrote {frames} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut layer = load_layer(&args.layer, false)?;
    layer.render(Duration::ZERO, &mut RecordingSurface::default())?;

    let intrinsic = rink_heatmap::Vec2::new(
        f64::from(args.layer.width),
        f64::from(args.layer.height),
    );
    let displayed = rink_heatmap::Vec2::new(
        args.display_width.unwrap_or(intrinsic.x),
        args.display_height.unwrap_or(intrinsic.y),
    );
    let hit = layer.hit_test(
        Point::new(args.x, args.y),
        DisplayScale::from_sizes(intrinsic, displayed),
    );

    println!("{}", serde_json::to_string_pretty(&hit)?);
    Ok(())
}
