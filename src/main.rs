//! raspicam - command-line front end for the Raspberry Pi camera tools.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use raspicam::{
    CameraCommand, CameraControls, CameraOptions, DynamicRangeCompression, Encoding,
    ExposureMode, ImageEffect, LoadOptions, MeteringMode, MockRunner, Raspistill, Raspivid,
    StillOptions, TimeUnit, TimeValue, VideoOptions, WhiteBalance,
};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "raspicam")]
#[command(about = "Raspberry Pi camera control")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Validated front end for raspistill and raspivid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with camera options, applied before command-line options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the camera command instead of running it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a single picture
    Still(StillArgs),

    /// Take pictures at a fixed interval
    Timelapse(TimelapseArgs),

    /// Record a video clip
    Video(VideoArgs),
}

/// Options shared by every camera command
#[derive(Args, Default)]
struct ImageArgs {
    /// Flip vertically and horizontally
    #[arg(long)]
    flip: bool,

    /// Flip vertically
    #[arg(long)]
    vflip: bool,

    /// Flip horizontally
    #[arg(long)]
    hflip: bool,

    /// Sharpness (-100 to 100)
    #[arg(long, allow_hyphen_values = true)]
    sharpness: Option<i32>,

    /// Contrast (-100 to 100)
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<i32>,

    /// Brightness (0 to 100)
    #[arg(long)]
    brightness: Option<i32>,

    /// Saturation (-100 to 100)
    #[arg(long, allow_hyphen_values = true)]
    saturation: Option<i32>,

    /// ISO (100 to 800)
    #[arg(long)]
    iso: Option<i32>,

    /// Exposure compensation (-10 to 10)
    #[arg(long, allow_hyphen_values = true)]
    ev: Option<i32>,

    /// Exposure mode, e.g. auto, night, sports
    #[arg(long)]
    exposure: Option<ExposureMode>,

    /// White balance mode, e.g. auto, sun, tungsten
    #[arg(long)]
    awb: Option<WhiteBalance>,

    /// Image effect, e.g. none, negative, sketch
    #[arg(long)]
    effect: Option<ImageEffect>,

    /// Metering mode: average, spot, backlit or matrix
    #[arg(long)]
    metering: Option<MeteringMode>,

    /// Dynamic range compression: off, low, medium or high
    #[arg(long)]
    drc: Option<DynamicRangeCompression>,

    /// Rotation in degrees: 0, 90, 180 or 270
    #[arg(long)]
    rotation: Option<u32>,

    /// Shutter speed in milliseconds
    #[arg(long)]
    shutter: Option<f64>,

    /// Sensor mode (0 to 7)
    #[arg(long)]
    mode: Option<i32>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Disable the preview window
    #[arg(long)]
    nopreview: bool,
}

impl ImageArgs {
    /// Command-line values as options. Unset flags stay `None` so they do
    /// not override a configuration file.
    fn to_options(&self) -> CameraOptions {
        CameraOptions {
            flip: self.flip.then_some(true),
            vertical_flip: self.vflip.then_some(true),
            horizontal_flip: self.hflip.then_some(true),
            sharpness: self.sharpness,
            contrast: self.contrast,
            brightness: self.brightness,
            saturation: self.saturation,
            iso: self.iso,
            exposure_compensation: self.ev,
            exposure: self.exposure,
            white_balance: self.awb,
            effect: self.effect,
            metering: self.metering,
            dynamic_range_compression: self.drc,
            rotate: self.rotation,
            shutter_speed: self
                .shutter
                .map(|ms| TimeValue::new(ms, TimeUnit::Millisecond)),
            sensor_mode: self.mode,
            width: self.width,
            height: self.height,
            no_preview: self.nopreview.then_some(true),
            timeout: None,
        }
    }
}

#[derive(Args)]
struct StillArgs {
    /// Output file, defaults to the current date and time
    #[arg(short, long)]
    output: Option<String>,

    /// JPEG quality (0 to 100)
    #[arg(short, long)]
    quality: Option<i32>,

    /// Add raw Bayer data to the JPEG metadata
    #[arg(long)]
    raw: bool,

    /// Encoding: jpg, bmp, gif or png
    #[arg(short, long)]
    encoding: Option<Encoding>,

    /// EXIF tag as NAME=VALUE, may be repeated
    #[arg(long = "exif", value_name = "NAME=VALUE")]
    exif: Vec<String>,

    /// Write no EXIF data
    #[arg(long)]
    no_exif: bool,

    #[command(flatten)]
    image: ImageArgs,
}

#[derive(Args)]
struct TimelapseArgs {
    /// Output pattern; %04d is replaced by the frame number
    #[arg(short, long, default_value = "image%04d.jpg")]
    output: String,

    /// Time between pictures; 0 takes pictures as fast as possible
    #[arg(short, long)]
    interval: f64,

    /// Total duration
    #[arg(short, long)]
    length: f64,

    /// Unit for interval and length: m, s, ms or us
    #[arg(short, long, default_value = "s")]
    unit: TimeUnit,

    /// JPEG quality (0 to 100)
    #[arg(short, long)]
    quality: Option<i32>,

    #[command(flatten)]
    image: ImageArgs,
}

#[derive(Args)]
struct VideoArgs {
    /// Output file, defaults to the current date and time
    #[arg(short, long)]
    output: Option<String>,

    /// Clip length
    #[arg(short, long, default_value_t = 5.0)]
    length: f64,

    /// Unit for the clip length: m, s, ms or us
    #[arg(short, long, default_value = "s")]
    unit: TimeUnit,

    /// Frames per second (2 to 90)
    #[arg(short, long)]
    framerate: Option<i32>,

    /// Bits per second
    #[arg(short, long)]
    bitrate: Option<i32>,

    /// Record in the background and stop after this many seconds
    #[arg(long, value_name = "SECONDS")]
    stop_after: Option<f64>,

    #[command(flatten)]
    image: ImageArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Commands::Still(args) => still_command(&cli, args),
        Commands::Timelapse(args) => timelapse_command(&cli, args),
        Commands::Video(args) => video_command(&cli, args),
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn default_filename(extension: &str) -> String {
    format!(
        "{}.{}",
        chrono::Local::now().format("%Y-%m-%d_%H:%M:%S"),
        extension
    )
}

fn still_camera(cli: &Cli) -> anyhow::Result<Raspistill> {
    let camera = match &cli.config {
        Some(path) => {
            info!("Loading camera options from {}", path.display());
            Raspistill::with_options(&StillOptions::from_path(path)?)?
        }
        None => Raspistill::new(),
    };
    Ok(camera)
}

fn dry_run_runner<C: CameraControls>(cli: &Cli, camera: &mut C) -> Option<MockRunner> {
    if !cli.dry_run {
        return None;
    }
    let runner = MockRunner::new();
    camera.set_runner(runner.clone());
    Some(runner)
}

fn print_dry_run(runner: &MockRunner) {
    runner
        .commands()
        .iter()
        .map(CameraCommand::to_string)
        .for_each(|line| println!("{line}"));
}

fn still_command(cli: &Cli, args: &StillArgs) -> anyhow::Result<()> {
    let mut camera = still_camera(cli)?;
    camera.apply_options(&args.image.to_options())?;

    if let Some(quality) = args.quality {
        camera.quality(quality)?;
    }
    if args.raw {
        camera.raw(true);
    }
    if let Some(encoding) = args.encoding {
        camera.encoding(encoding);
    }
    for tag in &args.exif {
        let (name, value) = tag
            .split_once('=')
            .with_context(|| format!("EXIF tag '{tag}' is not NAME=VALUE"))?;
        camera.add_exif(name, value)?;
    }
    if args.no_exif {
        camera.disable_exif();
    }

    let extension = args.encoding.map_or("jpg", Encoding::as_str);
    let filename = args
        .output
        .clone()
        .unwrap_or_else(|| default_filename(extension));

    let dry_run = dry_run_runner(cli, &mut camera);
    camera.take_picture(&filename)?;

    match dry_run {
        Some(runner) => print_dry_run(&runner),
        None => println!("Saved picture to {filename}"),
    }
    Ok(())
}

fn timelapse_command(cli: &Cli, args: &TimelapseArgs) -> anyhow::Result<()> {
    let mut camera = still_camera(cli)?;
    camera.apply_options(&args.image.to_options())?;

    if let Some(quality) = args.quality {
        camera.quality(quality)?;
    }

    let dry_run = dry_run_runner(cli, &mut camera);
    camera.start_timelapse(&args.output, args.interval, args.length, args.unit)?;

    match dry_run {
        Some(runner) => print_dry_run(&runner),
        None => println!("Saved timelapse to {}", args.output),
    }
    Ok(())
}

fn video_command(cli: &Cli, args: &VideoArgs) -> anyhow::Result<()> {
    let mut camera = match &cli.config {
        Some(path) => {
            info!("Loading camera options from {}", path.display());
            Raspivid::with_options(&VideoOptions::from_path(path)?)?
        }
        None => Raspivid::new(),
    };
    camera.apply_options(&args.image.to_options())?;

    if let Some(framerate) = args.framerate {
        camera.framerate(framerate)?;
    }
    if let Some(bitrate) = args.bitrate {
        camera.bitrate(bitrate)?;
    }

    let filename = args
        .output
        .clone()
        .unwrap_or_else(|| default_filename("h264"));
    let dry_run = dry_run_runner(cli, &mut camera);

    match args.stop_after {
        Some(seconds) => {
            let wait = Duration::try_from_secs_f64(seconds)
                .context("--stop-after must be a non-negative number of seconds")?;

            camera.output_file(&filename)?;
            camera.timeout(args.length, args.unit)?;
            camera.start()?;
            info!("Recording in the background for {:?}", wait);

            thread::sleep(wait);
            camera.stop()?;
        }
        None => camera.record_video(&filename, args.length, args.unit)?,
    }

    match dry_run {
        Some(runner) => print_dry_run(&runner),
        None => println!("Saved video to {filename}"),
    }
    Ok(())
}
