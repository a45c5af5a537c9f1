use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use reelsmith::{
    CaptionConfig, Frame, ImageFileSupplier, KeyFrameSupplier, OpenAiClient, OpenAiEnhancer,
    OpenAiImageSupplier, OpenAiSpeech, Pipeline, PipelineConfig, Quality, TextCompositor,
};

#[derive(Parser, Debug)]
#[command(name = "reelsmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a narrated MP4 from a text prompt (requires `ffmpeg` on PATH).
    Generate(GenerateArgs),
    /// Burn a caption and watermark into a single image.
    Caption(CaptionArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Video description.
    #[arg(long)]
    prompt: String,

    /// Target duration in seconds (5 to 30).
    #[arg(long, default_value_t = 10.0, value_parser = parse_duration)]
    duration: f64,

    /// Image quality: draft, standard or high.
    #[arg(long, default_value = "standard")]
    quality: Quality,

    /// Output MP4 path. Defaults to the configured output path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pipeline configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local key frame image; repeat for more. Skips image generation.
    #[arg(long = "key-frame")]
    key_frames: Vec<PathBuf>,

    /// Use the prompt verbatim.
    #[arg(long, default_value_t = false)]
    no_enhance: bool,

    /// Produce a silent video.
    #[arg(long, default_value_t = false)]
    no_narration: bool,

    /// Write the subtitle track to this `.srt` file.
    #[arg(long)]
    subtitles: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CaptionArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption text.
    #[arg(long)]
    text: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pipeline configuration JSON (only the caption section is used).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave the watermark out.
    #[arg(long, default_value_t = false)]
    no_watermark: bool,
}

fn parse_duration(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|e| format!("invalid duration '{s}': {e}"))?;
    reelsmith::validate_duration(secs).map_err(|e| e.to_string())?;
    Ok(secs)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let cli = Cli::parse();
    let res = match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Caption(args) => cmd_caption(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PipelineConfig> {
    Ok(match path {
        Some(p) => PipelineConfig::from_path(p)?,
        None => PipelineConfig::default(),
    })
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(subs) = args.subtitles.clone() {
        config.subtitle_path = Some(subs);
    }

    let needs_remote = args.key_frames.is_empty() || !args.no_enhance || !args.no_narration;
    let client = if needs_remote {
        match OpenAiClient::from_env(config.openai.clone()) {
            Ok(c) => Some(Arc::new(c)),
            Err(e) if !args.key_frames.is_empty() => {
                tracing::warn!(error = %e, "no API client; enhancement and narration are disabled");
                None
            }
            Err(e) => return Err(e).context("image generation needs an API client"),
        }
    } else {
        None
    };

    let supplier: Box<dyn KeyFrameSupplier> = match (&client, args.key_frames.is_empty()) {
        (_, false) => Box::new(ImageFileSupplier::new(args.key_frames.clone())?),
        (Some(c), true) => Box::new(OpenAiImageSupplier::new(c.clone())),
        (None, true) => anyhow::bail!("no key frame source available"),
    };

    let mut pipeline = Pipeline::new(config)?;
    if let Some(c) = client.as_ref() {
        if !args.no_enhance {
            pipeline = pipeline.with_enhancer(Arc::new(OpenAiEnhancer::new(c.clone())));
        }
        if !args.no_narration {
            pipeline = pipeline.with_narrator(Arc::new(OpenAiSpeech::new(c.clone())));
        }
    }

    let report = pipeline.run_with_report(
        &args.prompt,
        args.duration,
        args.quality,
        supplier.as_ref(),
        args.out.as_deref(),
    )?;

    if let Some(reason) = report.silent_reason.as_deref() {
        eprintln!("note: video has no narration ({reason})");
    }
    if let Some(subs) = report.subtitle_path.as_ref() {
        eprintln!("wrote {}", subs.display());
    }
    eprintln!(
        "wrote {} ({} frames at {} fps)",
        report.output.path.display(),
        report.output.frame_count,
        report.output.frame_rate
    );
    Ok(())
}

fn cmd_caption(args: CaptionArgs) -> anyhow::Result<()> {
    let caption: CaptionConfig = load_config(args.config.as_ref())?.caption;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let frame = Frame::decode(&bytes)?;

    let mut compositor = TextCompositor::new(caption)?;
    let out = compositor.compose(&frame, &args.text, !args.no_watermark)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        out.as_rgb8(),
        out.width(),
        out.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
