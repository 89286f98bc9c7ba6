use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use storyreel::{
    ArtifactSink as _, AspectRatio, CpuSurface, DirectoryDelivery, ExportPipeline, ExportProgress,
    FfmpegCapture, FfmpegCaptureOpts, FixedAdvanceMeasure, FontSet, FrameComposer, FrameIndex,
    Phase, RasterSurface as _, SleepScheduler, Speed, Stage, StoryDocument, StoryScript,
    StorySession, SystemClock, TextLayoutEngine, TextMeasure, TextSize, VisualState, Yielder,
    format_clock,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline of a story.
    Duration(DurationArgs),
    /// Render a single export frame as a PNG.
    Frame(FrameArgs),
    /// Export the story as an MP4 (requires `ffmpeg` on PATH).
    Export(ExportArgs),
    /// Play the story in real time and log what is on screen.
    Preview(PreviewArgs),
}

#[derive(clap::Args, Debug)]
struct StoryArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override scroll speed (slow, medium, fast).
    #[arg(long, value_parser = parse_speed)]
    speed: Option<Speed>,

    /// Override aspect ratio (16:9, 9:16, 1:1).
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<AspectRatio>,

    /// Override text size (small, medium, large).
    #[arg(long, value_parser = parse_text_size)]
    text_size: Option<TextSize>,
}

#[derive(clap::Args, Debug)]
struct FontArgs {
    /// Regular TTF/OTF face. Defaults to a common system font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold face for title and closing mark.
    #[arg(long)]
    bold_font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DurationArgs {
    #[command(flatten)]
    story: StoryArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Measure with a fixed per-character advance instead of a font.
    #[arg(long, default_value_t = false)]
    no_font: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    story: StoryArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    story: StoryArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Output directory; the file name is derived from the title.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Refuse to replace an existing file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    story: StoryArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Measure with a fixed per-character advance instead of a font.
    #[arg(long, default_value_t = false)]
    no_font: bool,

    /// Stop after this many seconds of wall time.
    #[arg(long)]
    seconds: Option<f64>,

    /// Ticks per second.
    #[arg(long, default_value_t = 30)]
    tick_rate: u32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Duration(args) => cmd_duration(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STORYREEL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_speed(s: &str) -> Result<Speed, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .map_err(|_| format!("unknown speed '{s}' (expected slow, medium or fast)"))
}

fn parse_aspect(s: &str) -> Result<AspectRatio, String> {
    AspectRatio::from_label(s)
        .ok_or_else(|| format!("unknown aspect ratio '{s}' (expected 16:9, 9:16 or 1:1)"))
}

fn parse_text_size(s: &str) -> Result<TextSize, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .map_err(|_| format!("unknown text size '{s}' (expected small, medium or large)"))
}

fn load(args: &StoryArgs) -> anyhow::Result<(StoryDocument, StoryScript)> {
    let mut doc = StoryDocument::read_json(&args.in_path)
        .with_context(|| format!("load story '{}'", args.in_path.display()))?;
    if let Some(speed) = args.speed {
        doc.profile.speed = speed;
    }
    if let Some(aspect) = args.aspect {
        doc.profile.aspect_ratio = aspect;
    }
    if let Some(text_size) = args.text_size {
        doc.profile.text_size = text_size;
    }
    let script = resolve_title(&doc, doc.script())?;
    Ok((doc, script))
}

#[cfg(feature = "gemini")]
fn resolve_title(doc: &StoryDocument, script: StoryScript) -> anyhow::Result<StoryScript> {
    if script.title().is_some() {
        return Ok(script);
    }
    let generator = storyreel::generate::gemini::GeminiGenerator::from_env()?;
    let title = storyreel::generate_title(&generator, &doc.content);
    tracing::info!(%title, "generated title");
    Ok(script.with_title(&title))
}

#[cfg(not(feature = "gemini"))]
fn resolve_title(_doc: &StoryDocument, script: StoryScript) -> anyhow::Result<StoryScript> {
    Ok(script)
}

fn font_set(args: &FontArgs) -> anyhow::Result<FontSet> {
    let regular = match args.font.clone() {
        Some(p) => p,
        None => storyreel::find_system_font()
            .context("no system font found; pass --font <path.ttf>")?,
    };
    Ok(FontSet::from_paths(&regular, args.bold_font.as_deref())?)
}

/// Measurement shared by every command: the same faces `frame` and `export` paint with.
fn text_measure(fonts: &FontArgs, no_font: bool) -> anyhow::Result<Box<dyn TextMeasure>> {
    if no_font {
        return Ok(Box::new(FixedAdvanceMeasure::default()));
    }
    let fonts = font_set(fonts)?;
    Ok(Box::new(TextLayoutEngine::new(&fonts, Default::default())?))
}

fn cmd_duration(args: DurationArgs) -> anyhow::Result<()> {
    let (doc, script) = load(&args.story)?;
    let mut measure = text_measure(&args.fonts, args.no_font)?;
    let composer = FrameComposer::new(
        &script,
        &doc.profile,
        measure.as_mut(),
        doc.export.background_rgba,
    )?;
    let t = composer.timeline();
    println!("title hold   0:00 - {}", format_clock(t.title_phase_end));
    println!("title fade   {} - {}", format_clock(t.title_phase_end), format_clock(t.title_fade_end));
    println!("scroll       {} - {}", format_clock(t.title_fade_end), format_clock(t.scroll_end));
    println!("credits      {} - {}", format_clock(t.scroll_end), format_clock(t.total_duration));
    println!(
        "duration     {} ({:.2}s, {} lines, {} frames @ {} fps)",
        format_clock(t.display_duration_secs() as f64),
        t.total_duration,
        composer.content().lines().len(),
        composer.frame_count(doc.export.fps),
        doc.export.fps.as_f64()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (doc, script) = load(&args.story)?;
    let fonts = font_set(&args.fonts)?;
    let mut surface = CpuSurface::new(doc.profile.canvas(), &fonts, doc.export.ink_rgba)?;
    let composer = FrameComposer::new(
        &script,
        &doc.profile,
        &mut surface,
        doc.export.background_rgba,
    )?;
    storyreel::render_frame(&mut surface, &composer, FrameIndex(args.frame), doc.export.fps)?;
    let frame = surface.read_frame()?;

    storyreel::export::artifact::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

struct LoggingYielder {
    pause: Duration,
    last_percent: u64,
}

impl Yielder for LoggingYielder {
    fn yield_now(&mut self, progress: ExportProgress) {
        let percent = (progress.fraction() * 100.0) as u64;
        if percent / 10 != self.last_percent / 10 {
            tracing::info!(
                "exporting {percent}% ({}/{} frames)",
                progress.frames_done,
                progress.frames_total
            );
        }
        self.last_percent = percent;
        std::thread::sleep(self.pause);
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (doc, script) = load(&args.story)?;
    let fonts = font_set(&args.fonts)?;
    let surface = CpuSurface::new(doc.profile.canvas(), &fonts, doc.export.ink_rgba)?;
    let capture = FfmpegCapture::new(FfmpegCaptureOpts {
        bg_rgba: doc.export.background_rgba,
        ..FfmpegCaptureOpts::default()
    });
    let mut pipeline = ExportPipeline::new(surface, capture, doc.export.clone());
    let mut yielder = LoggingYielder {
        pause: Duration::from_millis(doc.export.yield_pause_ms),
        last_percent: 0,
    };
    let artifact = pipeline.run(&script, &doc.profile, &mut yielder)?;

    let mut delivery = DirectoryDelivery::new(&args.out_dir);
    if args.no_overwrite {
        delivery = delivery.no_overwrite();
    }
    if let Some(path) = delivery.deliver(&artifact)? {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

struct LogStage {
    phase: Option<Phase>,
    lines: usize,
}

impl Stage for LogStage {
    fn apply(&mut self, state: &VisualState) {
        if self.phase != Some(state.phase) {
            tracing::info!(phase = ?state.phase, at = %format_clock(state.elapsed), "phase");
            self.phase = Some(state.phase);
        }
    }
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let (doc, script) = load(&args.story)?;
    let mut session = StorySession::new(
        script,
        doc.profile,
        text_measure(&args.fonts, args.no_font)?,
        SystemClock::new(),
        SleepScheduler::with_fps(args.tick_rate),
    )?;
    if !session.play() {
        anyhow::bail!("story is not ready: it needs a title and at least one line");
    }

    let started = std::time::Instant::now();
    let mut stage = LogStage {
        phase: None,
        lines: 0,
    };
    let mut last_second = u64::MAX;
    while let Some(id) = session.scheduler_mut().wait_next() {
        session.tick(id, &mut stage);
        let visible = session.visible_lines();
        stage.lines = visible.len();
        let second = session.playback().elapsed as u64;
        if second != last_second {
            eprintln!("{}  lines on screen: {}", session.clock_label(), stage.lines);
            last_second = second;
        }
        if args.seconds.is_some_and(|s| started.elapsed().as_secs_f64() >= s) {
            session.close();
            break;
        }
    }
    Ok(())
}
