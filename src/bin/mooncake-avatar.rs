//! Command-line front end: turns a photo into a festive avatar PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use mooncake_avatar::{
    AvatarError, AvatarResult, AvatarSession, Configurable, DEFAULT_EXPORT_FILENAME, MotifKind,
    StarField, StyleProfile,
};
use tracing::{Level, error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Composite a photo into a Mid-Autumn festival avatar")]
struct Args {
    /// Photo to use (PNG, JPEG, WebP, ...).
    #[arg(short, long, required_unless_present = "dump_profile")]
    input: Option<PathBuf>,

    /// Where to write the PNG.
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILENAME)]
    output: PathBuf,

    /// Motif family: none, celestial, small-animal, festive-cake or lantern.
    #[arg(short, long)]
    motif: Option<MotifKind>,

    /// Portrait roundness, 0-100. 45 and above is a circle.
    #[arg(long)]
    roundness: Option<f32>,

    /// Motif scale in percent.
    #[arg(long)]
    scale: Option<f32>,

    /// Caption text. Empty text uses the default greeting.
    #[arg(long)]
    caption: Option<String>,

    /// Leave the caption off.
    #[arg(long, conflicts_with = "caption")]
    no_caption: bool,

    /// Seed for the star field; omit for new stars on every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Extra font files for the caption (repeatable).
    #[arg(long)]
    font: Vec<PathBuf>,

    /// JSON style profile applied before the other options.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Print the effective style profile as JSON.
    #[arg(long)]
    dump_profile: bool,

    /// More logging (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "failed to create avatar");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> AvatarResult<()> {
    let mut session = AvatarSession::new()?;
    for font in &args.font {
        session.text_renderer_mut().load_font_file(font)?;
    }

    if let Some(path) = &args.profile {
        let json = std::fs::read_to_string(path)?;
        session.apply_profile(&StyleProfile::from_json(&json)?);
    }
    if let Some(motif) = args.motif {
        session.set_motif(motif);
    }
    if let Some(roundness) = args.roundness {
        session.set_roundness(roundness);
    }
    if let Some(scale) = args.scale {
        session.set_decoration_scale(scale);
    }
    if args.no_caption {
        let text = session.params().caption_text.clone();
        session.set_caption(false, text);
    } else if let Some(text) = args.caption {
        session.set_caption(true, text);
    }
    if let Some(seed) = args.seed {
        let count = session.pipeline.background.stars.count;
        session.set_star_field(StarField {
            count,
            seed: Some(seed),
        });
    }

    if args.dump_profile {
        println!("{}", session.export_profile().to_json_pretty()?);
    }

    let Some(input) = args.input else {
        return Ok(());
    };
    let bytes = std::fs::read(&input)?;
    session.load_bytes(&bytes)?;

    let png = session
        .export_png()?
        .ok_or_else(|| AvatarError::encode("no photo loaded"))?;
    std::fs::write(&args.output, png)?;
    info!(output = %args.output.display(), "avatar written");
    Ok(())
}
