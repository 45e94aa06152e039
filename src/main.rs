use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clipseg::catalog::Catalog;
use clipseg::cli::{
    CatalogArgs, Cli, Command, InteractionArgs, OutputFormat, ResolvedInput, SegmentArgs,
};
use clipseg::config::AppConfig;
use clipseg::interactions::InteractionLog;
use clipseg::report::{render_segments, render_views};
use clipseg::segmenter::Segmenter;
use clipseg::transcription::{DirectorySource, FileSource, TranscriptSource};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Segment(args) => handle_segment(&args),
        Command::Catalog(args) => handle_catalog(&args),
        Command::Interactions(args) => handle_interactions(&args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_segment(args: &SegmentArgs) -> Result<()> {
    let mut config = AppConfig::from_override(args.window.config.clone())
        .context("Failed to load segmentation settings")?;
    args.window.apply(&mut config.settings)?;
    let settings = config.settings;
    let segmenter =
        Segmenter::from_settings(&settings).context("Segmentation settings are invalid")?;

    let input = args.input.resolve(Catalog::builtin())?;
    let (source, video_id, subject): (Box<dyn TranscriptSource>, String, Option<String>) =
        match input {
            ResolvedInput::File(path) => {
                let video_id = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "transcript".to_string());
                (
                    Box::new(FileSource::new(path)) as Box<dyn TranscriptSource>,
                    video_id,
                    None,
                )
            }
            ResolvedInput::Directory {
                root,
                video_id,
                subject,
            } => (
                Box::new(DirectorySource::new(root)) as Box<dyn TranscriptSource>,
                video_id,
                subject,
            ),
        };
    let category = args
        .category
        .clone()
        .or(subject)
        .unwrap_or_else(|| settings.label_pools().default_category.clone());

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, video_id = %video_id, category = %category, mode = ?settings.mode, "segmenting");
    let mut rng = StdRng::seed_from_u64(seed);

    if args.views {
        let views = segmenter
            .views_from_source(source.as_ref(), &video_id, &category, &mut rng)
            .with_context(|| format!("Failed to segment video {}", video_id))?;
        if views.is_empty() {
            warn!(video_id = %video_id, "no segments produced");
        }
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
            OutputFormat::Text => {
                print_header(&video_id, &category, seed);
                print!("{}", render_views(&views));
            }
        }
        return Ok(());
    }

    let segments = segmenter
        .segment_from_source(source.as_ref(), &video_id, &category, &mut rng)
        .with_context(|| format!("Failed to segment video {}", video_id))?;
    if segments.is_empty() {
        warn!(video_id = %video_id, "no segments produced");
    }
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&segments)?),
        OutputFormat::Text => {
            print_header(&video_id, &category, seed);
            print!("{}", render_segments(&segments));
        }
    }
    Ok(())
}

fn print_header(video_id: &str, category: &str, seed: u64) {
    println!("Video: {}", video_id);
    println!("Category: {}", category);
    println!("Seed: {}", seed);
    println!();
}

fn handle_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = Catalog::builtin();
    let grades: Vec<u8> = match args.grade {
        Some(grade) => vec![grade],
        None => catalog.grades().collect(),
    };
    for grade in grades {
        let subjects = catalog.subjects(grade);
        if subjects.is_empty() {
            anyhow::bail!("No catalog entries for grade {}", grade);
        }
        println!("Grade {}", grade);
        for subject in subjects {
            println!("  {}", subject);
            for (position, entry) in catalog.videos(grade, subject).iter().enumerate() {
                println!("    {}. {} [{}]", position + 1, entry.title, entry.video_id);
                println!("       {}", entry.description);
            }
        }
    }
    Ok(())
}

fn handle_interactions(args: &InteractionArgs) -> Result<()> {
    let log = InteractionLog::load(&args.log)?;
    print!("{}", log.render());
    Ok(())
}
