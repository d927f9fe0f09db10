mod logger;

use std::{
    path::Path,
    sync::mpsc,
    time::{Duration, Instant},
};

use clap::{App, Arg, ArgMatches};
use log::{error, info, LevelFilter};
use notify::Watcher;
use thiserror::Error;
use whitted::loader::{self, LoadError};

#[derive(Debug, Error)]
enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to save image: {0}")]
    Save(#[from] image::ImageError),

    #[error("invalid value for --{0}: {1}")]
    InvalidArgument(&'static str, String),
}

fn parse_arg<T: std::str::FromStr>(
    matches: &ArgMatches,
    name: &'static str,
) -> Result<Option<T>, RenderError> {
    matches
        .value_of(name)
        .map(|v| {
            v.parse()
                .map_err(|_| RenderError::InvalidArgument(name, v.to_string()))
        })
        .transpose()
}

fn render(matches: &ArgMatches) -> Result<(), RenderError> {
    let source = matches.value_of("SCENE").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or("render.png");

    let now = Instant::now();
    let mut scene = loader::load_scene(source)?;

    // command line tunables win over the scene file
    if let Some(depth) = parse_arg(matches, "depth")? {
        scene.options.max_depth = depth;
    }
    if let Some(bias) = parse_arg(matches, "shadow-bias")? {
        scene.options.shadow_bias = bias;
    }
    if let Some(bias) = parse_arg(matches, "reflection-bias")? {
        scene.options.reflection_bias = bias;
    }

    info!(
        "Scene constructed in {:.2?}: {} objects, {} lights",
        now.elapsed(),
        scene.objects.len(),
        scene.lights.len()
    );

    scene.render_to(output)?;
    info!("Wrote {} in {:.2?}", output, now.elapsed());

    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    match parse_arg::<usize>(matches, "threads")? {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| RenderError::InvalidArgument("threads", e.to_string()))?
            .install(|| render(matches)),
        None => render(matches),
    }
}

fn watch(matches: &ArgMatches) -> Result<(), notify::Error> {
    let source = matches.value_of("SCENE").unwrap_or_default();

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::watcher(tx, Duration::from_millis(500))?;
    watcher.watch(Path::new(source), notify::RecursiveMode::NonRecursive)?;

    info!("Now listening for file changes at {}", source);
    for event in rx {
        if let notify::DebouncedEvent::Write(_) = event {
            if let Err(e) = run(matches) {
                error!("Failed to render: {}", e);
            }
        }
    }

    Ok(())
}

fn main() {
    let matches = App::new("whitted")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a scene file with recursive ray tracing")
        .arg(
            Arg::with_name("SCENE")
                .help("The scene file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .help("The output image; the format follows the extension")
                .default_value("render.png"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("j")
                .takes_value(true)
                .help("Number of render threads (defaults to one per core)"),
        )
        .arg(
            Arg::with_name("depth")
                .long("depth")
                .takes_value(true)
                .help("Override the scene's maximum reflection depth"),
        )
        .arg(
            Arg::with_name("shadow-bias")
                .long("shadow-bias")
                .takes_value(true)
                .help("Offset of shadow ray origins towards the light"),
        )
        .arg(
            Arg::with_name("reflection-bias")
                .long("reflection-bias")
                .takes_value(true)
                .help("Offset of reflected ray origins along the surface normal"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .default_value("info")
                .help("Set the logging level"),
        )
        .arg(
            Arg::with_name("watch")
                .long("watch")
                .short("w")
                .help("Rerender whenever the scene file is saved"),
        )
        .get_matches();

    let level = matches
        .value_of("log-level")
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info);
    logger::init_logger(level);

    let result = run(&matches);
    if let Err(e) = &result {
        error!("Failed to render: {}", e);
    }

    if matches.is_present("watch") {
        if let Err(e) = watch(&matches) {
            error!("Failed to watch scene file: {}", e);
            std::process::exit(1);
        }
    } else if result.is_err() {
        std::process::exit(1);
    }
}
