mod model;
mod render;

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant};

use faceplate_core::config::Config;
use faceplate_core::pipeline::{DisplayPipeline, PipelineSettings};
use faceplate_core::wavetable::WavetableScrubber;

use render::RenderLoop;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("faceplate")
        .join("faceplate.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/faceplate.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("faceplate: logging disabled, cannot create log file: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        eprintln!("faceplate: logger already initialized");
        return;
    }

    log::info!("faceplate starting (log level: {:?})", log_level);
}

#[cfg(target_os = "linux")]
fn start_pipeline(
    settings: &PipelineSettings,
) -> std::io::Result<(DisplayPipeline, faceplate_core::pipeline::DisplayHandles)> {
    DisplayPipeline::start_mqueue(settings)
}

#[cfg(not(target_os = "linux"))]
fn start_pipeline(
    settings: &PipelineSettings,
) -> std::io::Result<(DisplayPipeline, faceplate_core::pipeline::DisplayHandles)> {
    log::warn!("message queues unavailable, running on in-process channels");
    let (pipeline, handles, _ui, _samples) = DisplayPipeline::start_local(settings)?;
    Ok((pipeline, handles))
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    // --run-for <seconds> exits after a fixed time; otherwise run until the
    // workers stop.
    let deadline = args
        .iter()
        .position(|a| a == "--run-for")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    let config = Config::load();
    let settings = PipelineSettings::from_config(&config);
    let scrubber = Arc::new(WavetableScrubber::new(
        config.wavetable_dir(),
        config.scrub_timing(),
    ));

    let (pipeline, handles) = start_pipeline(&settings)?;
    let mut render = RenderLoop::new(handles, scrubber, config.scope_refresh());
    render.run(deadline);

    log::info!(
        "faceplate exiting (screen {:?}, scope {}, {} activity changes)",
        render.model().screen,
        if render.scope_trace().is_some() { "drawn" } else { "idle" },
        render.model().activity_count
    );
    pipeline.shutdown();
    Ok(())
}
