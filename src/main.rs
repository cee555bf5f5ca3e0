//! Command-line demo: print the frames of a transition between two datasets.
//!
//! Usage: `chart-transition <old.json> <new.json> [steps] [options.toml]`
//!
//! Each dataset is a JSON array of series, each series an array of
//! `{"key": .., "value": ..}` entries. One JSON frame is written per line.

use std::io::Write;
use std::path::Path;

use chart_transition::animation::ManualAnimator;
use chart_transition::options::TransitionOptions;
use chart_transition::{Series, SharedDiffProcessor, TransitionController, TransitionError};

const DEFAULT_STEPS: u32 = 10;
const USAGE: &str = "chart-transition <old.json> <new.json> [steps] [options.toml]";

fn load_dataset(path: &Path) -> Result<Vec<Series>, TransitionError> {
    let content = std::fs::read_to_string(path)?;
    let dataset = serde_json::from_str(&content)?;
    Ok(dataset)
}

fn write_frame(frame: &[Series]) {
    let line = match serde_json::to_string(frame) {
        Ok(line) => line,
        Err(e) => {
            log::error!("failed to encode frame: {e}");
            return;
        }
    };
    if let Err(e) = writeln!(std::io::stdout().lock(), "{line}") {
        log::error!("failed to write frame: {e}");
    }
}

fn run() -> Result<(), TransitionError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (old_path, new_path) = match args.as_slice() {
        [old, new, ..] => (Path::new(old), Path::new(new)),
        _ => return Err(TransitionError::Usage(USAGE.to_owned())),
    };
    let steps = match args.get(2) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|e| TransitionError::Usage(format!("bad step count {raw:?}: {e}")))?
            .max(1),
        None => DEFAULT_STEPS,
    };
    let options = match args.get(3) {
        Some(path) => TransitionOptions::load(Path::new(path))?,
        None => TransitionOptions::default(),
    };

    let old = load_dataset(old_path)?;
    let new = load_dataset(new_path)?;
    log::info!(
        "transition {} -> {} series over {steps} steps ({})",
        old.len(),
        new.len(),
        options.animation.easing.name()
    );

    let processor = SharedDiffProcessor::new();
    processor.set_entries(old);

    let animator = ManualAnimator::new();
    let mut controller =
        TransitionController::with_processor(processor, Box::new(animator.clone()));
    controller.apply_options(&options.animation);
    controller.on_frame(write_frame);
    controller.update(new);

    for step in 1..=steps {
        let _ = animator.advance(step as f32 / steps as f32);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
