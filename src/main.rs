//! Endless Runner entry point
//!
//! Headless build: runs the simulation in attract mode (autopilot) and logs
//! the HUD. A config file may be passed as the first argument or through
//! `RUNNER_CONFIG`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use endless_runner::persistence::FileStore;
use endless_runner::platform::{Clock, DemoInput, FixedClock, SystemClock};
use endless_runner::renderer::LogRenderer;
use endless_runner::sim::WorldState;
use endless_runner::{App, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Endless Runner starting...");

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(Settings::CONFIG_ENV).map(PathBuf::from));
    let settings = Settings::load(config_path.as_deref());

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {}", seed);

    let clock: Box<dyn Clock> = if settings.realtime {
        Box::new(SystemClock::new(settings.target_fps))
    } else {
        Box::new(FixedClock::new(settings.frame_dt()))
    };

    let store = FileStore::new(&settings.best_score_path);
    log::info!("Best score file: {}", store.path().display());

    let mut app = App::new(
        WorldState::new(seed, settings.tuning.clone()),
        clock,
        DemoInput::new(settings.demo_runs),
        LogRenderer::new(settings.hud_log_every),
        store,
    );

    // Every run ends at the goal wall at the latest, so this only guards
    // against a pathological config
    let max_frames = settings.target_fps as u64 * 600 * settings.demo_runs.max(1) as u64;
    app.run(Some(max_frames));

    let session = &app.world.session;
    log::info!(
        "Done: {} runs, last score {}, best {}",
        session.runs,
        session.score(),
        session.best_score()
    );
}
