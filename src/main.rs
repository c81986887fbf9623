//! Bricker - headless driver
//!
//! Plays rounds with the autopilot at the fixed timestep and logs every
//! game event. Usage: `bricker [columns rows]`

use std::time::{SystemTime, UNIX_EPOCH};

use bricker::Settings;
use bricker::consts::SIM_DT;
use bricker::platform::{EndAction, HeadlessWindow, WindowController, resolve_end_of_game};
use bricker::sim::{GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Bricker (headless) starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            eprintln!("usage: bricker [columns rows]");
            std::process::exit(2);
        }
    };

    let mut window = HeadlessWindow::default();
    log::info!(
        "Window {}x{}, grid {}x{}",
        window.window_dimensions().x,
        window.window_dimensions().y,
        settings.columns,
        settings.rows
    );

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut round = 0u32;
    loop {
        round += 1;
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Round {} with seed: {}", round, seed);
        let mut state = GameState::new(seed, settings.columns, settings.rows);

        while state.phase == GamePhase::Playing && state.time_ticks < settings.max_ticks {
            tick(&mut state, &input, SIM_DT);
            for event in state.drain_events() {
                log::debug!("[{}] {:?}", state.time_ticks, event);
            }
        }

        if state.phase == GamePhase::Playing {
            log::warn!(
                "Round {} undecided after {} ticks ({} bricks left)",
                round,
                state.time_ticks,
                state.brick_counter
            );
            break;
        }

        log::info!(
            "Round {} ended: {:?}, {}",
            round,
            state.phase,
            state.lives.hud_text()
        );
        match resolve_end_of_game(state.phase, &mut window) {
            Some(EndAction::Reset) => continue,
            Some(EndAction::Close) | None => break,
        }
    }

    log::info!("Bricker exiting");
}

fn load_settings() -> Result<Settings, bricker::SettingsError> {
    let mut settings = Settings::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    settings.apply_args(&args)?;
    Ok(settings)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
