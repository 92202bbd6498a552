//! Nightswarm entry point
//!
//! Headless run driver: advances the simulation at the fixed timestep
//! with a scripted sweep input, takes the first upgrade on offer at
//! every level, and logs the run as it unfolds.

use std::env;
use std::fs;

use glam::Vec2;

use nightswarm::consts::SIM_DT;
use nightswarm::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use nightswarm::{SimConfig, tuning};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xD1CE);
    let config = match args.next() {
        Some(path) => load_config(&path),
        None => SimConfig::default(),
    };

    log::info!("Nightswarm (headless) starting with seed: {}", seed);
    let mut game = GameState::new(config, seed);

    // two minutes of simulated survival, or until the horde wins
    let budget = (120.0 / SIM_DT) as u64;
    for step in 0..budget {
        let angle = step as f32 * SIM_DT * 0.4;
        let input = TickInput {
            move_dir: Vec2::new(angle.cos(), angle.sin()),
            pause: false,
        };
        tick(&mut game, &input, SIM_DT);
        report(&game);

        if game.phase == GamePhase::PausedForUpgrade {
            if let Some(&pick) = game.upgrade_offer().first() {
                let id = tuning::UPGRADES[pick].id;
                log::info!("taking upgrade: {}", id);
                game.choose_upgrade(id);
            }
        }
        if game.phase == GamePhase::Ended {
            break;
        }
    }

    let hud = game.hud();
    println!(
        "survived {:.1}s: score {} level {} health {:.0}/{:.0}",
        game.run_time, hud.score, hud.level, hud.health, hud.max_health
    );
}

fn report(game: &GameState) {
    for event in &game.events {
        match event {
            GameEvent::EnemySlain { kind, score, .. } => {
                log::debug!("enemy kind {} down (+{})", kind, score)
            }
            GameEvent::LeveledUp { level } => log::info!("reached level {}", level),
            GameEvent::RunEnded { score } => log::info!("run over, final score {}", score),
            _ => {}
        }
    }
}

fn load_config(path: &str) -> SimConfig {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("could not read {}: {}; using default config", path, err);
            return SimConfig::default();
        }
    };
    match SimConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("could not parse {}: {}; using default config", path, err);
            SimConfig::default()
        }
    }
}
