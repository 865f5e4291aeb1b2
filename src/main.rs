//! Drift Rocks headless runner
//!
//! Plays a scripted session at a simulated 60 Hz display and prints the final
//! snapshot as JSON.
//!
//! Usage: `drift-rocks [tuning.json] [seed]`

use anyhow::{Context, Result};

use drift_rocks::consts::FRAME_DT;
use drift_rocks::sim::{GameEvent, GamePhase};
use drift_rocks::{Rotation, Session, Tuning};

/// Give up after this many simulated seconds
const MAX_SECONDS: u32 = 300;

/// Fire every this many frames
const FIRE_EVERY: u64 = 12;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Drift Rocks (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            Tuning::load(&path).with_context(|| format!("loading tuning from {}", path))?
        }
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed '{}'", s))?,
        None => 0x5eed,
    };

    let mut session = Session::new(tuning, seed).context("building session")?;
    session.start();

    let mut splits = 0u32;
    let mut hits = 0u32;
    for _ in 0..MAX_SECONDS * 60 {
        steer(&mut session);
        session.update(FRAME_DT);

        for event in session.drain_events() {
            match event {
                GameEvent::ObstacleSplit { .. } => splits += 1,
                GameEvent::PlayerHit { lives_left } => {
                    hits += 1;
                    log::info!("Hit! {} lives left", lives_left);
                }
                _ => {}
            }
        }

        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished after {} frames: score {}, {} splits, {} hits",
        session.state().time_ticks,
        snapshot.score,
        splits,
        hits
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Simple autopilot: spin, pulse thrust, keep shooting
fn steer(session: &mut Session) {
    let frame = session.state().time_ticks;
    session.set_rotation(Rotation::Right, (frame / 90) % 2 == 0);
    session.set_rotation(Rotation::Left, (frame / 90) % 2 == 1);
    session.set_thrust(frame % 120 < 20);
    if frame % FIRE_EVERY == 0 {
        session.fire();
    }
}
