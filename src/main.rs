//! Atom Ring headless driver
//!
//! Runs an autoplay demo: random gap clicks and ring selections at the
//! reference tick cadence (without sleeping), then logs the final summary.

use glam::Vec2;

use atom_ring::consts::*;
use atom_ring::input::{Board, InputEvent};
use atom_ring::screens::{App, Screen};
use atom_ring::sim::{Action, GameSummary, PieceId, PieceKind, apply_action};
use atom_ring::{GameResult, Settings, polar_to_cartesian, slot_angle};

/// Upper bound on demo length (10 minutes of game time)
const DEMO_TICKS: u64 = 6000;
/// The demo makes a move every this many ticks
const TICKS_PER_MOVE: u64 = 5;

fn main() {
    env_logger::init();
    log::info!("Atom Ring (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match run_demo(seed) {
        Ok(Some(summary)) => {
            println!(
                "{} game over - score {}",
                summary.mode.as_str(),
                summary.score
            );
        }
        Ok(None) => println!("Demo ended without a game over"),
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_demo(seed: u64) -> GameResult<Option<GameSummary>> {
    let settings = Settings::default();
    let center = Vec2::splat(settings.board.outer_radius);
    let board = Board::new(center, settings.board);
    let mut app = App::new(settings, board, seed);
    log::info!("Demo seed: {}", seed);

    app.handle_input(InputEvent::Key('c'))?;

    for t in 0..DEMO_TICKS {
        if t % TICKS_PER_MOVE == 0 {
            demo_move(&mut app)?;
        }
        app.tick()?;
        if let Screen::GameOver(summary) = app.screen {
            return Ok(Some(summary));
        }
    }
    Ok(app.session_mut().map(|s| s.quit()))
}

/// Pick a move the way a player would: click a gap, or a ring piece when the
/// center needs a target
fn demo_move(app: &mut App) -> GameResult<()> {
    let board = app.board;
    let Some(session) = app.session_mut() else {
        return Ok(());
    };
    let len = session.ring.len();

    if session.center.kind.targets_ring() {
        // Electrons take anything; Neutrinos and Luxons only act on atoms
        let any_piece = session.center.kind == PieceKind::Electron;
        let targets: Vec<PieceId> = session
            .ring
            .iter()
            .filter(|p| any_piece || p.kind.is_atom())
            .map(|p| p.id)
            .collect();
        if targets.is_empty() {
            return Ok(());
        }
        let id = targets[session.random_index(targets.len())];
        let outcome = apply_action(session, Action::SelectRingPiece { id })?;
        log::trace!("Demo select -> {:?}", outcome);
        return Ok(());
    }

    // Click halfway between two slots, as a player would
    let gap = session.random_index(len.max(1));
    let theta = slot_angle(gap, len) - std::f32::consts::PI / len.max(1) as f32;
    let p = polar_to_cartesian(board.geometry.ring_radius() - PIECE_RADIUS, theta);
    let outcome = app.handle_input(InputEvent::Click {
        x: board.center.x + p.x,
        y: board.center.y - p.y,
    })?;
    log::trace!("Demo click -> {:?}", outcome);
    Ok(())
}
