//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick()` is one fusion pass, whatever the driver cadence
//! - Seeded RNG only
//! - Ring order is the only layout state; angles are derived at render time
//! - No rendering or platform dependencies

pub mod fusion;
pub mod piece;
pub mod ring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use fusion::{FusionCandidate, FusionPolicy};
pub use piece::{Piece, PieceId, PieceKind};
pub use ring::Ring;
pub use spawn::{Mode, SpawnContext, SpawnKind, Spawner, classify_draw};
pub use state::{GamePhase, GameSummary, Session};
pub use tick::{Action, ActionOutcome, FusionReport, TickReport, apply_action, tick};
