//! Center piece spawning
//!
//! A 60-sided draw picks the piece kind; plain atoms then draw a rank from
//! the mode's bounds. The draw classification is pure so it can be pinned
//! in tests; [`Spawner`] wraps it with the session RNG.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Classic,
    TimeAttack,
    /// Luxons replace Protons
    Geneva,
    /// Mercy Protons when the ring is about to overflow
    Zen,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Classic, Mode::TimeAttack, Mode::Geneva, Mode::Zen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::TimeAttack => "Time Attack",
            Mode::Geneva => "Geneva",
            Mode::Zen => "Zen",
        }
    }

    /// Mode-select hotkey
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'c' => Some(Mode::Classic),
            't' => Some(Mode::TimeAttack),
            'g' => Some(Mode::Geneva),
            'z' => Some(Mode::Zen),
            _ => None,
        }
    }
}

/// What a draw resolves to before an atom rank is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Proton,
    Electron,
    Neutrino,
    Luxon,
    Atom,
}

/// Inputs the draw classification depends on
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub mode: Mode,
    pub difficult: bool,
    pub score: u64,
    pub ring_len: usize,
}

/// Map a draw in `1..=SPAWN_DIE_SIDES` to a piece kind
pub fn classify_draw(draw: u32, ctx: &SpawnContext) -> GameResult<SpawnKind> {
    if ctx.difficult {
        return Err(GameError::NotImplemented("difficult mode spawning"));
    }
    if ctx.score >= NEUTRINO_MIN_SCORE && draw == SPAWN_DIE_SIDES {
        return Ok(SpawnKind::Neutrino);
    }
    if PROTON_DRAWS.contains(&draw) {
        return Ok(if ctx.mode == Mode::Geneva {
            SpawnKind::Luxon
        } else {
            SpawnKind::Proton
        });
    }
    if ELECTRON_DRAWS.contains(&draw) {
        return Ok(SpawnKind::Electron);
    }
    if ctx.mode == Mode::Zen && ctx.ring_len == MAX_RING_LEN && ZEN_MERCY_DRAWS.contains(&draw) {
        return Ok(SpawnKind::Proton);
    }
    Ok(SpawnKind::Atom)
}

/// Seeded spawner for center pieces and fresh ring atoms
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    rank_min: u32,
    rank_max: u32,
}

impl Spawner {
    pub fn new(rng: Pcg32, rank_min: u32, rank_max: u32) -> Self {
        Self {
            rng,
            rank_min,
            rank_max,
        }
    }

    /// A plain atom with a rank inside the spawn bounds
    pub fn atom(&mut self) -> PieceKind {
        PieceKind::Atom {
            rank: self.rng.random_range(self.rank_min..=self.rank_max),
        }
    }

    /// Next center piece
    pub fn next_piece(&mut self, ctx: &SpawnContext) -> GameResult<PieceKind> {
        let draw = self.rng.random_range(1..=SPAWN_DIE_SIDES);
        let kind = match classify_draw(draw, ctx)? {
            SpawnKind::Proton => PieceKind::Proton,
            SpawnKind::Electron => PieceKind::Electron,
            SpawnKind::Neutrino => PieceKind::Neutrino,
            SpawnKind::Luxon => PieceKind::Luxon,
            SpawnKind::Atom => self.atom(),
        };
        log::debug!("Spawned {:?} (draw {})", kind, draw);
        Ok(kind)
    }

    /// Random index helper for autoplay drivers
    pub fn pick(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        self.rng.random_range(0..upper_exclusive)
    }
}
