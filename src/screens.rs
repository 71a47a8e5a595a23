//! Screen flow: mode select -> playing -> game over
//!
//! Layout and text are the renderer's business; this only tracks which
//! screen is active and routes input to it.

use crate::error::GameResult;
use crate::input::{Board, InputEvent, translate_click};
use crate::settings::Settings;
use crate::sim::{ActionOutcome, GameSummary, Mode, Session, TickReport, apply_action};

/// Active screen
#[derive(Debug, Clone)]
pub enum Screen {
    ModeSelect,
    Playing(Box<Session>),
    GameOver(GameSummary),
}

/// Top-level app state owned by the driver
#[derive(Debug, Clone)]
pub struct App {
    pub screen: Screen,
    pub settings: Settings,
    pub board: Board,
    /// Seed for the next session; bumped on every start
    next_seed: u64,
}

impl App {
    pub fn new(settings: Settings, board: Board, seed: u64) -> Self {
        Self {
            screen: Screen::ModeSelect,
            settings,
            board,
            next_seed: seed,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Playing(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.screen {
            Screen::Playing(session) => Some(&mut **session),
            _ => None,
        }
    }

    /// Start a session in `mode`
    pub fn start(&mut self, mode: Mode, difficult: bool) -> GameResult<()> {
        let settings = Settings {
            difficult,
            ..self.settings.clone()
        };
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        let session = Session::new(mode, &settings, seed)?;
        self.screen = Screen::Playing(Box::new(session));
        Ok(())
    }

    /// Route an input event to the active screen
    pub fn handle_input(&mut self, event: InputEvent) -> GameResult<ActionOutcome> {
        let event = match event {
            InputEvent::Key(key) => InputEvent::Key(key.to_ascii_lowercase()),
            other => other,
        };
        match (&mut self.screen, event) {
            (Screen::ModeSelect, InputEvent::Key(key)) => {
                if let Some(mode) = Mode::from_key(key) {
                    let difficult = self.settings.difficult;
                    self.start(mode, difficult)?;
                }
                Ok(ActionOutcome::Ignored)
            }
            (Screen::Playing(session), InputEvent::Key('q')) => {
                session.quit();
                log::info!("Returning to mode select");
                self.screen = Screen::ModeSelect;
                Ok(ActionOutcome::Ignored)
            }
            (Screen::Playing(session), InputEvent::Click { x, y }) => {
                match translate_click(session, &self.board, x, y) {
                    Some(action) => apply_action(session, action),
                    None => Ok(ActionOutcome::Ignored),
                }
            }
            (Screen::GameOver(summary), InputEvent::Key('r')) => {
                let (mode, difficult) = (summary.mode, summary.difficult);
                self.start(mode, difficult)?;
                Ok(ActionOutcome::Ignored)
            }
            (Screen::GameOver(_), InputEvent::Key('q')) => {
                self.screen = Screen::ModeSelect;
                Ok(ActionOutcome::Ignored)
            }
            _ => Ok(ActionOutcome::Ignored),
        }
    }

    /// Tick the active session; a finished session moves to the game-over screen
    pub fn tick(&mut self) -> GameResult<TickReport> {
        let Screen::Playing(session) = &mut self.screen else {
            return Ok(TickReport::default());
        };
        let report = session.tick()?;
        if let Some(summary) = session.summary() {
            self.screen = Screen::GameOver(summary);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BoardGeometry;
    use crate::sim::GamePhase;
    use glam::Vec2;

    fn app() -> App {
        App::new(
            Settings::default(),
            Board::new(Vec2::new(200.0, 300.0), BoardGeometry::default()),
            7,
        )
    }

    #[test]
    fn test_mode_select_keys() {
        let mut app = app();
        app.handle_input(InputEvent::Key('x')).unwrap();
        assert!(matches!(app.screen, Screen::ModeSelect));
        app.handle_input(InputEvent::Key('t')).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.mode, Mode::TimeAttack);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_returns_to_mode_select() {
        let mut app = app();
        app.handle_input(InputEvent::Key('c')).unwrap();
        app.handle_input(InputEvent::Key('q')).unwrap();
        assert!(matches!(app.screen, Screen::ModeSelect));
    }

    #[test]
    fn test_keys_ignore_case() {
        let mut app = app();
        app.handle_input(InputEvent::Key('G')).unwrap();
        assert_eq!(app.session().unwrap().mode, Mode::Geneva);
        app.handle_input(InputEvent::Key('Q')).unwrap();
        assert!(matches!(app.screen, Screen::ModeSelect));

        app.screen = Screen::GameOver(GameSummary {
            score: 10,
            mode: Mode::Classic,
            difficult: false,
        });
        app.handle_input(InputEvent::Key('R')).unwrap();
        assert_eq!(app.session().unwrap().mode, Mode::Classic);
    }

    #[test]
    fn test_game_over_restart_and_quit() {
        let mut app = app();
        app.handle_input(InputEvent::Key('z')).unwrap();
        if let Some(session) = app.session_mut() {
            session.score = 40;
            session.phase = GamePhase::GameOver;
        }
        app.tick().unwrap();
        let Screen::GameOver(summary) = app.screen else {
            panic!("expected game over screen");
        };
        assert_eq!(summary.score, 40);
        assert_eq!(summary.mode, Mode::Zen);

        app.handle_input(InputEvent::Key('r')).unwrap();
        assert_eq!(app.session().unwrap().mode, Mode::Zen);
        assert_eq!(app.session().unwrap().score, 0);

        app.screen = Screen::GameOver(summary);
        app.handle_input(InputEvent::Key('q')).unwrap();
        assert!(matches!(app.screen, Screen::ModeSelect));
    }

    #[test]
    fn test_time_attack_expires_to_game_over() {
        let mut app = App::new(
            Settings {
                time_attack_ticks: 2,
                ..Default::default()
            },
            Board::new(Vec2::ZERO, BoardGeometry::default()),
            1,
        );
        app.start(Mode::TimeAttack, false).unwrap();
        // Fusion bonuses can extend the clock, but the ring only shrinks
        for _ in 0..1000 {
            if app.session().is_none() {
                break;
            }
            app.tick().unwrap();
        }
        assert!(matches!(app.screen, Screen::GameOver(_)));
    }
}
