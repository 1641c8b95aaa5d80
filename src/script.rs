//! Scripted input for headless runs
//!
//! A script is a whitespace-separated list of tokens, one event each:
//! `left`/`l`, `right`/`r`, `down`/`d`, `drop`/`space`, `cw`/`x`,
//! `ccw`/`z`, `hold`/`c`, and `tick` (one fall interval) or `tick:<ms>`.

use crate::game::{Action, Session};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },
    #[error("bad tick duration '{token}' at position {position}")]
    BadTick { token: String, position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(Action),
    /// Advance by this much, or by one fall interval when None
    Tick(Option<Duration>),
}

pub fn parse(script: &str) -> Result<Vec<Event>, ScriptError> {
    script
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| parse_token(token, position))
        .collect()
}

fn parse_token(token: &str, position: usize) -> Result<Event, ScriptError> {
    let lower = token.to_ascii_lowercase();
    let action = match lower.as_str() {
        "left" | "l" => Action::MoveLeft,
        "right" | "r" => Action::MoveRight,
        "down" | "d" => Action::MoveDown,
        "drop" | "space" => Action::HardDrop,
        "cw" | "x" => Action::RotateCw,
        "ccw" | "z" => Action::RotateCcw,
        "hold" | "c" => Action::Hold,
        "tick" => return Ok(Event::Tick(None)),
        other => {
            let Some(ms) = other.strip_prefix("tick:") else {
                return Err(ScriptError::UnknownToken {
                    token: token.to_string(),
                    position,
                });
            };
            return ms
                .parse::<u64>()
                .map(|ms| Event::Tick(Some(Duration::from_millis(ms))))
                .map_err(|_| ScriptError::BadTick {
                    token: token.to_string(),
                    position,
                });
        }
    };
    Ok(Event::Input(action))
}

/// Feed events to the session until they run out or the game ends.
/// Returns how many events were applied.
pub fn run(session: &mut Session, events: &[Event]) -> usize {
    let mut applied = 0;
    for event in events {
        if session.is_game_over() {
            break;
        }
        match *event {
            Event::Input(action) => {
                let accepted = session.process_action(action);
                debug!(?action, accepted, "input");
            }
            Event::Tick(dt) => {
                let dt = dt.unwrap_or(session.config().fall_interval);
                session.tick(dt);
            }
        }
        applied += 1;
    }
    applied
}
