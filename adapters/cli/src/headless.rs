//! Windowless session driver stepping the world at a fixed rate.

use std::time::Duration;

use crossing_core::{Command, Direction, Event, Position};
use crossing_rendering::RecordingCanvas;
use crossing_world::{apply, query, render, World};
use log::info;

/// Fixed frame delta used when no display paces the loop.
pub(crate) const FRAME_STEP: Duration = Duration::from_nanos(16_666_667);

const RESTART_TOKEN: &str = "restart";

/// Single scripted action fed to the world at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptStep {
    /// Move request; `None` when the token named no direction.
    Move(Option<Direction>),
    /// Restart the session.
    Restart,
}

/// Parses comma-separated script tokens. Unknown names become unrecognized moves.
pub(crate) fn parse_script(tokens: &[String]) -> Vec<ScriptStep> {
    tokens
        .iter()
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token == RESTART_TOKEN {
                ScriptStep::Restart
            } else {
                ScriptStep::Move(Direction::from_name(&token))
            }
        })
        .collect()
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) frames: u32,
    pub(crate) moves: usize,
    pub(crate) rejected_moves: usize,
    pub(crate) recycles: usize,
    pub(crate) final_position: Position,
    pub(crate) last_frame_draws: usize,
    pub(crate) events: Vec<Event>,
}

/// Runs `frames` update-then-render cycles, applying one script step per frame.
pub(crate) fn run(world: &mut World, frames: u32, script: &[ScriptStep]) -> Summary {
    let mut events = Vec::new();
    let mut canvas = RecordingCanvas::new();
    let mut last_frame_draws = 0;

    for frame in 0..frames {
        let command = script.get(frame as usize).map(|step| match *step {
            ScriptStep::Move(direction) => Command::MovePlayer { direction },
            ScriptStep::Restart => Command::RestartSession,
        });
        if let Some(command) = command {
            apply(world, command, &mut events);
        }
        apply(world, Command::Tick { dt: FRAME_STEP }, &mut events);

        render(world, &mut canvas);
        last_frame_draws = canvas.take().len();
    }

    let count = |predicate: fn(&Event) -> bool| events.iter().filter(|e| predicate(e)).count();
    let summary = Summary {
        frames,
        moves: count(|event| matches!(event, Event::PlayerMoved { .. })),
        rejected_moves: count(|event| matches!(event, Event::PlayerMoveRejected { .. })),
        recycles: count(|event| matches!(event, Event::EnemyRecycled { .. })),
        final_position: query::player_position(world),
        last_frame_draws,
        events,
    };
    info!(
        "headless run finished after {} frames with the player at ({}, {})",
        summary.frames, summary.final_position.x, summary.final_position.y
    );
    summary
}
