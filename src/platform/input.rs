//! Input sources
//!
//! Raw device polling lives outside this crate; an `InputSource` turns
//! whatever it reads into one `TickInput` per frame.

use std::collections::VecDeque;

use crate::sim::{MenuIntent, SessionPhase, TickInput, WorldState};

pub trait InputSource {
    /// Input for the coming tick
    fn poll(&mut self, world: &WorldState) -> TickInput;

    /// True once the user asked to quit
    fn close_requested(&self) -> bool;
}

/// Replays a fixed list of inputs, then idles (or closes)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
    close_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            close_when_done: false,
        }
    }

    /// Request close once the script runs out
    pub fn closing(mut self) -> Self {
        self.close_when_done = true;
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _world: &WorldState) -> TickInput {
        self.frames.pop_front().unwrap_or_default()
    }

    fn close_requested(&self) -> bool {
        self.close_when_done && self.frames.is_empty()
    }
}

/// Headless attract mode: peeks at the score screen, then plays `runs` runs
/// on autopilot and asks to close after the last one
#[derive(Debug, Clone)]
pub struct DemoInput {
    runs: u32,
    visited_scores: bool,
    done: bool,
}

impl DemoInput {
    pub fn new(runs: u32) -> Self {
        Self {
            runs,
            visited_scores: false,
            done: runs == 0,
        }
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self, world: &WorldState) -> TickInput {
        let session = &world.session;
        match session.phase {
            SessionPhase::Menu if !self.visited_scores => {
                self.visited_scores = true;
                TickInput::intent(MenuIntent::Scores)
            }
            SessionPhase::Menu => TickInput::intent(MenuIntent::Play),
            SessionPhase::ScoreView => TickInput::intent(MenuIntent::Menu),
            SessionPhase::Playing => TickInput {
                autopilot: true,
                ..Default::default()
            },
            SessionPhase::Ended if session.runs >= self.runs => {
                self.done = true;
                TickInput::default()
            }
            SessionPhase::Ended => TickInput::intent(MenuIntent::Replay),
        }
    }

    fn close_requested(&self) -> bool {
        self.done
    }
}
