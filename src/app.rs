//! Frame loop
//!
//! One frame: read the clock, poll input, tick the simulation, hand a
//! snapshot to the renderer. The loop ends when the input source asks to
//! close, after which the best score is saved exactly once.

use crate::highscores::BestScore;
use crate::persistence::BestScoreStore;
use crate::platform::{Clock, InputSource};
use crate::renderer::{Renderer, SceneSnapshot};
use crate::sim::{GameEvent, WorldState, tick};

/// Game instance holding the world and its collaborators
pub struct App<C, I, R, S> {
    pub world: WorldState,
    clock: C,
    input: I,
    renderer: R,
    store: S,
    frames: u64,
    shut_down: bool,
}

impl<C, I, R, S> App<C, I, R, S>
where
    C: Clock,
    I: InputSource,
    R: Renderer,
    S: BestScoreStore,
{
    /// Build the app and load the persisted best score into the world
    pub fn new(mut world: WorldState, clock: C, input: I, renderer: R, store: S) -> Self {
        world.session.best = BestScore::load_from(&store);
        Self {
            world,
            clock,
            input,
            renderer,
            store,
            frames: 0,
            shut_down: false,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a single frame
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let dt = self.clock.elapsed_secs();
        let input = self.input.poll(&self.world);
        let events = tick(&mut self.world, &input, dt);

        self.renderer.render(&SceneSnapshot::capture(&self.world));
        self.frames += 1;
        events
    }

    /// Run frames until the input source asks to close, then shut down.
    ///
    /// `max_frames` bounds the loop for headless runs.
    pub fn run(&mut self, max_frames: Option<u64>) {
        while !self.input.close_requested() {
            if max_frames.is_some_and(|max| self.frames >= max) {
                log::warn!("Frame limit reached, closing");
                break;
            }
            self.frame();
            self.clock.wait_for_next_frame();
        }
        self.shutdown();
    }

    /// Save the best score. Only the first call does anything.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        log::info!(
            "Shutting down after {} frames, {} runs",
            self.frames,
            self.world.session.runs
        );
        self.world.session.best.save_to(&mut self.store);
    }
}
