//! Platform abstraction layer
//!
//! Everything the simulation needs from the outside world each frame:
//! - Time (`time`): seconds since the previous tick
//! - Input (`input`): steering, UI intents and the close signal

pub mod input;
pub mod time;

pub use input::{DemoInput, InputSource, ScriptedInput};
pub use time::{Clock, FixedClock, SystemClock};
