//! Button input.
//!
//! NEXT is a debounced edge. SELECT distinguishes a tap, a long hold
//! (back to the route list) and a very long hold (wipe the cache), with a
//! countdown popup while the very long hold builds up. Time is always
//! passed in, so every threshold is testable without waiting.

mod buttons;
mod gesture;
mod interpreter;
mod scripted;

pub use buttons::{Button, InputPins};
pub use gesture::{HoldAction, Phase, Release, SelectGesture};
pub use interpreter::{InputEvent, InputInterpreter};
pub use scripted::{Press, ScriptedPins, TAP_MS};
