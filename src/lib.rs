#![cfg_attr(not(test), no_std)]

//! Portable core of the six-digit stopwatch: time keeping, count mode and
//! pause state, debounced button handling and the countdown alarm.
//!
//! Nothing in here touches registers. The RTIC application in `main.rs`
//! binds these types to the RP2040 timer, GPIO interrupts and a MAX7219
//! display.

#[macro_use]
mod logging;

pub mod alarm;
pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod mode;
pub mod stopwatch;

pub use alarm::AlarmController;
pub use clock::{ClockCounter, ElapsedTime, Step, Unit};
pub use display::{DigitSink, Digits};
pub use input::{Button, ButtonInputs, InputController};
pub use mode::{Direction, ModeState, RunState};
pub use stopwatch::{Action, EdgeEvent, StateLock, Stopwatch};
