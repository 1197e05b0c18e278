//! Debounced button handling.
//!
//! All seven buttons are polled once per main-loop iteration. A press is
//! trusted only if the button still reads pressed after a short settle
//! delay, and fires at most once until the button is released.

use embedded_hal::blocking::delay::DelayUs;
use heapless::Vec;

use crate::clock::{Step, Unit};
use crate::stopwatch::{Action, StateLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    ModeToggle,
    HourDec,
    HourInc,
    MinDec,
    MinInc,
    SecDec,
    SecInc,
}

impl Button {
    pub const COUNT: usize = 7;

    pub const ALL: [Button; Button::COUNT] = [
        Button::ModeToggle,
        Button::HourDec,
        Button::HourInc,
        Button::MinDec,
        Button::MinInc,
        Button::SecDec,
        Button::SecInc,
    ];

    /// Position in [`Button::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn action(self) -> Action {
        match self {
            Button::ModeToggle => Action::ToggleMode,
            Button::HourDec => Action::Adjust(Unit::Hour, Step::Down),
            Button::HourInc => Action::Adjust(Unit::Hour, Step::Up),
            Button::MinDec => Action::Adjust(Unit::Minute, Step::Down),
            Button::MinInc => Action::Adjust(Unit::Minute, Step::Up),
            Button::SecDec => Action::Adjust(Unit::Second, Step::Down),
            Button::SecInc => Action::Adjust(Unit::Second, Step::Up),
        }
    }
}

/// Raw button levels. Buttons are active-low with pull-ups; implementations
/// report the logical level, `true` while held.
pub trait ButtonInputs {
    fn is_pressed(&mut self, button: Button) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    #[default]
    Idle,
    Debouncing,
    /// Action taken for the current press.
    Latched,
}

/// Per-button press filter.
///
/// `Idle -> Debouncing` on a pressed sample. After the settle delay,
/// `Debouncing -> Latched` if still pressed and the press is accepted,
/// otherwise back to `Idle`. `Latched -> Idle` only on a released sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Debouncer {
    state: DebounceState,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Idle,
        }
    }

    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// First sample of a poll. Returns `true` when a settle delay and a
    /// [`confirm`](Self::confirm) should follow.
    pub fn sample(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.state = DebounceState::Idle;
            return false;
        }
        match self.state {
            DebounceState::Latched => false,
            DebounceState::Idle | DebounceState::Debouncing => {
                self.state = DebounceState::Debouncing;
                true
            }
        }
    }

    /// Sample taken after the settle delay. `accepted` says whether the
    /// press may act right now. Returns `true` exactly when the action
    /// should fire.
    pub fn confirm(&mut self, pressed: bool, accepted: bool) -> bool {
        if self.state != DebounceState::Debouncing {
            return false;
        }
        if pressed && accepted {
            self.state = DebounceState::Latched;
            true
        } else {
            self.state = DebounceState::Idle;
            false
        }
    }
}

/// Polls the buttons and turns confirmed presses into stopwatch actions.
///
/// Presses only act while the stopwatch is paused. A press seen while
/// running is not latched, so it still fires if the user pauses while
/// holding it.
pub struct InputController<I> {
    inputs: I,
    debouncers: [Debouncer; Button::COUNT],
    settle_delay_us: u32,
}

impl<I: ButtonInputs> InputController<I> {
    pub fn new(inputs: I, settle_delay_us: u32) -> Self {
        Self {
            inputs,
            debouncers: [Debouncer::new(); Button::COUNT],
            settle_delay_us,
        }
    }

    pub fn debounce_state(&self, button: Button) -> DebounceState {
        self.debouncers[button.index()].state()
    }

    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    /// One pass over all buttons. The settle delay runs outside the lock.
    /// Returns the buttons whose action fired.
    pub fn poll<D, S>(&mut self, delay: &mut D, state: &mut S) -> Vec<Button, { Button::COUNT }>
    where
        D: DelayUs<u32>,
        S: StateLock,
    {
        let mut fired = Vec::new();
        for button in Button::ALL {
            let debouncer = &mut self.debouncers[button.index()];
            if !debouncer.sample(self.inputs.is_pressed(button)) {
                continue;
            }

            delay.delay_us(self.settle_delay_us);

            let pressed = self.inputs.is_pressed(button);
            let fire = state.lock(|sw| {
                let fire = debouncer.confirm(pressed, sw.is_paused());
                if fire {
                    sw.apply(button.action());
                }
                fire
            });
            if fire {
                log_debug!("{:?} pressed", button);
                // capacity equals the number of buttons
                let _ = fired.push(button);
            }
        }
        fired
    }
}
