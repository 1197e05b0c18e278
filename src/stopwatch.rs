//! The stopwatch state shared between the tick handler, the edge handlers
//! and the main loop.
//!
//! Each field has one kind of writer:
//! - the elapsed time is written by `tick`, `EdgeEvent::Reset` and `apply`
//! - the run state only by `EdgeEvent::Pause` / `EdgeEvent::Resume`
//! - the direction only by `apply(Action::ToggleMode)`
//! - the tick halt only by the alarm evaluation
//!
//! Every mutation is a short, bounded update done under one lock.

use crate::clock::{ClockCounter, ElapsedTime, Step, Unit};
use crate::mode::{Direction, ModeState, RunState};

/// Asynchronous user events delivered by edge interrupts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeEvent {
    Reset,
    Pause,
    Resume,
}

/// What a confirmed button press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    ToggleMode,
    Adjust(Unit, Step),
}

/// Access to the shared [`Stopwatch`] for the duration of a closure.
///
/// On the target this is an RTIC resource lock. A plain `Stopwatch` is its
/// own lock when there is only one execution context.
pub trait StateLock {
    fn lock<R>(&mut self, f: impl FnOnce(&mut Stopwatch) -> R) -> R;
}

impl StateLock for Stopwatch {
    fn lock<R>(&mut self, f: impl FnOnce(&mut Stopwatch) -> R) -> R {
        f(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwatch {
    clock: ClockCounter,
    mode: ModeState,
    tick_halted: bool,
}

impl Stopwatch {
    pub const fn new(start: ElapsedTime) -> Self {
        Self {
            clock: ClockCounter::new(start),
            mode: ModeState::new(),
            tick_halted: false,
        }
    }

    pub const fn elapsed(&self) -> ElapsedTime {
        self.clock.elapsed()
    }

    pub const fn direction(&self) -> Direction {
        self.mode.direction()
    }

    pub const fn run_state(&self) -> RunState {
        self.mode.run_state()
    }

    pub const fn is_paused(&self) -> bool {
        self.mode.is_paused()
    }

    pub const fn is_tick_halted(&self) -> bool {
        self.tick_halted
    }

    /// One-second tick. Returns `true` if the reading moved.
    ///
    /// Has no effect while paused or while the alarm holds the time base.
    pub fn tick(&mut self) -> bool {
        if self.mode.is_paused() || self.tick_halted {
            return false;
        }
        match self.mode.direction() {
            Direction::CountingUp => {
                self.clock.count_up();
                true
            }
            Direction::CountingDown => self.clock.count_down(),
        }
    }

    pub fn handle_edge(&mut self, event: EdgeEvent) {
        log_info!("edge event: {:?}", event);
        match event {
            EdgeEvent::Reset => self.clock.reset(),
            EdgeEvent::Pause => self.mode.pause(),
            EdgeEvent::Resume => self.mode.resume(),
        }
    }

    /// Applies a button action. Ignored unless paused; out-of-range
    /// adjustments are dropped silently. Returns whether anything changed.
    pub fn apply(&mut self, action: Action) -> bool {
        if !self.mode.is_paused() {
            log_trace!("{:?} ignored while running", action);
            return false;
        }
        match action {
            Action::ToggleMode => {
                let toggled = self.mode.toggle_mode();
                log_debug!("direction now {:?}", self.mode.direction());
                toggled
            }
            Action::Adjust(unit, step) => match self.clock.adjust(unit, step) {
                Some(_) => {
                    log_debug!("adjusted to {}", self.clock.elapsed().as_secs());
                    true
                }
                None => {
                    log_trace!("{:?} {:?} out of range", unit, step);
                    false
                }
            },
        }
    }

    /// Stops or releases the effect of ticks without touching the
    /// user-visible run state.
    pub fn set_tick_halted(&mut self, halted: bool) {
        self.tick_halted = halted;
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new(ElapsedTime::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paused_at(secs: u32) -> Stopwatch {
        let mut sw = Stopwatch::new(ElapsedTime::from_raw(secs));
        sw.handle_edge(EdgeEvent::Pause);
        sw
    }

    #[test]
    fn tick_counts_up_only_while_running() {
        let mut sw = Stopwatch::default();
        assert!(sw.tick());
        assert_eq!(sw.elapsed().as_secs(), 1);

        sw.handle_edge(EdgeEvent::Pause);
        assert!(!sw.tick());
        assert_eq!(sw.elapsed().as_secs(), 1);

        sw.handle_edge(EdgeEvent::Resume);
        assert!(sw.tick());
        assert_eq!(sw.elapsed().as_secs(), 2);
    }

    #[test]
    fn tick_wraps_at_max() {
        let mut sw = Stopwatch::new(ElapsedTime::MAX);
        sw.tick();
        assert_eq!(sw.elapsed(), ElapsedTime::ZERO);
    }

    #[test]
    fn tick_counts_down_and_stops_at_zero() {
        let mut sw = paused_at(2);
        assert!(sw.apply(Action::ToggleMode));
        sw.handle_edge(EdgeEvent::Resume);

        assert!(sw.tick());
        assert!(sw.tick());
        assert!(sw.elapsed().is_zero());
        assert!(!sw.tick());
        assert!(sw.elapsed().is_zero());
    }

    #[test]
    fn reset_works_in_any_run_state() {
        let mut sw = Stopwatch::new(ElapsedTime::from_raw(1234));
        sw.handle_edge(EdgeEvent::Reset);
        assert!(sw.elapsed().is_zero());

        let mut sw = paused_at(4321);
        sw.handle_edge(EdgeEvent::Reset);
        assert!(sw.elapsed().is_zero());
        assert!(sw.is_paused());
    }

    #[test]
    fn actions_need_pause() {
        let mut sw = Stopwatch::new(ElapsedTime::from_raw(100));
        assert!(!sw.apply(Action::Adjust(Unit::Minute, Step::Up)));
        assert!(!sw.apply(Action::ToggleMode));
        assert_eq!(sw.elapsed().as_secs(), 100);
        assert_eq!(sw.direction(), Direction::CountingUp);

        sw.handle_edge(EdgeEvent::Pause);
        assert!(sw.apply(Action::Adjust(Unit::Minute, Step::Up)));
        assert_eq!(sw.elapsed().as_secs(), 160);
    }

    #[test]
    fn out_of_range_adjust_reports_no_change() {
        let mut sw = paused_at(0);
        assert!(!sw.apply(Action::Adjust(Unit::Second, Step::Down)));
        assert!(sw.elapsed().is_zero());
    }

    #[test]
    fn halted_tick_has_no_effect_but_keeps_run_state() {
        let mut sw = Stopwatch::default();
        sw.set_tick_halted(true);
        assert!(!sw.tick());
        assert_eq!(sw.run_state(), RunState::Running);
        assert!(sw.elapsed().is_zero());

        sw.set_tick_halted(false);
        assert!(sw.tick());
    }

    #[test]
    fn stopwatch_is_its_own_lock() {
        let mut sw = Stopwatch::default();
        let secs = sw.lock(|sw| {
            sw.tick();
            sw.elapsed().as_secs()
        });
        assert_eq!(secs, 1);
    }
}
