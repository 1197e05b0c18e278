//! Count direction and run/pause state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    CountingUp,
    CountingDown,
}

impl Direction {
    pub const fn toggled(self) -> Self {
        match self {
            Direction::CountingUp => Direction::CountingDown,
            Direction::CountingDown => Direction::CountingUp,
        }
    }

    /// Levels for the `(up, down)` mode LEDs. Exactly one is lit.
    pub const fn indicators(self) -> (bool, bool) {
        match self {
            Direction::CountingUp => (true, false),
            Direction::CountingDown => (false, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

/// Direction and run state as seen by the user.
///
/// Pause and resume come from edge interrupts and are applied whatever the
/// current state. The direction only flips while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    direction: Direction,
    run_state: RunState,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            direction: Direction::CountingUp,
            run_state: RunState::Running,
        }
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    pub const fn is_paused(&self) -> bool {
        matches!(self.run_state, RunState::Paused)
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    /// Flips the direction if paused. Returns whether it flipped.
    pub fn toggle_mode(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.direction = self.direction.toggled();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_and_counting_up() {
        let mode = ModeState::new();
        assert_eq!(mode.run_state(), RunState::Running);
        assert_eq!(mode.direction(), Direction::CountingUp);
        assert_eq!(mode, ModeState::default());
    }

    #[test]
    fn toggle_ignored_while_running() {
        let mut mode = ModeState::new();
        assert!(!mode.toggle_mode());
        assert_eq!(mode.direction(), Direction::CountingUp);

        mode.pause();
        assert!(mode.toggle_mode());
        assert_eq!(mode.direction(), Direction::CountingDown);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut mode = ModeState::new();
        mode.pause();
        mode.pause();
        assert!(mode.is_paused());
        mode.resume();
        mode.resume();
        assert_eq!(mode.run_state(), RunState::Running);
    }

    #[test]
    fn indicators_are_exclusive() {
        assert_eq!(Direction::CountingUp.indicators(), (true, false));
        assert_eq!(Direction::CountingDown.indicators(), (false, true));
    }
}
