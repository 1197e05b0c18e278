//! Countdown alarm.

use crate::mode::Direction;
use crate::stopwatch::Stopwatch;

/// Sounds the buzzer while a countdown sits at zero and holds the time base
/// for as long as it does.
///
/// Level-triggered: [`evaluate`](Self::evaluate) recomputes the output from
/// the current state on every call. The previous level is kept only to log
/// transitions.
#[derive(Debug, Default)]
pub struct AlarmController {
    sounding: bool,
}

impl AlarmController {
    pub const fn new() -> Self {
        Self { sounding: false }
    }

    /// Returns the buzzer level.
    pub fn evaluate(&mut self, stopwatch: &mut Stopwatch) -> bool {
        let expired =
            stopwatch.direction() == Direction::CountingDown && stopwatch.elapsed().is_zero();
        stopwatch.set_tick_halted(expired);

        if expired != self.sounding {
            if expired {
                log_warn!("countdown reached zero");
            } else {
                log_info!("alarm cleared");
            }
            self.sounding = expired;
        }
        expired
    }

    pub const fn is_sounding(&self) -> bool {
        self.sounding
    }
}
