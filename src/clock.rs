//! Elapsed-time counter.

/// Highest reading the six digits can show, 99:59:59.
pub const MAX_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

/// Stopwatch reading in whole seconds, always within `0..=MAX_SECONDS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedTime(u32);

impl ElapsedTime {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(MAX_SECONDS);

    /// Returns `None` past 99:59:59.
    pub const fn new(secs: u32) -> Option<Self> {
        if secs <= MAX_SECONDS {
            Some(Self(secs))
        } else {
            None
        }
    }

    /// Reads a raw counter value the way the display does: anything past
    /// 99:59:59, including an underflowed counter, reads as zero.
    pub const fn from_raw(secs: u32) -> Self {
        match Self::new(secs) {
            Some(time) => time,
            None => Self::ZERO,
        }
    }

    pub const fn as_secs(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Field of the reading a button adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    Hour,
    Minute,
    Second,
}

impl Unit {
    pub const fn seconds(self) -> u32 {
        match self {
            Unit::Hour => 3600,
            Unit::Minute => 60,
            Unit::Second => 1,
        }
    }
}

/// Direction of a single adjustment, +1 or -1 of a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Up,
    Down,
}

/// Owns the elapsed time.
///
/// Counting up wraps from 99:59:59 to zero. Counting down stops at zero.
/// Manual adjustments never leave the valid range: a request that would is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockCounter {
    elapsed: ElapsedTime,
}

impl ClockCounter {
    pub const fn new(start: ElapsedTime) -> Self {
        Self { elapsed: start }
    }

    pub const fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// One second forward, wrapping to zero after 99:59:59.
    pub fn count_up(&mut self) {
        self.elapsed = if self.elapsed == ElapsedTime::MAX {
            ElapsedTime::ZERO
        } else {
            ElapsedTime(self.elapsed.0 + 1)
        };
    }

    /// One second back. Returns `false` and leaves the counter alone at zero.
    pub fn count_down(&mut self) -> bool {
        match self.elapsed.0.checked_sub(1) {
            Some(secs) => {
                self.elapsed = ElapsedTime(secs);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = ElapsedTime::ZERO;
    }

    /// Moves the reading by one `unit`. Returns the new reading, or `None`
    /// when the result would fall outside 00:00:00..=99:59:59, in which case
    /// nothing changes.
    pub fn adjust(&mut self, unit: Unit, step: Step) -> Option<ElapsedTime> {
        let secs = self.elapsed.0;
        let next = match step {
            Step::Up => secs.checked_add(unit.seconds()),
            Step::Down => secs.checked_sub(unit.seconds()),
        };
        let next = ElapsedTime::new(next?)?;
        self.elapsed = next;
        Some(next)
    }
}

impl Default for ClockCounter {
    fn default() -> Self {
        Self::new(ElapsedTime::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u32) -> ClockCounter {
        ClockCounter::new(ElapsedTime::new(secs).unwrap())
    }

    #[test]
    fn count_up_wraps_after_max() {
        let mut clock = at(MAX_SECONDS);
        clock.count_up();
        assert_eq!(clock.elapsed(), ElapsedTime::ZERO);

        let mut clock = at(59);
        clock.count_up();
        assert_eq!(clock.elapsed().as_secs(), 60);
    }

    #[test]
    fn count_down_stops_at_zero() {
        let mut clock = at(1);
        assert!(clock.count_down());
        assert!(clock.elapsed().is_zero());
        assert!(!clock.count_down());
        assert!(clock.elapsed().is_zero());
    }

    #[test]
    fn from_raw_forces_out_of_range_to_zero() {
        assert_eq!(ElapsedTime::from_raw(MAX_SECONDS + 1), ElapsedTime::ZERO);
        assert_eq!(ElapsedTime::from_raw(0xFFFF_FFFE), ElapsedTime::ZERO);
        assert_eq!(ElapsedTime::from_raw(MAX_SECONDS), ElapsedTime::MAX);
        assert_eq!(ElapsedTime::from_raw(42).as_secs(), 42);
    }

    #[test]
    fn hour_adjust_bounds() {
        let mut clock = at(3599);
        assert_eq!(clock.adjust(Unit::Hour, Step::Down), None);
        assert_eq!(clock.elapsed().as_secs(), 3599);

        let mut clock = at(3600);
        assert_eq!(clock.adjust(Unit::Hour, Step::Down), ElapsedTime::new(0));

        let mut clock = at(356_399);
        assert_eq!(clock.adjust(Unit::Hour, Step::Up), ElapsedTime::new(359_999));

        let mut clock = at(356_400);
        assert_eq!(clock.adjust(Unit::Hour, Step::Up), None);
        assert_eq!(clock.elapsed().as_secs(), 356_400);
    }

    #[test]
    fn minute_adjust_bounds() {
        let mut clock = at(59);
        assert_eq!(clock.adjust(Unit::Minute, Step::Down), None);

        let mut clock = at(60);
        assert_eq!(clock.adjust(Unit::Minute, Step::Down), ElapsedTime::new(0));

        let mut clock = at(359_939);
        assert_eq!(clock.adjust(Unit::Minute, Step::Up), ElapsedTime::new(359_999));

        let mut clock = at(359_940);
        assert_eq!(clock.adjust(Unit::Minute, Step::Up), None);
    }

    #[test]
    fn second_adjust_bounds() {
        let mut clock = at(0);
        assert_eq!(clock.adjust(Unit::Second, Step::Down), None);
        assert!(clock.elapsed().is_zero());

        let mut clock = at(359_998);
        assert_eq!(clock.adjust(Unit::Second, Step::Up), Some(ElapsedTime::MAX));
        assert_eq!(clock.adjust(Unit::Second, Step::Up), None);
        assert_eq!(clock.elapsed(), ElapsedTime::MAX);
    }

    #[test]
    fn hour_up_applies_below_threshold() {
        // 355000 < 356400, so one more hour still fits
        let mut clock = at(355_000);
        assert_eq!(clock.adjust(Unit::Hour, Step::Up), ElapsedTime::new(358_600));
    }

    #[test]
    fn adjust_matches_threshold_rule_everywhere() {
        for secs in (0..=MAX_SECONDS).step_by(7) {
            let mut clock = at(secs);
            let applied = clock.adjust(Unit::Hour, Step::Up).is_some();
            assert_eq!(applied, secs < 356_400, "t = {secs}");

            let mut clock = at(secs);
            let applied = clock.adjust(Unit::Hour, Step::Down).is_some();
            assert_eq!(applied, secs >= 3600, "t = {secs}");
        }
    }
}
