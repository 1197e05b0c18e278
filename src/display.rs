use crate::clock::ElapsedTime;

/// The six display digits of a reading, each 0..=9.
///
/// Always derived from an [`ElapsedTime`] right before rendering; never
/// stored or mutated on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digits {
    pub hr2: u8,
    pub hr1: u8,
    pub min2: u8,
    pub min1: u8,
    pub sec2: u8,
    pub sec1: u8,
}

impl Digits {
    /// Digits in scan order, least significant first:
    /// `sec1, sec2, min1, min2, hr1, hr2`.
    pub const fn scan_order(&self) -> [u8; 6] {
        [self.sec1, self.sec2, self.min1, self.min2, self.hr1, self.hr2]
    }

    /// Seconds the digits stand for.
    pub const fn as_secs(&self) -> u32 {
        self.hr2 as u32 * 36_000
            + self.hr1 as u32 * 3_600
            + self.min2 as u32 * 600
            + self.min1 as u32 * 60
            + self.sec2 as u32 * 10
            + self.sec1 as u32
    }
}

impl From<ElapsedTime> for Digits {
    fn from(time: ElapsedTime) -> Self {
        let mut rest = time.as_secs();
        let mut take = |weight: u32| {
            let digit = rest / weight;
            rest -= digit * weight;
            digit as u8
        };
        let hr2 = take(36_000);
        let hr1 = take(3_600);
        let min2 = take(600);
        let min1 = take(60);
        let sec2 = take(10);
        let sec1 = take(1);
        Self {
            hr2,
            hr1,
            min2,
            min1,
            sec2,
            sec1,
        }
    }
}

/// Something that shows six digits, such as a multiplexed seven-segment
/// bank or a display driver that scans by itself.
pub trait DigitSink {
    type Error;

    fn show(&mut self, digits: &Digits) -> Result<(), Self::Error>;
}

/// Renders the digits as the eight characters of a MAX7219 digit row,
/// right-aligned: `"  HHMMSS"`.
pub fn prepare_buffer(digits: &Digits) -> [u8; 8] {
    let ascii = |d: u8| b'0' + d;
    [
        b' ',
        b' ',
        ascii(digits.hr2),
        ascii(digits.hr1),
        ascii(digits.min2),
        ascii(digits.min1),
        ascii(digits.sec2),
        ascii(digits.sec1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MAX_SECONDS;

    #[test]
    fn splits_reading_into_digits() {
        let digits = Digits::from(ElapsedTime::from_raw(12 * 3600 + 34 * 60 + 56));
        assert_eq!(digits.scan_order(), [6, 5, 4, 3, 2, 1]);
        assert_eq!(prepare_buffer(&digits), *b"  123456");
    }

    #[test]
    fn max_reading_is_all_nines() {
        let digits = Digits::from(ElapsedTime::MAX);
        assert_eq!(digits.scan_order(), [9, 5, 9, 5, 9, 9]);
        assert_eq!(prepare_buffer(&digits), *b"  995959");
    }

    #[test]
    fn digits_reconstruct_every_reading() {
        for secs in 0..=MAX_SECONDS {
            let time = ElapsedTime::from_raw(secs);
            let digits = Digits::from(time);
            assert_eq!(digits.as_secs(), secs);
            assert!(digits.scan_order().iter().all(|&d| d <= 9));
            assert_eq!(Digits::from(time), digits);
        }
    }

    #[test]
    fn uninitialised_counter_shows_zero() {
        let digits = Digits::from(ElapsedTime::from_raw(0xFFFF_FFFE));
        assert_eq!(prepare_buffer(&digits), *b"  000000");
    }
}
