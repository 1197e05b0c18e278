//! Compile-time configuration.

/// Tick period of the time base, one second.
pub const TICK_PERIOD_US: u32 = 1_000_000;

/// How long a button must stay pressed before the press is trusted.
pub const SETTLE_DELAY_US: u32 = 30;

/// Reading loaded at power-up.
pub const INITIAL_SECONDS: u32 = 0;

/// Crystal on the Pico board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

pub const DISPLAY_SPI_BAUD_HZ: u32 = 2_000_000;

/// MAX7219 intensity register, 0x0 (dimmest) to 0xF.
pub const DISPLAY_INTENSITY: u8 = 0x4;

/// Decimal points lit on the MAX7219, one bit per digit, leftmost digit in
/// the MSB. Marks the hour and minute boundaries of `HH.MM.SS`.
pub const DISPLAY_DOTS: u8 = 0b0001_0100;
