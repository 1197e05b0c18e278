#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use embedded_hal::digital::v2::{InputPin, OutputPin, PinState};
use max7219::{connectors::SpiConnectorSW, DataError, MAX7219};
use rp_pico::hal::gpio::{
    bank0::{Gpio16, Gpio17, Gpio18, Gpio19},
    DynPinId, FunctionSio, FunctionSpi, Pin, PullDown, PullUp, SioInput, SioOutput,
};
use stopwatch::config::DISPLAY_DOTS;
use stopwatch::display::prepare_buffer;
use stopwatch::{Button, ButtonInputs, DigitSink, Digits, StateLock, Stopwatch};

type Spi0 = rp_pico::hal::spi::Spi<
    rp_pico::hal::spi::Enabled,
    rp_pico::hal::pac::SPI0,
    (
        Pin<Gpio19, FunctionSpi, PullDown>,
        Pin<Gpio16, FunctionSpi, PullDown>,
        Pin<Gpio18, FunctionSpi, PullDown>,
    ),
>;
type CsPin = Pin<Gpio17, FunctionSio<SioOutput>, PullDown>;
type ButtonPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
type OutputPinOf<I> = Pin<I, FunctionSio<SioOutput>, PullDown>;

/// One MAX7219 showing the reading as text. The chip does the digit
/// multiplexing; only changed readings go out over SPI.
pub struct Max7219Display {
    driver: MAX7219<SpiConnectorSW<Spi0, CsPin>>,
    shown: Option<Digits>,
}

impl DigitSink for Max7219Display {
    type Error = DataError;

    fn show(&mut self, digits: &Digits) -> Result<(), DataError> {
        if self.shown == Some(*digits) {
            return Ok(());
        }
        self.driver.write_str(0, &prepare_buffer(digits), DISPLAY_DOTS)?;
        self.shown = Some(*digits);
        Ok(())
    }
}

/// The seven adjust buttons, wired active-low with internal pull-ups, in
/// [`Button::ALL`] order.
pub struct PicoButtons([ButtonPin; Button::COUNT]);

impl ButtonInputs for PicoButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.0[button.index()].is_low().unwrap_or(false)
    }
}

/// [`StateLock`] over an RTIC shared-resource proxy.
pub struct Locked<'a, M>(&'a mut M);

impl<M> StateLock for Locked<'_, M>
where
    M: rtic::Mutex<T = Stopwatch>,
{
    fn lock<R>(&mut self, f: impl FnOnce(&mut Stopwatch) -> R) -> R {
        self.0.lock(f)
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    // RP2040 GPIO writes are infallible
    let _ = pin.set_state(PinState::from(on));
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use cortex_m::delay::Delay;
    use defmt::{info, warn, Debug2Format};
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{
            bank0::{Gpio10, Gpio11, Gpio12, Gpio13, Gpio14, Gpio15, Gpio25},
            Interrupt,
        },
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };
    use stopwatch::config::{
        DISPLAY_INTENSITY, DISPLAY_SPI_BAUD_HZ, INITIAL_SECONDS, SETTLE_DELAY_US, TICK_PERIOD_US,
        XTAL_FREQ_HZ,
    };
    use stopwatch::{AlarmController, EdgeEvent, ElapsedTime, InputController};

    #[shared]
    struct Shared {
        state: Stopwatch,
    }

    #[local]
    struct Local {
        tick_alarm: Alarm0,
        heartbeat: OutputPinOf<Gpio25>,
        reset_pin: Pin<Gpio10, FunctionSio<SioInput>, PullUp>,
        pause_pin: Pin<Gpio11, FunctionSio<SioInput>, PullDown>,
        resume_pin: Pin<Gpio12, FunctionSio<SioInput>, PullUp>,
        display: Max7219Display,
        input: InputController<PicoButtons>,
        alarm: AlarmController,
        delay: Delay,
        buzzer: OutputPinOf<Gpio13>,
        led_up: OutputPinOf<Gpio14>,
        led_down: OutputPinOf<Gpio15>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let delay = Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut tick_alarm = timer.alarm_0().unwrap();
        tick_alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        tick_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        // Edge events: reset and resume idle high, pause idles low
        let reset_pin = pins.gpio10.into_pull_up_input();
        reset_pin.set_interrupt_enabled(Interrupt::EdgeLow, true);
        let pause_pin = pins.gpio11.into_pull_down_input();
        pause_pin.set_interrupt_enabled(Interrupt::EdgeHigh, true);
        let resume_pin = pins.gpio12.into_pull_up_input();
        resume_pin.set_interrupt_enabled(Interrupt::EdgeLow, true);

        let buttons = PicoButtons([
            pins.gpio2.into_pull_up_input().into_dyn_pin(),
            pins.gpio3.into_pull_up_input().into_dyn_pin(),
            pins.gpio4.into_pull_up_input().into_dyn_pin(),
            pins.gpio5.into_pull_up_input().into_dyn_pin(),
            pins.gpio6.into_pull_up_input().into_dyn_pin(),
            pins.gpio7.into_pull_up_input().into_dyn_pin(),
            pins.gpio8.into_pull_up_input().into_dyn_pin(),
        ]);

        let buzzer = pins.gpio13.into_push_pull_output();
        let led_up = pins.gpio14.into_push_pull_output();
        let led_down = pins.gpio15.into_push_pull_output();
        let heartbeat = pins.led.into_push_pull_output();

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            DISPLAY_SPI_BAUD_HZ.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut driver = MAX7219::from_spi_cs(1, spi, cs).unwrap();
        driver.power_on().unwrap();
        driver.set_intensity(0, DISPLAY_INTENSITY).unwrap();
        driver.clear_display(0).unwrap();

        info!("stopwatch up, tick every {} us", TICK_PERIOD_US);

        (
            Shared {
                state: Stopwatch::new(ElapsedTime::from_raw(INITIAL_SECONDS)),
            },
            Local {
                tick_alarm,
                heartbeat,
                reset_pin,
                pause_pin,
                resume_pin,
                display: Max7219Display {
                    driver,
                    shown: None,
                },
                input: InputController::new(buttons, SETTLE_DELAY_US),
                alarm: AlarmController::new(),
                delay,
                buzzer,
                led_up,
                led_down,
            },
            init::Monotonics(),
        )
    }

    /// Main loop: render, evaluate the alarm, poll the buttons.
    #[idle(
        shared = [state],
        local = [display, input, alarm, delay, buzzer, led_up, led_down]
    )]
    fn idle(ctx: idle::Context) -> ! {
        let mut state = ctx.shared.state;
        let display = ctx.local.display;
        let input = ctx.local.input;
        let alarm = ctx.local.alarm;
        let delay = ctx.local.delay;
        let buzzer = ctx.local.buzzer;
        let led_up = ctx.local.led_up;
        let led_down = ctx.local.led_down;

        loop {
            let (elapsed, direction) = state.lock(|sw| (sw.elapsed(), sw.direction()));

            if let Err(e) = display.show(&Digits::from(elapsed)) {
                warn!("display write failed: {}", Debug2Format(&e));
            }

            let (up, down) = direction.indicators();
            drive(led_up, up);
            drive(led_down, down);

            let sounding = state.lock(|sw| alarm.evaluate(sw));
            drive(buzzer, sounding);

            input.poll(delay, &mut Locked(&mut state));
        }
    }

    /// One-second time base.
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [state], local = [tick_alarm, heartbeat])]
    fn tick(mut ctx: tick::Context) {
        ctx.local.tick_alarm.clear_interrupt();
        if ctx
            .local
            .tick_alarm
            .schedule(TICK_PERIOD_US.micros())
            .is_err()
        {
            warn!("tick alarm could not be re-armed");
        }

        if ctx.shared.state.lock(|sw| sw.tick()) {
            let _ = ctx.local.heartbeat.toggle();
        }
    }

    /// Reset, pause and resume edges. Same priority as `tick`, so the two
    /// handlers never preempt each other.
    #[task(
        binds = IO_IRQ_BANK0,
        priority = 1,
        shared = [state],
        local = [reset_pin, pause_pin, resume_pin]
    )]
    fn edge_event(mut ctx: edge_event::Context) {
        let reset = ctx.local.reset_pin.interrupt_status(Interrupt::EdgeLow);
        if reset {
            ctx.local.reset_pin.clear_interrupt(Interrupt::EdgeLow);
        }
        let pause = ctx.local.pause_pin.interrupt_status(Interrupt::EdgeHigh);
        if pause {
            ctx.local.pause_pin.clear_interrupt(Interrupt::EdgeHigh);
        }
        let resume = ctx.local.resume_pin.interrupt_status(Interrupt::EdgeLow);
        if resume {
            ctx.local.resume_pin.clear_interrupt(Interrupt::EdgeLow);
        }

        ctx.shared.state.lock(|sw| {
            if reset {
                sw.handle_edge(EdgeEvent::Reset);
            }
            if pause {
                sw.handle_edge(EdgeEvent::Pause);
            }
            if resume {
                sw.handle_edge(EdgeEvent::Resume);
            }
        });
    }
}
