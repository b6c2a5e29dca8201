//! uGame S3 display wiring
//!
//! The uGame S3 drives an ILI9341 320x240 TFT over SPI2 at 48 MHz (mode 0)
//! with a separate data/command line, reset line and backlight switch. This
//! module describes that wiring and the controller's init sequence, and
//! brings the panel up with [`init`].
//!
//! Pin numbers are ESP32-S3 GPIO numbers; turning them into pin types is up
//! to the platform HAL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_init::board;
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (spi, dc, rst, backlight) = (MockSpi, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! // spi: SpiDevice on SCK=GPIO12, MOSI=GPIO11, CS=GPIO10
//! let mut display = match board::init(spi, dc, rst, backlight, &mut delay) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.fill_screen(0x0000);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{MODE_0, Mode, SpiDevice};

use crate::command::{
    COLUMN_ADDRESS_SET, DELAY, DISPLAY_FUNCTION_CONTROL, DISPLAY_ON, DRIVER_TIMING_CONTROL_A,
    DRIVER_TIMING_CONTROL_B, ENABLE_3G, FRAME_RATE_CONTROL, GAMMA_SET, MEMORY_ACCESS_CONTROL,
    MEMORY_WRITE, NEGATIVE_GAMMA_CORRECTION, PAGE_ADDRESS_SET, PIXEL_FORMAT_SET,
    POSITIVE_GAMMA_CORRECTION, POWER_CONTROL_1, POWER_CONTROL_2, POWER_CONTROL_A, POWER_CONTROL_B,
    POWER_ON_SEQUENCE_CONTROL, PUMP_RATIO_CONTROL, SLEEP_OUT, SOFT_RESET, VCOM_CONTROL_1,
    VCOM_CONTROL_2, VENDOR_EF, VERTICAL_SCROLL_START,
};
use crate::config::{COLOR_DEPTH_RGB565, Config, Dimensions};
use crate::display::Display;
use crate::error::Error;
use crate::interface::Interface;
use crate::sequence::InitSequence;

/// ESP32-S3 GPIO numbers of the display signals
pub mod pins {
    /// SPI clock
    pub const SCK: u8 = 12;
    /// SPI data out
    pub const MOSI: u8 = 11;
    /// Data/command select
    pub const DC: u8 = 9;
    /// Chip select
    pub const CS: u8 = 10;
    /// Controller reset
    pub const RESET: u8 = 13;
    /// Backlight enable
    pub const BACKLIGHT: u8 = 21;
}

/// SPI clock frequency
pub const SPI_FREQUENCY_HZ: u32 = 48_000_000;

/// SPI mode (CPOL 0, CPHA 0)
pub const SPI_MODE: Mode = MODE_0;

/// Panel width after the MADCTL rotation in the init sequence
pub const WIDTH: u16 = 320;

/// Panel height after the MADCTL rotation in the init sequence
pub const HEIGHT: u16 = 240;

/// Backlight is lit when its pin is high
pub const BACKLIGHT_ACTIVE_HIGH: bool = true;

/// ILI9341 init table for the uGame S3 panel
#[rustfmt::skip]
pub const INIT_SEQUENCE_BYTES: &[u8] = &[
    SOFT_RESET, DELAY, 0x80, // wait 128ms
    VENDOR_EF, 3, 0x03, 0x80, 0x02,
    POWER_CONTROL_B, 3, 0x00, 0xC1, 0x30,
    POWER_ON_SEQUENCE_CONTROL, 4, 0x64, 0x03, 0x12, 0x81,
    DRIVER_TIMING_CONTROL_A, 3, 0x85, 0x00, 0x78,
    POWER_CONTROL_A, 5, 0x39, 0x2C, 0x00, 0x34, 0x02,
    PUMP_RATIO_CONTROL, 1, 0x20,
    DRIVER_TIMING_CONTROL_B, 2, 0x00, 0x00,
    POWER_CONTROL_1, 1, 0x23, // VRH[5:0]
    POWER_CONTROL_2, 1, 0x10, // SAP[2:0], BT[3:0]
    VCOM_CONTROL_1, 2, 0x3e, 0x28,
    VCOM_CONTROL_2, 1, 0x86,
    VERTICAL_SCROLL_START, 1, 0x00,
    PIXEL_FORMAT_SET, 1, 0x55, // 16 bpp
    FRAME_RATE_CONTROL, 2, 0x00, 0x18,
    DISPLAY_FUNCTION_CONTROL, 3, 0x08, 0x82, 0x27,
    ENABLE_3G, 1, 0x00, // disabled
    GAMMA_SET, 1, 0x01,
    POSITIVE_GAMMA_CORRECTION, 15,
        0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
    NEGATIVE_GAMMA_CORRECTION, 15,
        0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
    SLEEP_OUT, DELAY, 0x78, // wait 120ms
    DISPLAY_ON, DELAY, 0x78, // wait 120ms
    MEMORY_ACCESS_CONTROL, 1, 0x38, // landscape, BGR
];

/// The validated uGame S3 init sequence
///
/// A malformed [`INIT_SEQUENCE_BYTES`] fails the build here.
#[allow(clippy::panic)]
pub const INIT_SEQUENCE: InitSequence<'static> = match InitSequence::new(INIT_SEQUENCE_BYTES) {
    Ok(sequence) => sequence,
    Err(_) => panic!("malformed uGame S3 init sequence"),
};

/// Panel geometry, checked at build time
#[allow(clippy::panic)]
const DIMENSIONS: Dimensions = match Dimensions::new(WIDTH, HEIGHT) {
    Ok(dims) => dims,
    Err(_) => panic!("invalid uGame S3 panel dimensions"),
};

/// Display configuration for the uGame S3
pub const CONFIG: Config = Config {
    dimensions: DIMENSIONS,
    column_start: 0,
    row_start: 0,
    color_depth: COLOR_DEPTH_RGB565,
    swap_pixel_bytes: true,
    set_column_command: COLUMN_ADDRESS_SET,
    set_row_command: PAGE_ADDRESS_SET,
    write_memory_command: MEMORY_WRITE,
    single_byte_bounds: false,
    init_sequence: INIT_SEQUENCE,
};

/// Display handle type returned by [`init`]
pub type BoardDisplay<SPI, DC, RST, BL> = Display<Interface<SPI, DC, RST, BL>>;

/// Bring up the uGame S3 display
///
/// `spi` must already be configured for [`SPI_FREQUENCY_HZ`] and [`SPI_MODE`]
/// with [`pins::CS`] as its chip select. Resets the controller, sends
/// [`INIT_SEQUENCE`] and turns the backlight on, blocking for roughly 500 ms.
///
/// # Errors
///
/// Returns the first interface failure. The bus and pins are dropped with the
/// failed handle; there is no partial bring-up to resume.
pub fn init<SPI, DC, RST, BL, PinErr, D>(
    spi: SPI,
    dc: DC,
    rst: RST,
    backlight: BL,
    delay: &mut D,
) -> Result<BoardDisplay<SPI, DC, RST, BL>, Error<Interface<SPI, DC, RST, BL>>>
where
    SPI: SpiDevice,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BL: OutputPin<Error = PinErr>,
    PinErr: core::fmt::Debug,
    D: DelayNs,
{
    let mut interface = Interface::new(spi, dc, rst, backlight);
    interface.set_backlight_active_high(BACKLIGHT_ACTIVE_HIGH);

    let mut display = Display::new(interface, CONFIG);
    log::debug!(
        "uGame S3 display: {} records, {}ms of init delays",
        INIT_SEQUENCE.record_count(),
        INIT_SEQUENCE.total_delay_ms()
    );
    display.reset(delay)?;
    Ok(display)
}
