//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Pixels serialized per SPI transfer when streaming colors
const PIXEL_CHUNK: usize = 32;

/// Display handle for an ILI9341-style controller
///
/// Owns the interface for its whole lifetime, so nothing else can talk to the
/// controller while the init sequence runs. Use [`release`](Self::release)
/// to get the interface back.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Whether the init sequence has completed
    initialized: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`reset`](Self::reset) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            initialized: false,
        }
    }

    /// Perform hardware reset, send the init sequence and light the backlight
    ///
    /// Blocks for the reset pulse and every delay in the init sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] for the first failed transfer. The display
    /// is left uninitialized and the backlight untouched.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.initialized = false;
        self.interface.reset(delay).map_err(Error::Interface)?;
        self.config
            .init_sequence
            .execute(&mut self.interface, delay)
            .map_err(Error::Interface)?;
        self.interface
            .set_backlight(true)
            .map_err(Error::Interface)?;
        self.initialized = true;
        log::debug!(
            "display ready: {}x{}",
            self.config.dimensions.width(),
            self.config.dimensions.height()
        );
        Ok(())
    }

    /// Set the RAM window that following pixel writes fill
    ///
    /// Coordinates are inclusive and relative to the panel; the configured
    /// column/row start is added before they are sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the window is empty, leaves the panel,
    /// or lands past the last RAM address once the offset is added.
    pub fn set_address_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        if x0 > x1 || y0 > y1 || x1 >= dims.width() || y1 >= dims.height() {
            return Err(Error::InvalidWindow { x0, y0, x1, y1 });
        }

        let column_start = self.config.column_start;
        let row_start = self.config.row_start;
        let (Some(ram_x1), Some(ram_y1)) =
            (x1.checked_add(column_start), y1.checked_add(row_start))
        else {
            return Err(Error::InvalidWindow { x0, y0, x1, y1 });
        };
        // x0 <= x1 and y0 <= y1, so the starts cannot overflow either
        self.send_bounds(self.config.set_column_command, x0 + column_start, ram_x1)?;
        self.send_bounds(self.config.set_row_command, y0 + row_start, ram_y1)
    }

    /// Write raw pixel bytes into the current address window
    pub fn write_pixels(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.send_command(self.config.write_memory_command)?;
        self.send_data(data)
    }

    /// Write RGB565 pixels into the current address window
    ///
    /// Byte order follows [`Config::swap_pixel_bytes`].
    pub fn write_pixel_words(&mut self, pixels: &[u16]) -> DisplayResult<I> {
        self.send_command(self.config.write_memory_command)?;
        let mut buf = [0u8; PIXEL_CHUNK * 2];
        for chunk in pixels.chunks(PIXEL_CHUNK) {
            for (out, &pixel) in buf.chunks_exact_mut(2).zip(chunk) {
                out.copy_from_slice(&self.pixel_bytes(pixel));
            }
            self.send_data(&buf[..chunk.len() * 2])?;
        }
        Ok(())
    }

    /// Fill a window with one RGB565 color
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the window is empty or leaves the panel.
    pub fn fill_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> DisplayResult<I> {
        self.set_address_window(x0, y0, x1, y1)?;
        let mut remaining = usize::from(x1 - x0 + 1) * usize::from(y1 - y0 + 1);

        let mut buf = [0u8; PIXEL_CHUNK * 2];
        let bytes = self.pixel_bytes(color);
        for out in buf.chunks_exact_mut(2) {
            out.copy_from_slice(&bytes);
        }

        self.send_command(self.config.write_memory_command)?;
        while remaining > 0 {
            let count = remaining.min(PIXEL_CHUNK);
            self.send_data(&buf[..count * 2])?;
            remaining -= count;
        }
        Ok(())
    }

    /// Fill the whole panel with one RGB565 color
    pub fn fill_screen(&mut self, color: u16) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        self.fill_window(0, 0, dims.width() - 1, dims.height() - 1, color)
    }

    /// Switch the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> DisplayResult<I> {
        self.interface.set_backlight(on).map_err(Error::Interface)
    }

    /// Whether [`reset`](Self::reset) has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn send_bounds(&mut self, command: u8, start: u16, end: u16) -> DisplayResult<I> {
        self.send_command(command)?;
        if self.config.single_byte_bounds {
            self.send_data(&[start as u8, end as u8])
        } else {
            let [start_hi, start_lo] = start.to_be_bytes();
            let [end_hi, end_lo] = end.to_be_bytes();
            self.send_data(&[start_hi, start_lo, end_hi, end_lo])
        }
    }

    fn pixel_bytes(&self, pixel: u16) -> [u8; 2] {
        if self.config.swap_pixel_bytes {
            pixel.to_be_bytes()
        } else {
            pixel.to_le_bytes()
        }
    }

    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::sequence::InitSequence;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Reset,
        Command(u8),
        Data(Vec<u8>),
        Backlight(bool),
    }

    #[derive(Debug)]
    struct MockInterface {
        events: Vec<Event>,
        fail_reset: bool,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                events: Vec::new(),
                fail_reset: false,
            }
        }

        fn data_bytes(&self) -> usize {
            self.events
                .iter()
                .map(|event| match event {
                    Event::Data(data) => data.len(),
                    _ => 0,
                })
                .sum()
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = &'static str;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.events.push(Event::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.events.push(Event::Data(data.to_vec()));
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            if self.fail_reset {
                return Err("reset");
            }
            self.events.push(Event::Reset);
            Ok(())
        }

        fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
            self.events.push(Event::Backlight(on));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    const TABLE: &[u8] = &[0x01, 0x80, 0x80, 0x3a, 1, 0x55, 0x29, 0x80, 0x78];

    fn test_display(builder: Builder) -> Display<MockInterface> {
        let config = builder
            .dimensions(Dimensions::new(320, 240).unwrap())
            .init_sequence(InitSequence::new(TABLE).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface::new(), config)
    }

    #[test]
    fn test_reset_runs_sequence_then_backlight() {
        let mut display = test_display(Builder::new());
        let mut delay = MockDelay::default();
        assert!(!display.is_initialized());

        assert!(display.reset(&mut delay).is_ok());

        assert!(display.is_initialized());
        assert_eq!(
            display.interface.events,
            alloc::vec![
                Event::Reset,
                Event::Command(0x01),
                Event::Command(0x3a),
                Event::Data(alloc::vec![0x55]),
                Event::Command(0x29),
                Event::Backlight(true),
            ]
        );
        assert_eq!(delay.total_ms, 248);
    }

    #[test]
    fn test_reset_failure_leaves_display_uninitialized() {
        let mut display = test_display(Builder::new());
        display.interface.fail_reset = true;
        let mut delay = MockDelay::default();

        let result = display.reset(&mut delay);

        assert!(matches!(result, Err(Error::Interface("reset"))));
        assert!(!display.is_initialized());
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_address_window_sends_16_bit_bounds() {
        let mut display = test_display(Builder::new());
        assert!(display.set_address_window(10, 20, 300, 239).is_ok());
        assert_eq!(
            display.interface.events,
            alloc::vec![
                Event::Command(0x2A),
                Event::Data(alloc::vec![0x00, 10, 0x01, 0x2C]),
                Event::Command(0x2B),
                Event::Data(alloc::vec![0x00, 20, 0x00, 239]),
            ]
        );
    }

    #[test]
    fn test_address_window_applies_offsets_and_single_byte_bounds() {
        let mut display = test_display(Builder::new().offset(2, 3).single_byte_bounds(true));
        assert!(display.set_address_window(0, 0, 9, 9).is_ok());
        assert_eq!(
            display.interface.events,
            alloc::vec![
                Event::Command(0x2A),
                Event::Data(alloc::vec![2, 11]),
                Event::Command(0x2B),
                Event::Data(alloc::vec![3, 12]),
            ]
        );
    }

    #[test]
    fn test_address_window_out_of_bounds() {
        let mut display = test_display(Builder::new());
        let result = display.set_address_window(0, 0, 320, 10);
        assert!(matches!(result, Err(Error::InvalidWindow { x1: 320, .. })));
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_address_window_offset_overflow_is_rejected() {
        let mut config = Builder::new()
            .dimensions(Dimensions::new(320, 240).unwrap())
            .init_sequence(InitSequence::new(TABLE).unwrap())
            .build()
            .unwrap();
        // Fields are public, so the builder check can be bypassed
        config.column_start = u16::MAX;
        let mut display = Display::new(MockInterface::new(), config);

        let result = display.set_address_window(1, 0, 1, 0);
        assert!(matches!(
            result,
            Err(Error::InvalidWindow {
                x0: 1,
                y0: 0,
                x1: 1,
                y1: 0
            })
        ));
        assert!(display.interface.events.is_empty());
        assert!(display.fill_screen(0xFFFF).is_err());
    }

    #[test]
    fn test_address_window_reversed() {
        let mut display = test_display(Builder::new());
        let result = display.set_address_window(0, 10, 5, 9);
        assert!(matches!(result, Err(Error::InvalidWindow { .. })));
    }

    #[test]
    fn test_write_pixels_sends_memory_write() {
        let mut display = test_display(Builder::new());
        assert!(display.write_pixels(&[0xF8, 0x00]).is_ok());
        assert_eq!(
            display.interface.events,
            alloc::vec![Event::Command(0x2C), Event::Data(alloc::vec![0xF8, 0x00])]
        );
    }

    #[test]
    fn test_write_pixel_words_byte_order() {
        let mut display = test_display(Builder::new());
        assert!(display.write_pixel_words(&[0xF800, 0x001F]).is_ok());
        assert_eq!(
            display.interface.events.last(),
            Some(&Event::Data(alloc::vec![0xF8, 0x00, 0x00, 0x1F]))
        );

        let mut display = test_display(Builder::new().swap_pixel_bytes(false));
        assert!(display.write_pixel_words(&[0xF800]).is_ok());
        assert_eq!(
            display.interface.events.last(),
            Some(&Event::Data(alloc::vec![0x00, 0xF8]))
        );
    }

    #[test]
    fn test_write_pixel_words_chunks_long_runs() {
        let mut display = test_display(Builder::new());
        let pixels = alloc::vec![0xFFFFu16; PIXEL_CHUNK * 2 + 5];
        assert!(display.write_pixel_words(&pixels).is_ok());
        assert_eq!(display.interface.data_bytes(), pixels.len() * 2);
        assert_eq!(display.interface.events.len(), 4);
    }

    #[test]
    fn test_fill_window_sends_every_pixel() {
        let mut display = test_display(Builder::new());
        assert!(display.fill_window(0, 0, 9, 9, 0x07E0).is_ok());
        // 2 address commands with bounds, then the pixel data
        assert_eq!(display.interface.events[4], Event::Command(0x2C));
        assert_eq!(display.interface.data_bytes(), 8 + 100 * 2);
        assert_eq!(
            display.interface.events.last(),
            Some(&Event::Data([0x07u8, 0xE0].repeat(4)))
        );
    }

    #[test]
    fn test_fill_screen_covers_panel() {
        let mut display = test_display(Builder::new());
        assert!(display.fill_screen(0x0000).is_ok());
        assert_eq!(display.interface.data_bytes(), 8 + 320 * 240 * 2);
    }

    #[test]
    fn test_release_returns_interface() {
        let mut display = test_display(Builder::new());
        assert!(display.set_backlight(false).is_ok());
        let interface = display.release();
        assert_eq!(interface.events, alloc::vec![Event::Backlight(false)]);
    }
}
