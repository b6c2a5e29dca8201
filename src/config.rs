//! Display configuration types and builder

use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, PAGE_ADDRESS_SET};
pub use crate::error::{BuilderError, MAX_EXTENT};
use crate::sequence::InitSequence;

/// Only supported color depth, in bits per pixel (RGB565)
pub const COLOR_DEPTH_RGB565: u8 = 16;

/// Display dimensions, after the rotation applied by the init sequence
///
/// Only constructible through [`Dimensions::new`], so both axes are always
/// within 1..=[`MAX_EXTENT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either axis is 0 or
    /// larger than [`MAX_EXTENT`].
    pub const fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_EXTENT || height == 0 || height > MAX_EXTENT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels (columns)
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels (rows)
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels on the panel
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Display configuration
///
/// Geometry and addressing parameters for a RAM-addressed TFT controller.
/// Use [`Builder`] to create a Config, or take a board preset such as
/// [`board::CONFIG`](crate::board::CONFIG).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// First controller RAM column used by the panel
    pub column_start: u16,
    /// First controller RAM row used by the panel
    pub row_start: u16,
    /// Bits per pixel
    pub color_depth: u8,
    /// Send each 16-bit pixel most significant byte first
    pub swap_pixel_bytes: bool,
    /// Command that sets the column bounds of the address window
    pub set_column_command: u8,
    /// Command that sets the row bounds of the address window
    pub set_row_command: u8,
    /// Command that starts a pixel data write
    pub write_memory_command: u8,
    /// Send window bounds as one byte each instead of 16-bit big-endian
    pub single_byte_bounds: bool,
    /// Commands sent once at boot
    pub init_sequence: InitSequence<'static>,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ili9341_init::{command, Builder, Dimensions, InitSequence};
///
/// const TABLE: &[u8] = &[command::SLEEP_OUT, command::DELAY, 120, command::DISPLAY_ON, 0];
///
/// let dims = match Dimensions::new(240, 320) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let sequence = match InitSequence::new(TABLE) {
///     Ok(sequence) => sequence,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).init_sequence(sequence).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Init sequence (required)
    init_sequence: Option<InitSequence<'static>>,
    /// First controller RAM column used by the panel
    column_start: u16,
    /// First controller RAM row used by the panel
    row_start: u16,
    /// Bits per pixel
    color_depth: u8,
    /// Send each 16-bit pixel most significant byte first
    swap_pixel_bytes: bool,
    /// Column bounds command
    set_column_command: u8,
    /// Row bounds command
    set_row_command: u8,
    /// Pixel write command
    write_memory_command: u8,
    /// One byte per window bound
    single_byte_bounds: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            init_sequence: None,
            // Panel starts at the first RAM column and row
            column_start: 0,
            row_start: 0,
            // RGB565
            color_depth: COLOR_DEPTH_RGB565,
            // The controller expects big-endian pixels on the wire
            swap_pixel_bytes: true,
            // MIPI DCS addressing commands
            set_column_command: COLUMN_ADDRESS_SET,
            set_row_command: PAGE_ADDRESS_SET,
            write_memory_command: MEMORY_WRITE,
            single_byte_bounds: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the init sequence (required)
    pub fn init_sequence(mut self, sequence: InitSequence<'static>) -> Self {
        self.init_sequence = Some(sequence);
        self
    }

    /// Set the first RAM column and row used by the panel
    pub fn offset(mut self, column_start: u16, row_start: u16) -> Self {
        self.column_start = column_start;
        self.row_start = row_start;
        self
    }

    /// Set color depth in bits per pixel
    pub fn color_depth(mut self, bits: u8) -> Self {
        self.color_depth = bits;
        self
    }

    /// Set whether 16-bit pixels go out most significant byte first
    pub fn swap_pixel_bytes(mut self, value: bool) -> Self {
        self.swap_pixel_bytes = value;
        self
    }

    /// Set the column, row and memory write commands
    pub fn addressing_commands(mut self, set_column: u8, set_row: u8, write_memory: u8) -> Self {
        self.set_column_command = set_column;
        self.set_row_command = set_row;
        self.write_memory_command = write_memory;
        self
    }

    /// Set whether window bounds are sent as single bytes
    pub fn single_byte_bounds(mut self, value: bool) -> Self {
        self.single_byte_bounds = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` or
    /// `BuilderError::MissingInitSequence` if a required field was not set,
    /// `BuilderError::UnsupportedColorDepth` for anything but 16 bpp, and
    /// `BuilderError::InvalidOffset` if the offset panel does not fit in
    /// 16-bit RAM addresses.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.color_depth != COLOR_DEPTH_RGB565 {
            return Err(BuilderError::UnsupportedColorDepth(self.color_depth));
        }
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let last_column = self.column_start.checked_add(dimensions.width - 1);
        let last_row = self.row_start.checked_add(dimensions.height - 1);
        if last_column.is_none() || last_row.is_none() {
            return Err(BuilderError::InvalidOffset {
                column_start: self.column_start,
                row_start: self.row_start,
            });
        }
        Ok(Config {
            dimensions,
            init_sequence: self
                .init_sequence
                .ok_or(BuilderError::MissingInitSequence)?,
            column_start: self.column_start,
            row_start: self.row_start,
            color_depth: self.color_depth,
            swap_pixel_bytes: self.swap_pixel_bytes,
            set_column_command: self.set_column_command,
            set_row_command: self.set_row_command,
            write_memory_command: self.write_memory_command,
            single_byte_bounds: self.single_byte_bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[u8] = &[0x11, 0x80, 0x78, 0x29, 0];

    fn sequence() -> InitSequence<'static> {
        InitSequence::new(TABLE).unwrap()
    }

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(320, 240).is_ok());
        assert!(Dimensions::new(240, 320).is_ok());
        assert_eq!(
            Dimensions::new(0, 240),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 240
            })
        );
        assert!(Dimensions::new(321, 240).is_err());
        assert!(Dimensions::new(320, 0).is_err());
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(Dimensions::new(320, 240).unwrap().pixel_count(), 76_800);
    }

    #[test]
    fn test_build_requires_dimensions() {
        let result = Builder::new().init_sequence(sequence()).build();
        assert_eq!(result, Err(BuilderError::MissingDimensions));
    }

    #[test]
    fn test_build_requires_init_sequence() {
        let result = Builder::new()
            .dimensions(Dimensions::new(320, 240).unwrap())
            .build();
        assert_eq!(result, Err(BuilderError::MissingInitSequence));
    }

    #[test]
    fn test_build_rejects_other_color_depths() {
        let result = Builder::new()
            .dimensions(Dimensions::new(320, 240).unwrap())
            .init_sequence(sequence())
            .color_depth(18)
            .build();
        assert_eq!(result, Err(BuilderError::UnsupportedColorDepth(18)));
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(320, 240).unwrap())
            .init_sequence(sequence())
            .build()
            .unwrap();
        assert_eq!(config.column_start, 0);
        assert_eq!(config.row_start, 0);
        assert_eq!(config.color_depth, 16);
        assert!(config.swap_pixel_bytes);
        assert_eq!(config.set_column_command, 0x2A);
        assert_eq!(config.set_row_command, 0x2B);
        assert_eq!(config.write_memory_command, 0x2C);
        assert!(!config.single_byte_bounds);
        assert_eq!(config.init_sequence.as_bytes(), TABLE);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 160).unwrap())
            .init_sequence(sequence())
            .offset(2, 1)
            .swap_pixel_bytes(false)
            .addressing_commands(0x15, 0x75, 0x5C)
            .single_byte_bounds(true)
            .build()
            .unwrap();
        assert_eq!((config.column_start, config.row_start), (2, 1));
        assert!(!config.swap_pixel_bytes);
        assert_eq!(
            (
                config.set_column_command,
                config.set_row_command,
                config.write_memory_command
            ),
            (0x15, 0x75, 0x5C)
        );
        assert!(config.single_byte_bounds);
    }

    #[test]
    fn test_build_rejects_offset_past_address_range() {
        let dims = Dimensions::new(320, 240).unwrap();
        let result = Builder::new()
            .dimensions(dims)
            .init_sequence(sequence())
            .offset(u16::MAX, 0)
            .build();
        assert_eq!(
            result,
            Err(BuilderError::InvalidOffset {
                column_start: u16::MAX,
                row_start: 0
            })
        );

        let result = Builder::new()
            .dimensions(dims)
            .init_sequence(sequence())
            .offset(0, u16::MAX - 238)
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidOffset { .. })));

        // Last row lands exactly on u16::MAX
        let result = Builder::new()
            .dimensions(dims)
            .init_sequence(sequence())
            .offset(u16::MAX - 319, u16::MAX - 239)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_dimensions_accessors() {
        let dims = Dimensions::new(128, 160).unwrap();
        assert_eq!((dims.width(), dims.height()), (128, 160));
    }
}
