//! Display mode and bus format reporting
//!
//! A [`DisplayMode`] describes the video timing the DSI host must generate
//! for a panel. Together with [`DisplayInfo`] it is what a panel hands to the
//! display pipeline through a [`Connector`].

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Mode type bits, as understood by the display pipeline
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModeType: u32 {
        /// Preferred mode of the sink
        const PREFERRED = 1 << 3;
        /// Mode supplied by the driver rather than read from the sink
        const DRIVER = 1 << 6;
    }
}

bitflags! {
    /// Bus signal polarity flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BusFlags: u32 {
        /// Data-enable signal is active low
        const DE_LOW = 1 << 0;
        /// Data-enable signal is active high
        const DE_HIGH = 1 << 1;
        /// Pixel data driven on the rising edge of the pixel clock
        const PIXDATA_DRIVE_POSEDGE = 1 << 2;
        /// Pixel data driven on the falling edge of the pixel clock
        const PIXDATA_DRIVE_NEGEDGE = 1 << 3;
        /// Pixel data sampled on the rising edge (driven on the falling edge)
        const PIXDATA_SAMPLE_POSEDGE = 1 << 3;
        /// Pixel data sampled on the falling edge (driven on the rising edge)
        const PIXDATA_SAMPLE_NEGEDGE = 1 << 2;
    }
}

/// Media bus pixel formats a panel accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum BusFormat {
    /// 24-bit RGB, one sample per clock
    Rgb888_1x24 = 0x100A,
    /// 18-bit RGB, one sample per clock
    Rgb666_1x18 = 0x1009,
    /// 16-bit RGB, one sample per clock
    Rgb565_1x16 = 0x1017,
}

impl BusFormat {
    /// Media bus format code
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Bits carried per pixel
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rgb888_1x24 => 24,
            Self::Rgb666_1x18 => 18,
            Self::Rgb565_1x16 => 16,
        }
    }
}

/// Bus formats reported for every panel, in preference order
pub const BUS_FORMATS: [BusFormat; 3] = [
    BusFormat::Rgb888_1x24,
    BusFormat::Rgb666_1x18,
    BusFormat::Rgb565_1x16,
];

/// Bus flags reported for every panel
pub const BUS_FLAGS: BusFlags = BusFlags::DE_LOW.union(BusFlags::PIXDATA_SAMPLE_POSEDGE);

/// Video timing and physical size of a panel
///
/// Horizontal values are in pixels and vertical values in lines, each
/// counted from the start of the active area. `clock` is the pixel clock in
/// kHz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub clock: u32,
    /// Active pixels per line
    pub hdisplay: u16,
    /// Start of horizontal sync
    pub hsync_start: u16,
    /// End of horizontal sync
    pub hsync_end: u16,
    /// Total pixels per line
    pub htotal: u16,
    /// Active lines
    pub vdisplay: u16,
    /// Start of vertical sync
    pub vsync_start: u16,
    /// End of vertical sync
    pub vsync_end: u16,
    /// Total lines per frame
    pub vtotal: u16,
    /// Physical width in millimeters
    pub width_mm: u16,
    /// Physical height in millimeters
    pub height_mm: u16,
    /// Mode type bits
    pub mode_type: ModeType,
}

impl DisplayMode {
    /// Refresh rate in Hz, rounded to the closest integer
    ///
    /// Returns 0 for a mode with no total area.
    pub fn vrefresh(&self) -> u32 {
        let total = u64::from(self.htotal) * u64::from(self.vtotal);
        if total == 0 {
            return 0;
        }
        let num = u64::from(self.clock) * 1000;
        ((num + total / 2) / total) as u32
    }

    /// Copy of this mode flagged as driver-supplied and preferred
    pub fn preferred(&self) -> Self {
        Self {
            mode_type: self.mode_type | ModeType::DRIVER | ModeType::PREFERRED,
            ..*self
        }
    }

    /// Horizontal front porch in pixels
    pub fn hfront_porch(&self) -> u16 {
        self.hsync_start - self.hdisplay
    }

    /// Horizontal sync length in pixels
    pub fn hsync_len(&self) -> u16 {
        self.hsync_end - self.hsync_start
    }

    /// Horizontal back porch in pixels
    pub fn hback_porch(&self) -> u16 {
        self.htotal - self.hsync_end
    }

    /// Vertical front porch in lines
    pub fn vfront_porch(&self) -> u16 {
        self.vsync_start - self.vdisplay
    }

    /// Vertical sync length in lines
    pub fn vsync_len(&self) -> u16 {
        self.vsync_end - self.vsync_start
    }

    /// Vertical back porch in lines
    pub fn vback_porch(&self) -> u16 {
        self.vtotal - self.vsync_end
    }
}

/// Mode name, `<hdisplay>x<vdisplay>`
impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.hdisplay, self.vdisplay)
    }
}

/// Static sink properties reported alongside the modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Physical width in millimeters
    pub width_mm: u16,
    /// Physical height in millimeters
    pub height_mm: u16,
    /// Bus signal polarity
    pub bus_flags: BusFlags,
    /// Accepted bus formats, most preferred first
    pub bus_formats: &'static [BusFormat],
}

/// Receiver of the modes a panel reports
///
/// Implemented by the host's connector object. `add_probed_mode` may fail
/// (typically when the mode cannot be allocated); the panel then reports
/// nothing else.
pub trait Connector {
    /// Error raised when a mode cannot be added
    type Error: fmt::Debug;

    /// Add a mode to the connector's probed list
    fn add_probed_mode(&mut self, mode: DisplayMode) -> Result<(), Self::Error>;

    /// Record the sink's physical size and bus properties
    fn set_display_info(&mut self, info: DisplayInfo);
}

impl<T: Connector + ?Sized> Connector for &mut T {
    type Error = T::Error;

    fn add_probed_mode(&mut self, mode: DisplayMode) -> Result<(), Self::Error> {
        T::add_probed_mode(self, mode)
    }

    fn set_display_info(&mut self, info: DisplayInfo) {
        T::set_display_info(self, info);
    }
}
