//! Panel descriptors, configuration types and builder

use bitflags::bitflags;

use crate::error::BuilderError;
use crate::mode::DisplayMode;
use crate::sequence::{InitSequence, Instruction};

/// Time the controller needs after "exit sleep" before it accepts commands
///
/// Also the longest blanking time after a reset issued in sleep-out mode.
pub const SLEEP_OUT_DELAY_MS: u32 = 120;

bitflags! {
    /// DSI link mode flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DsiModeFlags: u32 {
        /// Video mode (as opposed to command mode)
        const VIDEO = 1 << 0;
        /// Burst video mode
        const VIDEO_BURST = 1 << 1;
        /// Video mode with sync pulses instead of sync events
        const VIDEO_SYNC_PULSE = 1 << 2;
        /// Automatic vertical timing
        const VIDEO_AUTO_VERT = 1 << 3;
        /// Send horizontal sync end packets
        const VIDEO_HSE = 1 << 4;
        /// Disable end-of-transmission packets
        const NO_EOT_PACKET = 1 << 9;
        /// Clock lane may stop between transfers
        const CLOCK_NON_CONTINUOUS = 1 << 10;
        /// Send commands in low-power mode
        const LPM = 1 << 11;
    }
}

/// Pixel format on the DSI link
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24 bits per pixel
    #[default]
    Rgb888,
    /// 18 bits per pixel, loosely packed in 24
    Rgb666,
    /// 18 bits per pixel, tightly packed
    Rgb666Packed,
    /// 16 bits per pixel
    Rgb565,
}

impl PixelFormat {
    /// Bits transferred per pixel on the link
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rgb888 | Self::Rgb666 => 24,
            Self::Rgb666Packed => 18,
            Self::Rgb565 => 16,
        }
    }
}

/// Link parameters handed to the host on attach
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DsiSettings {
    /// Number of data lanes
    pub lanes: u8,
    /// Pixel format
    pub format: PixelFormat,
    /// Link mode flags
    pub flags: DsiModeFlags,
}

/// Reset and power-on timing of a panel model
///
/// All values are in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerTiming {
    /// Release pulse at probe: the reset is released for this long before
    /// being asserted, or simply asserted when `None`
    pub probe_release_ms: Option<u32>,
    /// Wait at the start of prepare, before touching the reset line
    pub prepare_delay_ms: u32,
    /// Reset assertion before release in prepare, skipped when `None`
    pub prepare_reset_ms: Option<u32>,
    /// Wait after the reset is released in prepare
    pub reset_settle_ms: u32,
    /// Reset assertion before release in unprepare; the reset is left
    /// asserted when `None`
    pub unprepare_reset_ms: Option<u32>,
}

/// Compile-time description of one panel model
///
/// Descriptors are `'static` and never mutated; see [`crate::models`] for
/// the built-in ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelDescriptor {
    /// Human readable panel name
    pub name: &'static str,
    /// Devicetree compatible string selecting this descriptor
    pub compatible: &'static str,
    /// Native video mode
    pub mode: DisplayMode,
    /// Number of DSI data lanes
    pub lanes: u8,
    /// DSI link mode flags
    pub flags: DsiModeFlags,
    /// DSI pixel format
    pub format: PixelFormat,
    /// Power supply names, for hosts that switch regulators
    pub supplies: &'static [&'static str],
    /// Extra wait on top of [`SLEEP_OUT_DELAY_MS`] required by this panel
    pub panel_sleep_delay_ms: u32,
    /// Bring-up table replayed on enable
    pub init: InitSequence,
    /// Replayed on enable after the sleep-out wait
    pub post_init: &'static [Instruction],
    /// Reset timing
    pub timing: PowerTiming,
}

impl PanelDescriptor {
    /// Total wait after sleep-out and after reset
    pub const fn sleep_delay_ms(&self) -> u32 {
        SLEEP_OUT_DELAY_MS + self.panel_sleep_delay_ms
    }

    /// Link parameters for [`DsiInterface::attach`](crate::DsiInterface::attach)
    pub const fn dsi_settings(&self) -> DsiSettings {
        DsiSettings {
            lanes: self.lanes,
            format: self.format,
            flags: self.flags,
        }
    }
}

/// Panel configuration
///
/// A resolved descriptor plus the board wiring options.
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Panel descriptor
    pub descriptor: &'static PanelDescriptor,
    /// Whether the reset line is active low (asserted = driven low)
    pub reset_active_low: bool,
}

impl Config {
    /// Configuration for the built-in panel matching `compatible`, with
    /// default wiring
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::UnknownCompatible` if no built-in panel matches.
    pub fn for_compatible(compatible: &str) -> Result<Self, BuilderError> {
        Builder::new()
            .descriptor(crate::models::find(compatible)?)
            .build()
    }

    /// Total wait after sleep-out and after reset, in milliseconds
    pub fn sleep_delay_ms(&self) -> u32 {
        self.descriptor.sleep_delay_ms()
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```rust,no_run
/// use dsi_panel::{Builder, models};
///
/// let config = match Builder::new()
///     .descriptor(&models::ETML050015DHA)
///     .reset_active_low(false)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Panel descriptor (required)
    descriptor: Option<&'static PanelDescriptor>,
    /// Reset line polarity
    reset_active_low: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            descriptor: None,
            // Reset lines on these panels are active low
            reset_active_low: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel descriptor (required)
    pub fn descriptor(mut self, descriptor: &'static PanelDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Set reset line polarity
    ///
    /// Default is active-low. Set to false when the board inverts the line.
    pub fn reset_active_low(mut self, value: bool) -> Self {
        self.reset_active_low = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDescriptor` if no descriptor was set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            descriptor: self.descriptor.ok_or(BuilderError::MissingDescriptor)?,
            reset_active_low: self.reset_active_low,
        })
    }
}
