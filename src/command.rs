//! DCS and vendor command definitions
//!
//! Standard MIPI Display Command Set opcodes shared by both controllers,
//! followed by the vendor-specific registers used in the ST7785 and
//! ILI9881D bring-up tables.
//!
//! Every command travels as a single DSI write: the opcode is the first
//! byte of the buffer and any parameters follow it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use dsi_panel::{command, DsiInterface};
//! # struct Host;
//! # impl DsiInterface for Host {
//! #     type Error = Infallible;
//! #     fn write_buffer(&mut self, _buf: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut dsi = Host;
//! // 18 bits per pixel on the DBI side
//! let _ = dsi.write_buffer(&[command::SET_PIXEL_FORMAT, command::COL_FMT_18BPP]);
//! let _ = dsi.write_buffer(&[command::SET_DISPLAY_ON]);
//! ```

// Standard DCS commands

/// Enter sleep mode (0x10)
///
/// Stops the display and the internal oscillator. The panel needs the
/// sleep-out blanking time before it may be woken again.
pub const ENTER_SLEEP_MODE: u8 = 0x10;

/// Exit sleep mode (0x11)
///
/// After issuing, the controller needs up to 120ms before it accepts
/// further commands.
pub const EXIT_SLEEP_MODE: u8 = 0x11;

/// Display inversion off (0x20)
pub const EXIT_INVERT_MODE: u8 = 0x20;

/// Display inversion on (0x21)
pub const ENTER_INVERT_MODE: u8 = 0x21;

/// Display off (0x28)
///
/// Blanks the output; frame memory is kept.
pub const SET_DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const SET_DISPLAY_ON: u8 = 0x29;

/// Tearing effect line off (0x34)
pub const SET_TEAR_OFF: u8 = 0x34;

/// Tearing effect line on (0x35)
///
/// Requires 1 byte: the tear mode (0x00 = V-blank only, 0x01 = V and H-blank).
pub const SET_TEAR_ON: u8 = 0x35;

/// Memory data access control (0x36)
///
/// Requires 1 byte: scan direction and RGB/BGR order.
pub const SET_ADDRESS_MODE: u8 = 0x36;

/// Interface pixel format (0x3A)
///
/// Requires 1 byte, see the `COL_FMT_*` values.
pub const SET_PIXEL_FORMAT: u8 = 0x3A;

/// 16 bits per pixel for [`SET_PIXEL_FORMAT`]
pub const COL_FMT_16BPP: u8 = 0x55;
/// 18 bits per pixel for [`SET_PIXEL_FORMAT`]
pub const COL_FMT_18BPP: u8 = 0x66;
/// 24 bits per pixel for [`SET_PIXEL_FORMAT`]
pub const COL_FMT_24BPP: u8 = 0x77;

// ST7785 vendor registers

/// RAM control (0xB0)
pub const ST7785_RAMCTRL: u8 = 0xB0;
/// Porch setting (0xB2), 5 bytes
pub const ST7785_PORCTRL: u8 = 0xB2;
/// Gate control (0xB7)
pub const ST7785_GCTRL: u8 = 0xB7;
/// VCOM setting (0xBB)
pub const ST7785_VCOMS: u8 = 0xBB;
/// LCM control (0xC0)
pub const ST7785_LCMCTRL: u8 = 0xC0;
/// VDV and VRH command enable (0xC2)
pub const ST7785_VDVVRHEN: u8 = 0xC2;
/// VRH set (0xC3)
pub const ST7785_VRHS: u8 = 0xC3;
/// VDV set (0xC4)
pub const ST7785_VDVS: u8 = 0xC4;
/// VCOM offset set (0xC5)
pub const ST7785_VCMOFSET: u8 = 0xC5;
/// Frame rate control in normal mode (0xC6)
pub const ST7785_FRCTRL2: u8 = 0xC6;
/// Power control 1 (0xD0)
pub const ST7785_PWCTRL1: u8 = 0xD0;

// ILI9881D vendor registers

/// Page select command prefix for the ILI9881 family
///
/// The full command is the prefix followed by the page number. Page 0 holds
/// the standard DCS commands; pages 1, 3 and 4 hold the gamma, GIP and power
/// registers.
pub const ILI9881_PAGE_SELECT: [u8; 3] = [0xFF, 0x98, 0x81];
