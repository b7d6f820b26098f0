//! MIPI-DSI LCD Panel Drivers
//!
//! Bring-up drivers for MIPI-DSI panels built on the Sitronix ST7785 and
//! Ilitek ILI9881D controllers.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` geometry (with `graphics` feature)
//! - Built-in descriptors selected by devicetree-style compatible strings
//! - One lifecycle state machine (prepare, enable, disable, unprepare) with
//!   built-in locking for every panel model
//! - Table-driven init sequences with register page switching
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use dsi_panel::embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use dsi_panel::{Config, DsiInterface, NoPin, Panel};
//! use embedded_hal::delay::DelayNs;
//!
//! # struct Host;
//! # impl DsiInterface for Host {
//! #     type Error = Infallible;
//! #     fn write_buffer(&mut self, _buf: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let config = match Config::for_compatible("et0240h6dma,st7785") {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let panel = match Panel::<NoopRawMutex, _, NoPin, NoPin>::probe(
//!     Host, None, None, config, &mut delay,
//! ) {
//!     Ok(panel) => panel,
//!     Err(_) => return,
//! };
//! let _ = panel.prepare(&mut delay);
//! let _ = panel.enable(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub use embassy_sync;

/// DCS and vendor command definitions
pub mod command;
/// Panel descriptors, configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// DSI channel abstraction
pub mod interface;
/// Display mode and bus format reporting
pub mod mode;
/// Built-in panel models
pub mod models;
/// Lifecycle state machine
pub mod panel;
/// Instruction tables and the init-sequence player
pub mod sequence;

/// Geometry support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use config::{
    Builder, Config, DsiModeFlags, DsiSettings, PanelDescriptor, PixelFormat, PowerTiming,
    SLEEP_OUT_DELAY_MS,
};
pub use error::{BuilderError, Error};
pub use interface::{DsiInterface, InterfaceError, NoPin, SpiDcsInterface, TearMode};
pub use mode::{BusFlags, BusFormat, Connector, DisplayInfo, DisplayMode, ModeType};
pub use panel::{Panel, PanelState, Transition};
pub use sequence::{InitSequence, Instruction};
