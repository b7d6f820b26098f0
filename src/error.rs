//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and panel operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors while resolving a panel descriptor into a config
//! - [`Error`] - Runtime errors during lifecycle transitions
//! - [`InterfaceError`](crate::interface::InterfaceError) - Errors of the SPI bench transport
//!
//! ## Example
//!
//! ```
//! use dsi_panel::{Builder, BuilderError, models};
//!
//! // Missing descriptor
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDescriptor)));
//!
//! // Unknown compatible string
//! let result = models::find("acme,unknown-panel");
//! assert!(matches!(result, Err(BuilderError::UnknownCompatible)));
//! ```

use embedded_hal::{digital, pwm};

use crate::panel::{PanelState, Transition};

/// Errors that can occur when driving the panel
///
/// Generic over the DSI transport error so callers can match on the
/// underlying failure reported by their host.
#[derive(Debug)]
pub enum Error<E> {
    /// DSI transport error
    ///
    /// Wraps the error returned by [`DsiInterface`](crate::DsiInterface).
    /// When raised during enable, the panel is left partially initialized.
    Dsi(E),
    /// Reset GPIO could not be driven
    Reset(digital::ErrorKind),
    /// Backlight could not be adjusted
    Backlight(pwm::ErrorKind),
    /// Transition requested from a state that does not allow it
    ///
    /// For example enabling a panel that was never prepared.
    InvalidState {
        /// State the panel was in
        state: PanelState,
        /// Transition that was refused
        transition: Transition,
    },
    /// Lifecycle called re-entrantly while another transition holds the panel
    Busy,
    /// Page switch requested on a controller without register pages
    PagingUnsupported {
        /// Page that was requested
        page: u8,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dsi(e) => write!(f, "DSI error: {e:?}"),
            Self::Reset(kind) => write!(f, "Reset GPIO error: {kind:?}"),
            Self::Backlight(kind) => write!(f, "Backlight error: {kind:?}"),
            Self::InvalidState { state, transition } => {
                write!(f, "Cannot {transition} a panel that is {state}")
            }
            Self::Busy => write!(f, "Panel is busy with another transition"),
            Self::PagingUnsupported { page } => {
                write!(f, "Controller has no register pages (requested page {page})")
            }
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuilderError {
    /// No panel descriptor was given
    ///
    /// [`Builder::descriptor()`](crate::config::Builder::descriptor) must be called before building.
    MissingDescriptor,
    /// No built-in descriptor matches the compatible string
    UnknownCompatible,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDescriptor => write!(f, "Panel descriptor must be specified"),
            Self::UnknownCompatible => write!(f, "No panel matches the compatible string"),
        }
    }
}

impl core::error::Error for BuilderError {}
