//! DSI channel abstraction
//!
//! This module provides the [`DsiInterface`] trait through which the panel
//! drivers talk to their controller, plus [`SpiDcsInterface`], a transport
//! for bench bring-up over a plain SPI bus.
//!
//! ## Host Requirements
//!
//! The drivers need:
//! - A DSI command channel accepting opaque byte buffers
//! - Optionally a reset GPIO (output, active low by default)
//! - Optionally a PWM backlight
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use dsi_panel::{DsiInterface, TearMode};
//!
//! struct Host;
//!
//! impl DsiInterface for Host {
//!     type Error = Infallible;
//!
//!     fn write_buffer(&mut self, _buf: &[u8]) -> Result<(), Self::Error> {
//!         // hand the buffer to the DSI host controller
//!         Ok(())
//!     }
//! }
//!
//! let mut dsi = Host;
//! let _ = dsi.exit_sleep_mode();
//! let _ = dsi.set_tear_on(TearMode::VBlank);
//! let _ = dsi.set_display_on();
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_hal::spi::SpiDevice;

use crate::command::{
    ENTER_SLEEP_MODE, EXIT_SLEEP_MODE, SET_DISPLAY_OFF, SET_DISPLAY_ON, SET_TEAR_ON,
};
use crate::config::DsiSettings;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Tearing effect output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum TearMode {
    /// Signal V-blank only
    #[default]
    VBlank = 0x00,
    /// Signal both V-blank and H-blank
    VHBlank = 0x01,
}

/// Trait for the command channel to a DSI panel controller
///
/// The host's DSI controller owns packet encoding, retries and wire-level
/// error signaling; implementations only move buffers and report failures.
///
/// ## Implementing
///
/// Only [`write_buffer`](Self::write_buffer) is required. Hosts that need to
/// program lane count and video mode before streaming should override
/// [`attach`](Self::attach) and [`detach`](Self::detach).
pub trait DsiInterface {
    /// Error type for transport failures
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one buffer as a single DCS transfer
    ///
    /// The first byte is the command opcode, the rest are its parameters.
    /// Buffers may be of any length.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    fn write_buffer(&mut self, buf: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Attach the peripheral to the host with its link settings
    ///
    /// Called once at the end of probe.
    fn attach(&mut self, settings: &DsiSettings) -> InterfaceResult<(), Self::Error> {
        let _ = settings;
        Ok(())
    }

    /// Detach the peripheral from the host
    fn detach(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    /// Take the panel out of sleep
    fn exit_sleep_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(&[EXIT_SLEEP_MODE])
    }

    /// Put the panel to sleep
    fn enter_sleep_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(&[ENTER_SLEEP_MODE])
    }

    /// Turn the display output on
    fn set_display_on(&mut self) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(&[SET_DISPLAY_ON])
    }

    /// Blank the display output
    fn set_display_off(&mut self) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(&[SET_DISPLAY_OFF])
    }

    /// Enable the tearing effect output
    fn set_tear_on(&mut self, mode: TearMode) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(&[SET_TEAR_ON, mode as u8])
    }
}

impl<T: DsiInterface + ?Sized> DsiInterface for &mut T {
    type Error = T::Error;

    fn write_buffer(&mut self, buf: &[u8]) -> InterfaceResult<(), Self::Error> {
        T::write_buffer(self, buf)
    }

    fn attach(&mut self, settings: &DsiSettings) -> InterfaceResult<(), Self::Error> {
        T::attach(self, settings)
    }

    fn detach(&mut self) -> InterfaceResult<(), Self::Error> {
        T::detach(self)
    }
}

/// Errors that can occur on the SPI transport
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// DCS over a 4-wire SPI bus
///
/// Most DSI panel controllers also expose their command set on a serial
/// DBI port. Writing through it is handy on a bench without a DSI host: the
/// opcode goes out with D/C low, its parameters with D/C high. Video still
/// needs a DSI link.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use dsi_panel::{DsiInterface, SpiDcsInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let mut interface = SpiDcsInterface::new(MockSpi, MockPin);
/// let _ = interface.write_buffer(&[0x3A, 0x66]);
/// ```
pub struct SpiDcsInterface<SPI, DC> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
}

impl<SPI, DC> SpiDcsInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SPI transport
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Release the SPI device and D/C pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DsiInterface for SpiDcsInterface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn write_buffer(&mut self, buf: &[u8]) -> InterfaceResult<(), Self::Error> {
        let Some((command, params)) = buf.split_first() else {
            return Ok(());
        };
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi
            .write(core::slice::from_ref(command))
            .map_err(InterfaceError::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.spi.write(params).map_err(InterfaceError::Spi)?;
        }
        Ok(())
    }
}

/// Placeholder for an absent reset GPIO or backlight
///
/// Use it as the type parameter when passing `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl digital::ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl pwm::ErrorType for NoPin {
    type Error = Infallible;
}

impl SetDutyCycle for NoPin {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}
