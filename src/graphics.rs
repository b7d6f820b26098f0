//! Geometry support via embedded-graphics
//!
//! Implements [`OriginDimensions`] for [`DisplayMode`], [`PanelDescriptor`]
//! and [`Panel`], so the active area of a panel can size framebuffers and
//! drawing targets on the host side.
//!
//! ## Example
//!
//! ```rust
//! use dsi_panel::models;
//! use embedded_graphics_core::geometry::{OriginDimensions, Size};
//!
//! assert_eq!(models::ETML050015DHA.size(), Size::new(720, 1280));
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::PanelDescriptor;
use crate::interface::DsiInterface;
use crate::mode::DisplayMode;
use crate::panel::Panel;

impl OriginDimensions for DisplayMode {
    fn size(&self) -> Size {
        Size::new(u32::from(self.hdisplay), u32::from(self.vdisplay))
    }
}

impl OriginDimensions for PanelDescriptor {
    fn size(&self) -> Size {
        self.mode.size()
    }
}

impl<M, DSI, RST, BL> OriginDimensions for Panel<M, DSI, RST, BL>
where
    M: RawMutex,
    DSI: DsiInterface,
    RST: OutputPin,
    BL: SetDutyCycle,
{
    fn size(&self) -> Size {
        self.descriptor().size()
    }
}
