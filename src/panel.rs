//! Lifecycle state machine
//!
//! A [`Panel`] owns the DSI channel, the optional reset and backlight lines
//! and the lifecycle state, all behind one blocking mutex. Every built-in
//! model goes through the same four transitions; what differs between
//! models lives in their [`PanelDescriptor`](crate::PanelDescriptor).
//!
//! ```text
//!             prepare            enable
//! Unprepared ---------> Prepared -------> Enabled
//!            <---------          <-------
//!             unprepare          disable
//! ```
//!
//! The mutex is held for the whole transition, delays included. With
//! `CriticalSectionRawMutex` that means interrupts stay masked for hundreds
//! of milliseconds on bare-metal targets; prefer `NoopRawMutex` or
//! `ThreadModeRawMutex` there.

use core::cell::RefCell;
use core::fmt;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin, PinState};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{debug, error, info, warn};

use crate::config::{Config, PanelDescriptor};
use crate::error::Error;
use crate::interface::DsiInterface;
use crate::mode::{BUS_FLAGS, BUS_FORMATS, Connector, DisplayInfo};
use crate::sequence;

type PanelResult<E> = core::result::Result<(), Error<E>>;

/// Lifecycle state of a panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Powered down, reset asserted
    #[default]
    Unprepared,
    /// Out of reset, not initialized or initialized but blanked
    Prepared,
    /// Initialized and displaying
    Enabled,
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unprepared => "unprepared",
            Self::Prepared => "prepared",
            Self::Enabled => "enabled",
        })
    }
}

/// Lifecycle transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `Unprepared -> Prepared`
    Prepare,
    /// `Prepared -> Enabled`
    Enable,
    /// `Enabled -> Prepared`
    Disable,
    /// `Prepared -> Unprepared`
    Unprepare,
}

impl Transition {
    /// Whether the transition has work to do from `state`
    ///
    /// `Ok(false)` means the target state already holds. Transitions that
    /// would skip a state are refused.
    fn applies_from<E>(self, state: PanelState) -> Result<bool, Error<E>> {
        match (self, state) {
            (Self::Prepare, PanelState::Unprepared)
            | (Self::Enable, PanelState::Prepared)
            | (Self::Disable, PanelState::Enabled)
            | (Self::Unprepare, PanelState::Prepared) => Ok(true),
            (Self::Enable, PanelState::Unprepared) | (Self::Unprepare, PanelState::Enabled) => {
                Err(Error::InvalidState {
                    state,
                    transition: self,
                })
            }
            _ => Ok(false),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prepare => "prepare",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Unprepare => "unprepare",
        })
    }
}

/// Hardware handles and state guarded by the panel lock
struct Inner<DSI, RST, BL> {
    dsi: DSI,
    reset: Option<RST>,
    backlight: Option<BL>,
    state: PanelState,
}

impl<DSI, RST, BL> Inner<DSI, RST, BL>
where
    DSI: DsiInterface,
    RST: OutputPin,
    BL: SetDutyCycle,
{
    /// Drive the reset line to a logical level; no-op without a reset GPIO
    fn drive_reset(&mut self, asserted: bool, active_low: bool) -> PanelResult<DSI::Error> {
        let Some(pin) = self.reset.as_mut() else {
            return Ok(());
        };
        pin.set_state(PinState::from(asserted != active_low))
            .map_err(|e| Error::Reset(e.kind()))
    }

    fn backlight_on(&mut self) {
        if let Some(bl) = self.backlight.as_mut() {
            if let Err(e) = bl.set_duty_cycle_fully_on() {
                warn!("failed to enable backlight: {:?}", e.kind());
            }
        }
    }

    fn backlight_off(&mut self) {
        if let Some(bl) = self.backlight.as_mut() {
            if let Err(e) = bl.set_duty_cycle_fully_off() {
                warn!("failed to disable backlight: {:?}", e.kind());
            }
        }
    }
}

/// A probed MIPI-DSI panel
///
/// # Type Parameters
///
/// * `M` - Raw mutex serializing the lifecycle transitions
/// * `DSI` - DSI channel implementing [`DsiInterface`]
/// * `RST` - Reset line implementing [`OutputPin`]; use [`NoPin`](crate::NoPin) when absent
/// * `BL` - Backlight implementing [`SetDutyCycle`]; use [`NoPin`](crate::NoPin) when absent
///
/// All transitions take `&self`, so a panel can be shared between threads
/// when `M` allows it. A transition called while another one holds the
/// panel on the same thread fails with [`Error::Busy`].
pub struct Panel<M: RawMutex, DSI, RST, BL> {
    config: Config,
    inner: Mutex<M, RefCell<Inner<DSI, RST, BL>>>,
}

impl<M, DSI, RST, BL> Panel<M, DSI, RST, BL>
where
    M: RawMutex,
    DSI: DsiInterface,
    RST: OutputPin,
    BL: SetDutyCycle,
{
    /// Take ownership of the hardware and attach to the DSI host
    ///
    /// The reset line, if any, is left asserted. Models that need it are
    /// first released for their probe pulse.
    pub fn probe<D: DelayNs>(
        dsi: DSI,
        reset: Option<RST>,
        backlight: Option<BL>,
        config: Config,
        delay: &mut D,
    ) -> Result<Self, Error<DSI::Error>> {
        let desc = config.descriptor;
        let mut inner = Inner {
            dsi,
            reset,
            backlight,
            state: PanelState::Unprepared,
        };

        if inner.reset.is_some() {
            if let Some(ms) = desc.timing.probe_release_ms {
                inner.drive_reset(false, config.reset_active_low)?;
                delay.delay_ms(ms);
            }
            inner.drive_reset(true, config.reset_active_low)?;
            debug!("reset asserted");
        }

        inner
            .dsi
            .attach(&desc.dsi_settings())
            .map_err(Error::Dsi)?;
        info!(
            "probed {} ({} lanes, {} bpp)",
            desc.name,
            desc.lanes,
            desc.format.bits_per_pixel()
        );

        Ok(Self {
            config,
            inner: Mutex::new(RefCell::new(inner)),
        })
    }

    /// Detach from the DSI host and hand the hardware back
    ///
    /// A failing detach is logged; the parts are returned regardless.
    pub fn remove(self) -> (DSI, Option<RST>, Option<BL>) {
        let mut inner = self.inner.into_inner().into_inner();
        if let Err(e) = inner.dsi.detach() {
            warn!("failed to detach {}: {:?}", self.config.descriptor.name, e);
        }
        (inner.dsi, inner.reset, inner.backlight)
    }

    /// Panel configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Panel descriptor
    pub fn descriptor(&self) -> &'static PanelDescriptor {
        self.config.descriptor
    }

    /// Current lifecycle state
    pub fn state(&self) -> Result<PanelState, Error<DSI::Error>> {
        self.inner.lock(|cell| {
            cell.try_borrow()
                .map(|inner| inner.state)
                .map_err(|_| Error::Busy)
        })
    }

    /// Power up and take the controller out of reset
    ///
    /// No data is sent.
    pub fn prepare<D: DelayNs>(&self, delay: &mut D) -> PanelResult<DSI::Error> {
        self.transition(Transition::Prepare, |inner| {
            let timing = self.config.descriptor.timing;
            let active_low = self.config.reset_active_low;

            delay.delay_ms(timing.prepare_delay_ms);
            if inner.reset.is_some() {
                if let Some(ms) = timing.prepare_reset_ms {
                    inner.drive_reset(true, active_low)?;
                    delay.delay_ms(ms);
                }
                inner.drive_reset(false, active_low)?;
                delay.delay_ms(timing.reset_settle_ms);
            }

            inner.state = PanelState::Prepared;
            Ok(())
        })
    }

    /// Run the init sequence and turn the display on
    ///
    /// On a transport error the panel stays [`PanelState::Prepared`] with
    /// whatever part of the sequence already went out.
    pub fn enable<D: DelayNs>(&self, delay: &mut D) -> PanelResult<DSI::Error> {
        self.transition(Transition::Enable, |inner| {
            let desc = self.config.descriptor;

            desc.init.play(&mut inner.dsi, delay)?;
            delay.delay_ms(self.config.sleep_delay_ms());
            if let Err(e) = sequence::run(&mut inner.dsi, delay, desc.post_init) {
                error!("{}: display on failed", desc.name);
                return Err(e);
            }
            inner.backlight_on();

            inner.state = PanelState::Enabled;
            Ok(())
        })
    }

    /// Turn the backlight and the display off
    pub fn disable<D: DelayNs>(&self, _delay: &mut D) -> PanelResult<DSI::Error> {
        self.transition(Transition::Disable, |inner| {
            inner.backlight_off();
            inner.dsi.set_display_off().map_err(Error::Dsi)?;

            inner.state = PanelState::Prepared;
            Ok(())
        })
    }

    /// Put the controller to sleep and hold it in reset
    ///
    /// The reset line and the blanking wait are handled even when "enter
    /// sleep" fails; that error is returned afterwards and the panel is
    /// reported [`PanelState::Unprepared`].
    pub fn unprepare<D: DelayNs>(&self, delay: &mut D) -> PanelResult<DSI::Error> {
        self.transition(Transition::Unprepare, |inner| {
            let timing = self.config.descriptor.timing;
            let active_low = self.config.reset_active_low;

            let sleep = inner.dsi.enter_sleep_mode();
            if let Err(e) = &sleep {
                warn!("enter sleep failed, powering down anyway: {:?}", e);
            }

            if inner.reset.is_some() {
                inner.drive_reset(true, active_low)?;
                if let Some(ms) = timing.unprepare_reset_ms {
                    delay.delay_ms(ms);
                    inner.drive_reset(false, active_low)?;
                }
            }
            // blanking after a reset in sleep-out mode lasts up to 120 ms
            delay.delay_ms(self.config.sleep_delay_ms());

            inner.state = PanelState::Unprepared;
            sleep.map_err(Error::Dsi)
        })
    }

    /// Set backlight brightness in percent, clamped to 100
    ///
    /// No-op without a backlight.
    pub fn set_brightness(&self, percent: u8) -> PanelResult<DSI::Error> {
        self.inner.lock(|cell| {
            let mut inner = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            match inner.backlight.as_mut() {
                Some(bl) => bl
                    .set_duty_cycle_percent(percent.min(100))
                    .map_err(|e| Error::Backlight(e.kind())),
                None => Ok(()),
            }
        })
    }

    /// Report the native mode and bus properties to `connector`
    ///
    /// Returns the number of modes added. Nothing but the mode is reported
    /// if the connector rejects it.
    pub fn get_modes<C: Connector>(&self, mut connector: C) -> Result<usize, C::Error> {
        let desc = self.config.descriptor;
        let mode = desc.mode.preferred();

        if let Err(e) = connector.add_probed_mode(mode) {
            error!("failed to add mode {}@{}", mode, mode.vrefresh());
            return Err(e);
        }
        connector.set_display_info(DisplayInfo {
            width_mm: desc.mode.width_mm,
            height_mm: desc.mode.height_mm,
            bus_flags: BUS_FLAGS,
            bus_formats: &BUS_FORMATS,
        });
        Ok(1)
    }

    fn transition<F>(&self, transition: Transition, f: F) -> PanelResult<DSI::Error>
    where
        F: FnOnce(&mut Inner<DSI, RST, BL>) -> PanelResult<DSI::Error>,
    {
        self.inner.lock(|cell| {
            let mut inner = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            if !transition.applies_from::<DSI::Error>(inner.state)? {
                warn!(
                    "{}: {} skipped, already {}",
                    self.config.descriptor.name, transition, inner.state
                );
                return Ok(());
            }
            info!("{}: {}", self.config.descriptor.name, transition);
            f(&mut *inner)
        })
    }
}
