//! Recording test doubles shared by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::config::DsiSettings;
use crate::interface::DsiInterface;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Write(Vec<u8>),
    Delay(u32),
    /// Physical reset line level (true = high)
    Reset(bool),
    Backlight(u16),
    Attach(DsiSettings),
    Detach,
}

/// Shared, ordered log of everything the doubles observed
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Sum of all recorded delays in milliseconds
    pub fn total_delay_ms(&self) -> u32 {
        self.0
            .borrow()
            .iter()
            .map(|event| match event {
                Event::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write(buf) => Some(buf.clone()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockError {
    pub index: usize,
}

pub struct MockDsi {
    recorder: Recorder,
    attempts: usize,
    fail_at: Option<usize>,
}

impl MockDsi {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            attempts: 0,
            fail_at: None,
        }
    }

    /// Fail the write with this zero-based index
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl DsiInterface for MockDsi {
    type Error = MockError;

    fn write_buffer(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(index) {
            return Err(MockError { index });
        }
        self.recorder.push(Event::Write(buf.to_vec()));
        Ok(())
    }

    fn attach(&mut self, settings: &DsiSettings) -> Result<(), Self::Error> {
        self.recorder.push(Event::Attach(*settings));
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::Detach);
        Ok(())
    }
}

pub struct MockDelay {
    recorder: Recorder,
}

impl MockDelay {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.recorder.push(Event::Delay(ms));
    }
}

pub struct MockPin {
    recorder: Recorder,
}

impl MockPin {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::Reset(true));
        Ok(())
    }
}

/// Reset pin whose every access fails
pub struct BrokenPin;

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl digital::ErrorType for BrokenPin {
    type Error = PinFault;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

pub struct MockBacklight {
    recorder: Recorder,
    fail: bool,
}

impl MockBacklight {
    pub const MAX: u16 = 1000;

    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            fail: false,
        }
    }

    pub fn failing(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            fail: true,
        }
    }
}

#[derive(Debug)]
pub struct PwmFault;

impl pwm::Error for PwmFault {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl pwm::ErrorType for MockBacklight {
    type Error = PwmFault;
}

impl SetDutyCycle for MockBacklight {
    fn max_duty_cycle(&self) -> u16 {
        Self::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(PwmFault);
        }
        self.recorder.push(Event::Backlight(duty));
        Ok(())
    }
}
