//! Instruction tables and the init-sequence player
//!
//! Panel bring-up is a fixed list of register writes. Controllers of the
//! ILI9881 family spread their registers over several pages, so the list
//! also carries page switches; the player turns each entry into one DSI
//! write and stops at the first transport error.

use embedded_hal::delay::DelayNs;
use log::{debug, error, trace};

use crate::error::Error;
use crate::interface::{DsiInterface, TearMode};

/// One step of a bring-up table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Select the register page targeted by following [`Instruction::Command`]s
    SwitchPage(u8),
    /// Write a single-byte register: `[register, value]`
    Command(u8, u8),
    /// Write a raw DCS buffer (opcode followed by its parameters)
    Write(&'static [u8]),
    /// Blocking delay in milliseconds
    Delay(u32),
}

/// Bring-up table of one panel model
///
/// `page_select` is the vendor prefix of the page switch command, or `None`
/// for controllers without register pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitSequence {
    /// Page switch prefix, followed on the wire by the page number
    pub page_select: Option<[u8; 3]>,
    /// Instructions, replayed in order
    pub table: &'static [Instruction],
}

impl InitSequence {
    /// Replay the table over `dsi`
    ///
    /// Every instruction becomes exactly one write (or one delay), in table
    /// order. The first failing write aborts the replay and its error is
    /// returned; nothing after it is sent and nothing already sent is undone.
    ///
    /// For paged controllers the player then selects page 0 again, enables
    /// the tearing-effect output and takes the panel out of sleep. Standard
    /// DCS commands sent afterwards rely on page 0 being selected.
    pub fn play<DSI, D>(&self, dsi: &mut DSI, delay: &mut D) -> Result<(), Error<DSI::Error>>
    where
        DSI: DsiInterface,
        D: DelayNs,
    {
        for (index, instruction) in self.table.iter().enumerate() {
            if let Err(e) = execute(dsi, delay, self.page_select, instruction) {
                error!("init sequence aborted at instruction {}: {:?}", index, instruction);
                return Err(e);
            }
        }

        if let Some(prefix) = self.page_select {
            switch_page(dsi, prefix, 0).map_err(Error::Dsi)?;
            dsi.set_tear_on(TearMode::VBlank).map_err(Error::Dsi)?;
            dsi.exit_sleep_mode().map_err(Error::Dsi)?;
        }

        debug!("init sequence complete ({} instructions)", self.table.len());
        Ok(())
    }

    /// Number of register pages touched by the table, page 0 excluded
    pub fn pages_used(&self) -> usize {
        let mut seen = [false; 256];
        let mut count = 0;
        for instruction in self.table {
            if let Instruction::SwitchPage(page) = *instruction {
                if page != 0 && !seen[page as usize] {
                    seen[page as usize] = true;
                    count += 1;
                }
            }
        }
        count
    }
}

/// Replay instructions outside of any page context
///
/// Used for the short tails run after the main table, which only carry
/// standard DCS writes and delays.
pub(crate) fn run<DSI, D>(
    dsi: &mut DSI,
    delay: &mut D,
    table: &[Instruction],
) -> Result<(), Error<DSI::Error>>
where
    DSI: DsiInterface,
    D: DelayNs,
{
    table
        .iter()
        .try_for_each(|instruction| execute(dsi, delay, None, instruction))
}

fn execute<DSI, D>(
    dsi: &mut DSI,
    delay: &mut D,
    page_select: Option<[u8; 3]>,
    instruction: &Instruction,
) -> Result<(), Error<DSI::Error>>
where
    DSI: DsiInterface,
    D: DelayNs,
{
    match *instruction {
        Instruction::SwitchPage(page) => {
            let prefix = page_select.ok_or(Error::PagingUnsupported { page })?;
            switch_page(dsi, prefix, page).map_err(Error::Dsi)
        }
        Instruction::Command(register, value) => {
            trace!("write {:#04x} = {:#04x}", register, value);
            dsi.write_buffer(&[register, value]).map_err(Error::Dsi)
        }
        Instruction::Write(buf) => {
            trace!("write {:02x?}", buf);
            dsi.write_buffer(buf).map_err(Error::Dsi)
        }
        Instruction::Delay(ms) => {
            delay.delay_ms(ms);
            Ok(())
        }
    }
}

/// Select the register page for subsequent single-byte writes
fn switch_page<DSI: DsiInterface>(
    dsi: &mut DSI,
    prefix: [u8; 3],
    page: u8,
) -> Result<(), DSI::Error> {
    debug!("switch to page {}", page);
    dsi.write_buffer(&[prefix[0], prefix[1], prefix[2], page])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{EXIT_SLEEP_MODE, ILI9881_PAGE_SELECT, SET_TEAR_ON};
    use crate::mock::{Event, MockDelay, MockDsi, Recorder};
    use alloc::vec;

    const PAGED: InitSequence = InitSequence {
        page_select: Some(ILI9881_PAGE_SELECT),
        table: &[
            Instruction::SwitchPage(3),
            Instruction::Command(0x01, 0x00),
            Instruction::Command(0x03, 0x73),
            Instruction::SwitchPage(4),
            Instruction::Command(0x38, 0x01),
            Instruction::SwitchPage(0),
        ],
    };

    const FLAT: InitSequence = InitSequence {
        page_select: None,
        table: &[
            Instruction::Delay(5),
            Instruction::Write(&[EXIT_SLEEP_MODE]),
            Instruction::Command(0x3A, 0x66),
            Instruction::Write(&[0xB2, 0x0C, 0x0C, 0x00, 0x33, 0x33]),
        ],
    };

    #[test]
    fn test_paged_table_issues_exact_bytes_in_order() {
        let recorder = Recorder::new();
        let mut dsi = MockDsi::new(&recorder);
        let mut delay = MockDelay::new(&recorder);

        PAGED.play(&mut dsi, &mut delay).unwrap();

        assert_eq!(
            recorder.writes(),
            vec![
                vec![0xFF, 0x98, 0x81, 3],
                vec![0x01, 0x00],
                vec![0x03, 0x73],
                vec![0xFF, 0x98, 0x81, 4],
                vec![0x38, 0x01],
                vec![0xFF, 0x98, 0x81, 0],
                // trailing reset to page 0, tear on, sleep out
                vec![0xFF, 0x98, 0x81, 0],
                vec![SET_TEAR_ON, 0x00],
                vec![EXIT_SLEEP_MODE],
            ]
        );
    }

    #[test]
    fn test_last_page_selected_is_zero() {
        const ENDS_ON_PAGE_ONE: InitSequence = InitSequence {
            page_select: Some(ILI9881_PAGE_SELECT),
            table: &[Instruction::SwitchPage(1), Instruction::Command(0x22, 0x0A)],
        };
        let recorder = Recorder::new();
        let mut dsi = MockDsi::new(&recorder);
        let mut delay = MockDelay::new(&recorder);

        ENDS_ON_PAGE_ONE.play(&mut dsi, &mut delay).unwrap();

        let last_page = recorder
            .writes()
            .into_iter()
            .filter(|buf| buf.len() == 4 && buf[..3] == ILI9881_PAGE_SELECT)
            .map(|buf| buf[3])
            .last();
        assert_eq!(last_page, Some(0));
    }

    #[test]
    fn test_flat_table_has_no_tail() {
        let recorder = Recorder::new();
        let mut dsi = MockDsi::new(&recorder);
        let mut delay = MockDelay::new(&recorder);

        FLAT.play(&mut dsi, &mut delay).unwrap();

        assert_eq!(
            recorder.events(),
            vec![
                Event::Delay(5),
                Event::Write(vec![EXIT_SLEEP_MODE]),
                Event::Write(vec![0x3A, 0x66]),
                Event::Write(vec![0xB2, 0x0C, 0x0C, 0x00, 0x33, 0x33]),
            ]
        );
    }

    #[test]
    fn test_failure_stops_replay_and_returns_transport_error() {
        for fail_at in 0..PAGED.table.len() {
            let recorder = Recorder::new();
            let mut dsi = MockDsi::new(&recorder).fail_at(fail_at);
            let mut delay = MockDelay::new(&recorder);

            let result = PAGED.play(&mut dsi, &mut delay);

            assert!(matches!(result, Err(Error::Dsi(e)) if e.index == fail_at));
            // the failed write is attempted, nothing after it
            assert_eq!(dsi.attempts(), fail_at + 1);
            assert_eq!(recorder.writes().len(), fail_at);
        }
    }

    #[test]
    fn test_failure_in_tail_is_reported() {
        let recorder = Recorder::new();
        // table has 6 writes; index 7 is the tear-on command
        let mut dsi = MockDsi::new(&recorder).fail_at(7);
        let mut delay = MockDelay::new(&recorder);

        let result = PAGED.play(&mut dsi, &mut delay);

        assert!(matches!(result, Err(Error::Dsi(e)) if e.index == 7));
        assert!(!recorder.writes().contains(&vec![EXIT_SLEEP_MODE]));
    }

    #[test]
    fn test_switch_page_without_prefix_is_rejected() {
        const BROKEN: InitSequence = InitSequence {
            page_select: None,
            table: &[Instruction::Command(0x36, 0x00), Instruction::SwitchPage(1)],
        };
        let recorder = Recorder::new();
        let mut dsi = MockDsi::new(&recorder);
        let mut delay = MockDelay::new(&recorder);

        let result = BROKEN.play(&mut dsi, &mut delay);

        assert!(matches!(result, Err(Error::PagingUnsupported { page: 1 })));
        assert_eq!(recorder.writes(), vec![vec![0x36, 0x00]]);
    }

    #[test]
    fn test_pages_used() {
        assert_eq!(PAGED.pages_used(), 2);
        assert_eq!(FLAT.pages_used(), 0);
    }
}
