use crate::command::{ILI9881_PAGE_SELECT, SET_DISPLAY_ON};
use crate::config::{DsiModeFlags, PanelDescriptor, PixelFormat, PowerTiming};
use crate::mode::{DisplayMode, ModeType};
use crate::sequence::{InitSequence, Instruction};

/// 720x1280 mode shared by both modules
const MODE: DisplayMode = DisplayMode {
    clock: 60000,
    hdisplay: 720,
    hsync_start: 720 + 100,
    hsync_end: 720 + 100 + 33,
    htotal: 720 + 100 + 33 + 100,
    vdisplay: 1280,
    vsync_start: 1280 + 20,
    vsync_end: 1280 + 20 + 2,
    vtotal: 1280 + 20 + 2 + 30,
    width_mm: 180,
    height_mm: 320,
    mode_type: ModeType::DRIVER.union(ModeType::PREFERRED),
};

const FLAGS: DsiModeFlags = DsiModeFlags::VIDEO_HSE
    .union(DsiModeFlags::VIDEO)
    .union(DsiModeFlags::CLOCK_NON_CONTINUOUS)
    .union(DsiModeFlags::VIDEO_SYNC_PULSE)
    .union(DsiModeFlags::LPM);

const POST_INIT: &[Instruction] = &[Instruction::Delay(220), Instruction::Write(&[SET_DISPLAY_ON])];

const TIMING: PowerTiming = PowerTiming {
    probe_release_ms: Some(1000),
    prepare_delay_ms: 5,
    prepare_reset_ms: Some(20),
    reset_settle_ms: 220,
    unprepare_reset_ms: None,
};

#[rustfmt::skip]
const YB_TG7201280S03A_INIT: &[Instruction] = &[
    // GIP timing
    Instruction::SwitchPage(3),
    Instruction::Command(0x01, 0x00),
    Instruction::Command(0x02, 0x00),
    Instruction::Command(0x03, 0x73),
    Instruction::Command(0x04, 0x00),
    Instruction::Command(0x05, 0x00),
    Instruction::Command(0x06, 0x0A),
    Instruction::Command(0x07, 0x00),
    Instruction::Command(0x08, 0x00),
    Instruction::Command(0x09, 0x01),
    Instruction::Command(0x0A, 0x00),
    Instruction::Command(0x0B, 0x00),
    Instruction::Command(0x0C, 0x01),
    Instruction::Command(0x0D, 0x00),
    Instruction::Command(0x0E, 0x00),
    Instruction::Command(0x0F, 0x1D),
    Instruction::Command(0x10, 0x1D),
    Instruction::Command(0x11, 0x00),
    Instruction::Command(0x12, 0x00),
    Instruction::Command(0x13, 0x00),
    Instruction::Command(0x14, 0x00),
    Instruction::Command(0x15, 0x00),
    Instruction::Command(0x16, 0x00),
    Instruction::Command(0x17, 0x00),
    Instruction::Command(0x18, 0x00),
    Instruction::Command(0x19, 0x00),
    Instruction::Command(0x1A, 0x00),
    Instruction::Command(0x1B, 0x00),
    Instruction::Command(0x1C, 0x00),
    Instruction::Command(0x1D, 0x00),
    Instruction::Command(0x1E, 0x40),
    Instruction::Command(0x1F, 0x80),
    Instruction::Command(0x20, 0x06),
    Instruction::Command(0x21, 0x02),
    Instruction::Command(0x22, 0x00),
    Instruction::Command(0x23, 0x00),
    Instruction::Command(0x24, 0x00),
    Instruction::Command(0x25, 0x00),
    Instruction::Command(0x26, 0x00),
    Instruction::Command(0x27, 0x00),
    Instruction::Command(0x28, 0x33),
    Instruction::Command(0x29, 0x03),
    Instruction::Command(0x2A, 0x00),
    Instruction::Command(0x2B, 0x00),
    Instruction::Command(0x2C, 0x00),
    Instruction::Command(0x2D, 0x00),
    Instruction::Command(0x2E, 0x00),
    Instruction::Command(0x2F, 0x00),
    Instruction::Command(0x30, 0x00),
    Instruction::Command(0x31, 0x00),
    Instruction::Command(0x32, 0x00),
    Instruction::Command(0x33, 0x00),
    Instruction::Command(0x34, 0x04),
    Instruction::Command(0x35, 0x00),
    Instruction::Command(0x36, 0x00),
    Instruction::Command(0x37, 0x00),
    Instruction::Command(0x38, 0x3C),
    Instruction::Command(0x39, 0x00),
    Instruction::Command(0x3A, 0x40),
    Instruction::Command(0x3B, 0x40),
    Instruction::Command(0x3C, 0x00),
    Instruction::Command(0x3D, 0x00),
    Instruction::Command(0x3E, 0x00),
    Instruction::Command(0x3F, 0x00),
    Instruction::Command(0x40, 0x00),
    Instruction::Command(0x41, 0x00),
    Instruction::Command(0x42, 0x00),
    Instruction::Command(0x43, 0x00),
    Instruction::Command(0x44, 0x00),
    Instruction::Command(0x50, 0x01),
    Instruction::Command(0x51, 0x23),
    Instruction::Command(0x52, 0x45),
    Instruction::Command(0x53, 0x67),
    Instruction::Command(0x54, 0x89),
    Instruction::Command(0x55, 0xAB),
    Instruction::Command(0x56, 0x01),
    Instruction::Command(0x57, 0x23),
    Instruction::Command(0x58, 0x45),
    Instruction::Command(0x59, 0x67),
    Instruction::Command(0x5A, 0x89),
    Instruction::Command(0x5B, 0xAB),
    Instruction::Command(0x5C, 0xCD),
    Instruction::Command(0x5D, 0xEF),
    Instruction::Command(0x5E, 0x11),
    Instruction::Command(0x5F, 0x01),
    Instruction::Command(0x60, 0x00),
    Instruction::Command(0x61, 0x15),
    Instruction::Command(0x62, 0x14),
    Instruction::Command(0x63, 0x0E),
    Instruction::Command(0x64, 0x0F),
    Instruction::Command(0x65, 0x0C),
    Instruction::Command(0x66, 0x0D),
    Instruction::Command(0x67, 0x06),
    Instruction::Command(0x68, 0x02),
    Instruction::Command(0x69, 0x07),
    Instruction::Command(0x6A, 0x02),
    Instruction::Command(0x6B, 0x02),
    Instruction::Command(0x6C, 0x02),
    Instruction::Command(0x6D, 0x02),
    Instruction::Command(0x6E, 0x02),
    Instruction::Command(0x6F, 0x02),
    Instruction::Command(0x70, 0x02),
    Instruction::Command(0x71, 0x02),
    Instruction::Command(0x72, 0x02),
    Instruction::Command(0x73, 0x02),
    Instruction::Command(0x74, 0x02),
    Instruction::Command(0x75, 0x01),
    Instruction::Command(0x76, 0x00),
    Instruction::Command(0x77, 0x14),
    Instruction::Command(0x78, 0x15),
    Instruction::Command(0x79, 0x0E),
    Instruction::Command(0x7A, 0x0F),
    Instruction::Command(0x7B, 0x0C),
    Instruction::Command(0x7C, 0x0D),
    Instruction::Command(0x7D, 0x06),
    Instruction::Command(0x7E, 0x02),
    Instruction::Command(0x7F, 0x07),
    Instruction::Command(0x80, 0x02),
    Instruction::Command(0x81, 0x02),
    Instruction::Command(0x82, 0x02),
    Instruction::Command(0x83, 0x02),
    Instruction::Command(0x84, 0x02),
    Instruction::Command(0x85, 0x02),
    Instruction::Command(0x86, 0x02),
    Instruction::Command(0x87, 0x02),
    Instruction::Command(0x88, 0x02),
    Instruction::Command(0x89, 0x02),
    Instruction::Command(0x8A, 0x02),

    // power control
    Instruction::SwitchPage(4),
    Instruction::Command(0x38, 0x01),
    Instruction::Command(0x39, 0x00),
    Instruction::Command(0x6C, 0x15),
    Instruction::Command(0x6E, 0x2B),
    Instruction::Command(0x6F, 0x33),
    Instruction::Command(0x8D, 0x18),
    Instruction::Command(0x87, 0xBA),
    Instruction::Command(0x26, 0x76),
    Instruction::Command(0xB2, 0xD1),
    Instruction::Command(0xB5, 0x06),
    Instruction::Command(0x3A, 0x24),
    Instruction::Command(0x35, 0x1F),
    Instruction::Command(0x33, 0x14),
    Instruction::Command(0x3B, 0x98),

    // panel settings and gamma
    Instruction::SwitchPage(1),
    Instruction::Command(0x22, 0x0A),
    Instruction::Command(0x31, 0x00),
    Instruction::Command(0x40, 0x33),
    Instruction::Command(0x53, 0x8B),
    Instruction::Command(0x55, 0x92),
    Instruction::Command(0x50, 0x96),
    Instruction::Command(0x51, 0x96),
    Instruction::Command(0x60, 0x22),
    Instruction::Command(0x61, 0x00),
    Instruction::Command(0x62, 0x19),
    Instruction::Command(0x63, 0x00),
    Instruction::Command(0xA0, 0x08),
    Instruction::Command(0xA1, 0x11),
    Instruction::Command(0xA2, 0x19),
    Instruction::Command(0xA3, 0x0D),
    Instruction::Command(0xA4, 0x0D),
    Instruction::Command(0xA5, 0x1E),
    Instruction::Command(0xA6, 0x14),
    Instruction::Command(0xA7, 0x17),
    Instruction::Command(0xA8, 0x4F),
    Instruction::Command(0xA9, 0x1A),
    Instruction::Command(0xAA, 0x27),
    Instruction::Command(0xAB, 0x49),
    Instruction::Command(0xAC, 0x1A),
    Instruction::Command(0xAD, 0x18),
    Instruction::Command(0xAE, 0x4C),
    Instruction::Command(0xAF, 0x22),
    Instruction::Command(0xB0, 0x27),
    Instruction::Command(0xB1, 0x4B),
    Instruction::Command(0xB2, 0x60),
    Instruction::Command(0xB3, 0x39),
    Instruction::Command(0xC0, 0x08),
    Instruction::Command(0xC1, 0x11),
    Instruction::Command(0xC2, 0x19),
    Instruction::Command(0xC3, 0x0D),
    Instruction::Command(0xC4, 0x0D),
    Instruction::Command(0xC5, 0x1E),
    Instruction::Command(0xC6, 0x14),
    Instruction::Command(0xC7, 0x17),
    Instruction::Command(0xC8, 0x4F),
    Instruction::Command(0xC9, 0x1A),
    Instruction::Command(0xCA, 0x27),
    Instruction::Command(0xCB, 0x49),
    Instruction::Command(0xCC, 0x1A),
    Instruction::Command(0xCD, 0x18),
    Instruction::Command(0xCE, 0x4C),
    Instruction::Command(0xCF, 0x33),
    Instruction::Command(0xD0, 0x27),
    Instruction::Command(0xD1, 0x4B),
    Instruction::Command(0xD2, 0x60),
    Instruction::Command(0xD3, 0x39),

    Instruction::SwitchPage(0),
];

#[rustfmt::skip]
const ETML050015DHA_INIT: &[Instruction] = &[
    // GIP timing
    Instruction::SwitchPage(3),
    Instruction::Command(0x01, 0x00),
    Instruction::Command(0x02, 0x00),
    Instruction::Command(0x03, 0x73),
    Instruction::Command(0x04, 0x00),
    Instruction::Command(0x05, 0x00),
    Instruction::Command(0x06, 0x0C),
    Instruction::Command(0x07, 0x00),
    Instruction::Command(0x08, 0x00),
    Instruction::Command(0x09, 0x01),
    Instruction::Command(0x0A, 0x01),
    Instruction::Command(0x0B, 0x01),
    Instruction::Command(0x0C, 0x01),
    Instruction::Command(0x0D, 0x01),
    Instruction::Command(0x0E, 0x01),
    Instruction::Command(0x0F, 0x00),
    Instruction::Command(0x10, 0x00),
    Instruction::Command(0x11, 0x00),
    Instruction::Command(0x12, 0x00),
    Instruction::Command(0x13, 0x00),
    Instruction::Command(0x14, 0x00),
    Instruction::Command(0x15, 0x00),
    Instruction::Command(0x16, 0x00),
    Instruction::Command(0x17, 0x00),
    Instruction::Command(0x18, 0x00),
    Instruction::Command(0x19, 0x00),
    Instruction::Command(0x1A, 0x00),
    Instruction::Command(0x1B, 0x00),
    Instruction::Command(0x1C, 0x00),
    Instruction::Command(0x1D, 0x00),
    Instruction::Command(0x1E, 0x40),
    Instruction::Command(0x1F, 0xC0),
    Instruction::Command(0x20, 0x0A),
    Instruction::Command(0x21, 0x05),
    Instruction::Command(0x22, 0x0A),
    Instruction::Command(0x23, 0x00),
    Instruction::Command(0x24, 0x8C),
    Instruction::Command(0x25, 0x8C),
    Instruction::Command(0x26, 0x00),
    Instruction::Command(0x27, 0x00),
    Instruction::Command(0x28, 0x33),
    Instruction::Command(0x29, 0x03),
    Instruction::Command(0x2A, 0x00),
    Instruction::Command(0x2B, 0x00),
    Instruction::Command(0x2C, 0x00),
    Instruction::Command(0x2D, 0x00),
    Instruction::Command(0x2E, 0x00),
    Instruction::Command(0x2F, 0x00),
    Instruction::Command(0x30, 0x00),
    Instruction::Command(0x31, 0x00),
    Instruction::Command(0x32, 0x00),
    Instruction::Command(0x33, 0x00),
    Instruction::Command(0x34, 0x00),
    Instruction::Command(0x35, 0x00),
    Instruction::Command(0x36, 0x00),
    Instruction::Command(0x37, 0x00),
    Instruction::Command(0x38, 0x00),
    Instruction::Command(0x39, 0x35),
    Instruction::Command(0x3A, 0x01),
    Instruction::Command(0x3B, 0x40),
    Instruction::Command(0x3C, 0x00),
    Instruction::Command(0x3D, 0x01),
    Instruction::Command(0x3E, 0x00),
    Instruction::Command(0x3F, 0x00),
    Instruction::Command(0x40, 0x35),
    Instruction::Command(0x41, 0xA8),
    Instruction::Command(0x42, 0x00),
    Instruction::Command(0x43, 0x40),
    Instruction::Command(0x44, 0x3F),
    Instruction::Command(0x45, 0x20),
    Instruction::Command(0x46, 0x00),
    Instruction::Command(0x50, 0x01),
    Instruction::Command(0x51, 0x23),
    Instruction::Command(0x52, 0x45),
    Instruction::Command(0x53, 0x67),
    Instruction::Command(0x54, 0x89),
    Instruction::Command(0x55, 0xAB),
    Instruction::Command(0x56, 0x01),
    Instruction::Command(0x57, 0x23),
    Instruction::Command(0x58, 0x45),
    Instruction::Command(0x59, 0x67),
    Instruction::Command(0x5A, 0x89),
    Instruction::Command(0x5B, 0xAB),
    Instruction::Command(0x5C, 0xCD),
    Instruction::Command(0x5D, 0xEF),
    Instruction::Command(0x5E, 0x11),
    Instruction::Command(0x5F, 0x0C),
    Instruction::Command(0x60, 0x0D),
    Instruction::Command(0x61, 0x0E),
    Instruction::Command(0x62, 0x0F),
    Instruction::Command(0x63, 0x06),
    Instruction::Command(0x64, 0x07),
    Instruction::Command(0x65, 0x02),
    Instruction::Command(0x66, 0x02),
    Instruction::Command(0x67, 0x02),
    Instruction::Command(0x68, 0x02),
    Instruction::Command(0x69, 0x02),
    Instruction::Command(0x6A, 0x02),
    Instruction::Command(0x6B, 0x02),
    Instruction::Command(0x6C, 0x02),
    Instruction::Command(0x6D, 0x02),
    Instruction::Command(0x6E, 0x02),
    Instruction::Command(0x6F, 0x02),
    Instruction::Command(0x70, 0x02),
    Instruction::Command(0x71, 0x02),
    Instruction::Command(0x72, 0x02),
    Instruction::Command(0x73, 0x01),
    Instruction::Command(0x74, 0x00),
    Instruction::Command(0x75, 0x0C),
    Instruction::Command(0x76, 0x0D),
    Instruction::Command(0x77, 0x0E),
    Instruction::Command(0x78, 0x0F),
    Instruction::Command(0x79, 0x06),
    Instruction::Command(0x7A, 0x07),
    Instruction::Command(0x7B, 0x02),
    Instruction::Command(0x7C, 0x02),
    Instruction::Command(0x7D, 0x02),
    Instruction::Command(0x7E, 0x02),
    Instruction::Command(0x7F, 0x02),
    Instruction::Command(0x80, 0x02),
    Instruction::Command(0x81, 0x02),
    Instruction::Command(0x82, 0x02),
    Instruction::Command(0x83, 0x02),
    Instruction::Command(0x84, 0x02),
    Instruction::Command(0x85, 0x02),
    Instruction::Command(0x86, 0x02),
    Instruction::Command(0x87, 0x02),
    Instruction::Command(0x88, 0x02),
    Instruction::Command(0x89, 0x01),
    Instruction::Command(0x8A, 0x00),

    // power control
    Instruction::SwitchPage(4),
    Instruction::Command(0x68, 0xDB),
    Instruction::Command(0x6D, 0x08),
    Instruction::Command(0x70, 0x00),
    Instruction::Command(0x71, 0x00),
    Instruction::Command(0x66, 0x1E),
    Instruction::Command(0x3A, 0x24),
    Instruction::Command(0x82, 0x0A),
    Instruction::Command(0x84, 0x0A),
    Instruction::Command(0x85, 0x1D),
    Instruction::Command(0x32, 0xAC),
    Instruction::Command(0x8C, 0x80),
    Instruction::Command(0x3C, 0xF5),
    Instruction::Command(0x3A, 0x24),
    Instruction::Command(0xB5, 0x02),
    Instruction::Command(0x31, 0x25),
    Instruction::Command(0x88, 0x33),
    Instruction::Command(0x38, 0x01),
    Instruction::Command(0x39, 0x00),

    // panel settings and gamma
    Instruction::SwitchPage(1),
    Instruction::Command(0x22, 0x0A),
    Instruction::Command(0x31, 0x00),
    Instruction::Command(0x50, 0x5C),
    Instruction::Command(0x51, 0x5C),
    Instruction::Command(0x53, 0x4A),
    Instruction::Command(0x55, 0x68),
    Instruction::Command(0x60, 0x2B),
    Instruction::Command(0x61, 0x00),
    Instruction::Command(0x62, 0x19),
    Instruction::Command(0x63, 0x00),
    Instruction::Command(0xA0, 0x0F),
    Instruction::Command(0xA1, 0x15),
    Instruction::Command(0xA2, 0x1C),
    Instruction::Command(0xA3, 0x0D),
    Instruction::Command(0xA4, 0x0E),
    Instruction::Command(0xA5, 0x1E),
    Instruction::Command(0xA6, 0x13),
    Instruction::Command(0xA7, 0x17),
    Instruction::Command(0xA8, 0x4A),
    Instruction::Command(0xA9, 0x1A),
    Instruction::Command(0xAA, 0x27),
    Instruction::Command(0xAB, 0x39),
    Instruction::Command(0xAC, 0x19),
    Instruction::Command(0xAD, 0x17),
    Instruction::Command(0xAE, 0x4E),
    Instruction::Command(0xAF, 0x23),
    Instruction::Command(0xB0, 0x29),
    Instruction::Command(0xB1, 0x3D),
    Instruction::Command(0xB2, 0x56),
    Instruction::Command(0xB3, 0x2F),
    Instruction::Command(0xC0, 0x0F),
    Instruction::Command(0xC1, 0x17),
    Instruction::Command(0xC2, 0x1D),
    Instruction::Command(0xC3, 0x0D),
    Instruction::Command(0xC4, 0x0B),
    Instruction::Command(0xC5, 0x1B),
    Instruction::Command(0xC6, 0x10),
    Instruction::Command(0xC7, 0x16),
    Instruction::Command(0xC8, 0x52),
    Instruction::Command(0xC9, 0x1C),
    Instruction::Command(0xCA, 0x26),
    Instruction::Command(0xCB, 0x4B),
    Instruction::Command(0xCC, 0x17),
    Instruction::Command(0xCD, 0x16),
    Instruction::Command(0xCE, 0x4A),
    Instruction::Command(0xCF, 0x20),
    Instruction::Command(0xD0, 0x27),
    Instruction::Command(0xD1, 0x4B),
    Instruction::Command(0xD2, 0x59),
    Instruction::Command(0xD3, 0x39),

    Instruction::SwitchPage(0),
];

/// ETML050015DHA 5" module on an Ilitek ILI9881D, four lanes
pub const ETML050015DHA: PanelDescriptor = PanelDescriptor {
    name: "ETML050015DHA",
    compatible: "surelink,etml050015dha",
    mode: MODE,
    lanes: 4,
    flags: FLAGS,
    format: PixelFormat::Rgb888,
    supplies: &[],
    panel_sleep_delay_ms: 1,
    init: InitSequence {
        page_select: Some(ILI9881_PAGE_SELECT),
        table: ETML050015DHA_INIT,
    },
    post_init: POST_INIT,
    timing: TIMING,
};

/// YB-TG7201280S03A module on an Ilitek ILI9881D, four lanes
pub const YB_TG7201280S03A: PanelDescriptor = PanelDescriptor {
    name: "YB-TG7201280S03A",
    compatible: "surelink,yb_tg7201280s03a",
    mode: MODE,
    lanes: 4,
    flags: FLAGS,
    format: PixelFormat::Rgb888,
    supplies: &[],
    panel_sleep_delay_ms: 1,
    init: InitSequence {
        page_select: Some(ILI9881_PAGE_SELECT),
        table: YB_TG7201280S03A_INIT,
    },
    post_init: POST_INIT,
    timing: TIMING,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn register_writes(table: &[Instruction]) -> usize {
        table
            .iter()
            .filter(|i| matches!(i, Instruction::Command(..)))
            .count()
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(register_writes(YB_TG7201280S03A_INIT), 192);
        assert_eq!(register_writes(ETML050015DHA_INIT), 197);
    }

    #[test]
    fn test_tables_visit_pages_in_order() {
        for table in [YB_TG7201280S03A_INIT, ETML050015DHA_INIT] {
            let pages: alloc::vec::Vec<u8> = table
                .iter()
                .filter_map(|i| match i {
                    Instruction::SwitchPage(page) => Some(*page),
                    _ => None,
                })
                .collect();
            assert_eq!(pages, [3, 4, 1, 0]);
        }
    }

    #[test]
    fn test_modules_differ_only_in_tables() {
        assert_eq!(ETML050015DHA.mode, YB_TG7201280S03A.mode);
        assert_eq!(ETML050015DHA.dsi_settings(), YB_TG7201280S03A.dsi_settings());
        assert_ne!(ETML050015DHA.init.table, YB_TG7201280S03A.init.table);
    }

    #[test]
    fn test_mode_refresh() {
        // 60_000_000 / (953 * 1332) = 47.27
        assert_eq!(MODE.vrefresh(), 47);
    }
}
