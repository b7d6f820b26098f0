use crate::command::{
    COL_FMT_18BPP, ENTER_INVERT_MODE, EXIT_SLEEP_MODE, SET_ADDRESS_MODE, SET_DISPLAY_ON,
    SET_PIXEL_FORMAT, ST7785_FRCTRL2, ST7785_GCTRL, ST7785_LCMCTRL, ST7785_PORCTRL,
    ST7785_PWCTRL1, ST7785_RAMCTRL, ST7785_VCMOFSET, ST7785_VCOMS, ST7785_VDVS, ST7785_VDVVRHEN,
    ST7785_VRHS,
};
use crate::config::{DsiModeFlags, PanelDescriptor, PixelFormat, PowerTiming};
use crate::mode::{DisplayMode, ModeType};
use crate::sequence::{InitSequence, Instruction};

const MODE: DisplayMode = DisplayMode {
    clock: 7730,
    hdisplay: 240,
    hsync_start: 240 + 50,
    hsync_end: 240 + 50 + 10,
    htotal: 240 + 50 + 10 + 66,
    vdisplay: 320,
    vsync_start: 320 + 10,
    vsync_end: 320 + 10 + 10,
    vtotal: 320 + 10 + 10 + 22,
    width_mm: 366,
    height_mm: 352,
    mode_type: ModeType::DRIVER.union(ModeType::PREFERRED),
};

const INIT: &[Instruction] = &[
    Instruction::Delay(5),
    Instruction::Delay(150),
    Instruction::Write(&[EXIT_SLEEP_MODE]),
    Instruction::Command(SET_ADDRESS_MODE, 0x00),
    Instruction::Command(SET_PIXEL_FORMAT, COL_FMT_18BPP),
    Instruction::Write(&[ST7785_PORCTRL, 0x0C, 0x0C, 0x00, 0x33, 0x33]),
    Instruction::Command(ST7785_GCTRL, 0x75),
    Instruction::Command(ST7785_VCOMS, 0x2D),
    Instruction::Command(ST7785_LCMCTRL, 0x2C),
    Instruction::Command(ST7785_VDVVRHEN, 0x01),
    Instruction::Command(ST7785_VRHS, 0x13),
    Instruction::Command(ST7785_VDVS, 0x20),
    Instruction::Command(ST7785_VCMOFSET, 0x1C),
    Instruction::Command(ST7785_FRCTRL2, 0x0F),
    Instruction::Command(ST7785_PWCTRL1, 0xA7),
    Instruction::Command(ST7785_RAMCTRL, 0x11),
    Instruction::Write(&[SET_DISPLAY_ON]),
    Instruction::Write(&[ENTER_INVERT_MODE]),
];

/// 240x320 ET0240H6DMA module on a Sitronix ST7785, single lane
pub const ET0240H6DMA: PanelDescriptor = PanelDescriptor {
    name: "ET0240H6DMA",
    compatible: "et0240h6dma,st7785",
    mode: MODE,
    lanes: 1,
    flags: DsiModeFlags::VIDEO
        .union(DsiModeFlags::VIDEO_SYNC_PULSE)
        .union(DsiModeFlags::CLOCK_NON_CONTINUOUS)
        .union(DsiModeFlags::LPM),
    format: PixelFormat::Rgb888,
    supplies: &["VCC", "IOVCC"],
    panel_sleep_delay_ms: 80,
    init: InitSequence {
        page_select: None,
        table: INIT,
    },
    post_init: &[],
    timing: PowerTiming {
        probe_release_ms: None,
        prepare_delay_ms: 150,
        prepare_reset_ms: None,
        reset_settle_ms: 50,
        unprepare_reset_ms: Some(15),
    },
};
