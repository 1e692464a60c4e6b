
use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};

/// The 23 memory-mapped I/O registers, in bank order. `Display` spells the
/// names the way the hardware-register trace expects them.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum IoReg {
    Irq0Enable = 0,
    Irq1Enable,
    Irq2Enable,
    Irq0Status,
    Irq1Status,
    Irq2Status,
    IrqHandler,
    IrqReturn,
    Clks,
    Leds,
    Display7Seg,
    TimerEnable,
    TimerCurrent,
    TimerMax,
    DiskCmd,
    DiskSector,
    DiskBuffer,
    DiskStatus,
    Reserved0,
    Reserved1,
    MonitorAddr,
    MonitorData,
    MonitorCmd,
}

impl IoReg {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IoReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IoReg::Reserved0 | IoReg::Reserved1 => write!(f, "reserved"),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}
