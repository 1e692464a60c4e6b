
use common::constants::{MONITOR_DIM, MONITOR_PIXELS};
use common::ioreg::IoReg;

use log::error;

use crate::EmulatorState;

/// The 256x256 grayscale framebuffer. Pixels change only through a
/// committed monitor write.
pub struct Monitor {
    frame: Vec<u8>, // row-major
}

impl Monitor {
    pub fn new() -> Monitor {
        Monitor {
            frame: vec![0; MONITOR_PIXELS],
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Latch monitoraddr/monitordata into the framebuffer: X is the high
    /// address byte, Y the low one, and only the low data byte is kept.
    pub fn commit(&mut self, state: &EmulatorState) {
        let addr = state.ior(IoReg::MonitorAddr);
        let data = state.ior(IoReg::MonitorData);
        if addr as u32 > 0xFFFF {
            error!("monitor: address {addr:#x} does not name a pixel, write dropped");
            return;
        }
        let x = ((addr >> 8) & 0xFF) as usize;
        let y = (addr & 0xFF) as usize;
        self.frame[y * MONITOR_DIM + x] = (data & 0xFF) as u8;
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
