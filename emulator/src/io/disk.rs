
use common::constants::{DISK_DELAY_CYCLES, DISK_WORDS, MEM_SIZE, NUM_SECTORS, SECTOR_WORDS};
use common::ioreg::IoReg;

use log::debug;

use crate::EmulatorState;
use crate::emulator::SimError;
use crate::io::Device;

// diskcmd values with hardware behind them; anything else just latches.
const CMD_READ: i32 = 1;
const CMD_WRITE: i32 = 2;

/// The disk: 128 sectors of 128 words, reachable only through DMA. A
/// command transfers immediately and then holds diskstatus busy for the
/// fixed service latency.
pub struct Disk {
    sectors: Vec<i32>, // sector-major
    countdown: u32,    // nonzero iff a command is in flight
}

impl Disk {
    pub fn new() -> Disk {
        Disk {
            sectors: vec![0; DISK_WORDS],
            countdown: 0,
        }
    }

    pub fn load_image(&mut self, words: &[i32]) {
        self.sectors[..words.len()].copy_from_slice(words);
    }

    pub fn idle(&self) -> bool {
        self.countdown == 0
    }

    pub fn contents(&self) -> &[i32] {
        &self.sectors
    }

    /// Service a freshly written diskcmd. Runs synchronously inside the
    /// `out` handler: the words move now, the latency is only the busy
    /// countdown that follows.
    pub fn launch(&mut self, state: &mut EmulatorState) -> Result<(), SimError> {
        let cmd = state.ior(IoReg::DiskCmd);
        if cmd != CMD_READ && cmd != CMD_WRITE {
            return Ok(());
        }

        let sector = state.ior(IoReg::DiskSector);
        let buffer = state.ior(IoReg::DiskBuffer);
        let sector_ok = (0..NUM_SECTORS as i32).contains(&sector);
        let buffer_ok = (0..=(MEM_SIZE - SECTOR_WORDS) as i32).contains(&buffer);
        if !sector_ok || !buffer_ok {
            return Err(SimError::DmaFault { sector, buffer });
        }

        let sec = sector as usize * SECTOR_WORDS;
        let buf = buffer as usize;
        let mem = state.dmem_mut();
        if cmd == CMD_READ {
            mem[buf..buf + SECTOR_WORDS].copy_from_slice(&self.sectors[sec..sec + SECTOR_WORDS]);
            debug!("disk: read sector {sector} into {buffer:#05x}");
        } else {
            self.sectors[sec..sec + SECTOR_WORDS].copy_from_slice(&mem[buf..buf + SECTOR_WORDS]);
            debug!("disk: wrote sector {sector} from {buffer:#05x}");
        }

        state.set_ior(IoReg::DiskStatus, 1);
        self.countdown = DISK_DELAY_CYCLES;
        Ok(())
    }
}

impl Device for Disk {
    fn tick(&mut self, state: &mut EmulatorState) {
        if state.ior(IoReg::DiskStatus) != 1 || self.countdown == 0 {
            return;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            state.set_ior(IoReg::DiskStatus, 0);
            state.set_ior(IoReg::DiskCmd, 0);
            state.set_ior(IoReg::Irq1Status, 1);
            debug!("disk: transfer complete");
        }
    }
}

impl Default for Disk {
    fn default() -> Self {
        Self::new()
    }
}
