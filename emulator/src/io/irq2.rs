
use common::ioreg::IoReg;

use crate::EmulatorState;
use crate::io::Device;

/// The external interrupt source. At each scheduled cycle number it pulses
/// irq2status for exactly one cycle (the driver force-clears the bit at the
/// start of every cycle); entries are consumed in order, never replayed.
pub struct Irq2 {
    schedule: Vec<u32>,
    next: usize,
}

impl Irq2 {
    pub fn new() -> Irq2 {
        Irq2 {
            schedule: Vec::new(),
            next: 0,
        }
    }

    pub fn set_schedule(&mut self, schedule: Vec<u32>) {
        self.schedule = schedule;
        self.next = 0;
    }
}

impl Device for Irq2 {
    fn tick(&mut self, state: &mut EmulatorState) {
        if self.schedule.get(self.next) == Some(&state.cycle()) {
            state.set_ior(IoReg::Irq2Status, 1);
            self.next += 1;
        }
    }
}

impl Default for Irq2 {
    fn default() -> Self {
        Self::new()
    }
}
