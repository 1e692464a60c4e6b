
use common::ioreg::IoReg;

use crate::EmulatorState;
use crate::io::Device;

/// The CPU timer. While enabled it counts cycles; on reaching timermax it
/// raises irq0status and wraps timercurrent back to zero. All of its state
/// lives in the IOR bank.
#[derive(Default)]
pub struct Timer;

impl Device for Timer {
    fn tick(&mut self, state: &mut EmulatorState) {
        if state.ior(IoReg::TimerEnable) != 1 {
            return;
        }
        let current = state.ior(IoReg::TimerCurrent).wrapping_add(1);
        if current == state.ior(IoReg::TimerMax) {
            state.set_ior(IoReg::Irq0Status, 1);
            state.set_ior(IoReg::TimerCurrent, 0);
        } else {
            state.set_ior(IoReg::TimerCurrent, current);
        }
    }
}
