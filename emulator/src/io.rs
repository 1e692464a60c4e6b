pub mod disk;
pub mod irq2;
pub mod monitor;
pub mod timer;

pub use disk::Disk;
pub use irq2::Irq2;
pub use monitor::Monitor;
pub use timer::Timer;

use crate::EmulatorState;

/// A device stepped once per cycle, after instruction execution. Devices
/// raise interrupts by setting their IOR status bit; the controller in
/// [`crate::interrupt`] merges and delivers them. The driver ticks devices
/// in a fixed order (irq2, disk, timer) that callers must not change.
pub trait Device {
    fn tick(&mut self, state: &mut EmulatorState);
}
