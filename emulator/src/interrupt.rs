
use common::ioreg::IoReg;

use crate::EmulatorState;

use log::debug;

/// Evaluate the merged interrupt line and enter the handler if it is
/// raised. Runs once per cycle, after the device ticks.
///
/// The merge is bitwise, exactly as the reference controller computed it:
/// a source contributes iff (enable & status) != 0. There is no nested
/// interrupt stack; a second accepted interrupt overwrites irqreturn.
pub fn service(state: &mut EmulatorState) {
    let irq0 = state.ior(IoReg::Irq0Enable) & state.ior(IoReg::Irq0Status);
    let irq1 = state.ior(IoReg::Irq1Enable) & state.ior(IoReg::Irq1Status);
    let irq2 = state.ior(IoReg::Irq2Enable) & state.ior(IoReg::Irq2Status);
    if (irq0 | irq1 | irq2) == 0 {
        return;
    }

    let handler = state.ior(IoReg::IrqHandler);
    // An in-progress handler cannot be preempted.
    if state.pc() as i32 == handler {
        return;
    }

    debug!(
        "interrupt: entering handler {handler:03X} from pc {:03X}",
        state.pc()
    );
    state.set_ior(IoReg::IrqReturn, state.pc() as i32);
    state.set_pc(handler as u32);

    // Each contributing source is acknowledged independently.
    if irq0 != 0 {
        state.set_ior(IoReg::Irq0Status, 0);
    }
    if irq1 != 0 {
        state.set_ior(IoReg::Irq1Status, 0);
    }
    if irq2 != 0 {
        state.set_ior(IoReg::Irq2Status, 0);
    }
}
