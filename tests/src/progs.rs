use crate::util::*;
use common::ioreg::IoReg;
use common::isa::{Opcode::*, Reg::*};
use emu_lib::image;

#[test]
fn add_then_halt() {
    // add $v0, $zero, $imm1, $zero with imm1 = 5, then halt.
    let (mut emu, logs) = capturing_emulator();
    emu.load_instruction_image(&[li(V0, 5), halt()]);
    emu.run().unwrap();

    assert_eq!(emu.state().reg_read(V0), 5);
    assert_eq!(emu.cycles(), 2);
    assert_eq!(logs.trace.contents().lines().count(), 2);

    let mut disk = Vec::new();
    image::dump_disk(&mut disk, emu.disk().contents()).unwrap();
    assert!(disk.is_empty());

    let mut monitor = Vec::new();
    image::dump_monitor_text(&mut monitor, emu.monitor().frame()).unwrap();
    assert!(monitor.is_empty());
}

#[test]
fn countdown_sum_loop() {
    let emu = run_prog(&[
        li(T0, 0),
        li(T1, 10),
        li(A0, 3),
        ins(Add, T0, T0, T1, Zero, 0, 0),
        ins(Sub, T1, T1, Imm1, Zero, 1, 0),
        ins(Bne, Zero, T1, Zero, A0, 0, 0),
        halt(),
    ]);
    assert_eq!(emu.state().reg_read(T0), 55);
    assert_eq!(emu.state().reg_read(T1), 0);
}

#[test]
fn interrupt_unparks_a_waiting_halt() {
    // The halt parks on an outstanding DMA; the completion interrupt pulls
    // the machine into its handler, and reti re-parks it on the (by then
    // drained) halt.
    let emu = run_prog(&[
        li(T0, 8),
        out(IoReg::IrqHandler, T0),
        li(T1, 1),
        out(IoReg::Irq1Enable, T1),
        out(IoReg::DiskCmd, T1),
        halt(),
        nop(),
        nop(),
        li(V0, 77), // handler
        ins(Reti, Zero, Zero, Zero, Zero, 0, 0),
    ]);

    assert_eq!(emu.state().reg_read(V0), 77);
    assert_eq!(emu.state().ior(IoReg::IrqReturn), 5);
    assert_eq!(emu.state().ior(IoReg::Irq1Status), 0);
    assert_eq!(emu.cycles(), 1031);
}
