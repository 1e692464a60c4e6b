use crate::util::*;
use common::constants::{MEM_SIZE, MONITOR_PIXELS};
use common::ioreg::IoReg;
use common::isa::{Opcode::*, Reg::*};
use emu_lib::Emulator;
use emu_lib::image;
use emu_lib::trace::Tracer;

#[test]
fn scenario_trace_is_byte_exact() {
    let (mut emu, logs) = capturing_emulator();
    emu.load_instruction_image(&[li(V0, 5), halt()]);
    emu.run().unwrap();

    assert_eq!(
        logs.trace.contents(),
        "000 003010005000 00000000 00000005 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 \n\
         001 150000000000 00000000 00000000 00000000 00000005 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 \n"
    );
}

#[test]
fn hw_register_trace_prints_full_words() {
    let (mut emu, logs) = capturing_emulator();
    emu.load_instruction_image(&[li(T0, -1), out(IoReg::Leds, T0), halt()]);
    emu.run().unwrap();
    assert_eq!(logs.hwreg.contents(), "1 WRITE leds FFFFFFFF\n");
    assert_eq!(logs.leds.contents(), "1 FFFFFFFF\n");
}

#[test]
fn data_memory_dump_is_full_length() {
    let emu = run_prog(&[
        li(T0, 0x7FF),
        ins(Sw, T0, Zero, Imm1, Zero, 100, 0),
        halt(),
    ]);
    let mut out = Vec::new();
    image::dump_data_memory(&mut out, emu.state().dmem()).unwrap();
    let dump = String::from_utf8(out).unwrap();
    assert_eq!(dump.lines().count(), MEM_SIZE);
    assert_eq!(dump.lines().nth(100), Some("000007FF"));
}

#[test]
fn register_dump_is_r3_to_r15() {
    let emu = run_prog(&[li(V0, 5), li(Ra, -3), halt()]);
    let mut out = Vec::new();
    image::dump_registers(&mut out, emu.state().regs()).unwrap();
    let dump = String::from_utf8(out).unwrap();
    assert_eq!(dump.lines().count(), 13);
    assert_eq!(dump.lines().next(), Some("00000005"));
    assert_eq!(dump.lines().last(), Some("FFFFFFFD"));
}

#[test]
fn disk_dump_truncates_after_last_nonzero() {
    let mut emu = Emulator::new(Tracer::discard());
    emu.load_disk_image(&[0, 0, 5]);
    let mut out = Vec::new();
    image::dump_disk(&mut out, emu.disk().contents()).unwrap();
    assert_eq!(out, b"00000000\n00000000\n00000005\n");

    let empty = Emulator::new(Tracer::discard());
    let mut out = Vec::new();
    image::dump_disk(&mut out, empty.disk().contents()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn monitor_dumps_truncated_text_fixed_binary() {
    let emu = run_prog(&[
        li(T0, 2), // x = 0, y = 2
        out(IoReg::MonitorAddr, T0),
        li(T1, 0x3C),
        out(IoReg::MonitorData, T1),
        li(T2, 1),
        out(IoReg::MonitorCmd, T2),
        halt(),
    ]);

    let mut text = Vec::new();
    image::dump_monitor_text(&mut text, emu.monitor().frame()).unwrap();
    let text = String::from_utf8(text).unwrap();
    // Pixel lives at row 2, column 0: index 512, so 513 lines.
    assert_eq!(text.lines().count(), 513);
    assert_eq!(text.lines().last(), Some("3C"));

    let mut bin = Vec::new();
    image::dump_monitor_binary(&mut bin, emu.monitor().frame()).unwrap();
    assert_eq!(bin.len(), MONITOR_PIXELS);
    assert_eq!(bin[512], 0x3C);
}

fn run_mixed_workload() -> (String, String, String, String, String, String) {
    let (mut emu, logs) = capturing_emulator();
    emu.load_instruction_image(&[
        li(T0, 8),
        out(IoReg::IrqHandler, T0),
        li(T1, 1),
        out(IoReg::Irq2Enable, T1),
        li(T0, 0x55),
        out(IoReg::Leds, T0),
        out(IoReg::Display7Seg, T0),
        halt(),
        li(V0, 42), // handler
        ins(Reti, Zero, Zero, Zero, Zero, 0, 0),
    ]);
    emu.set_irq2_schedule(vec![5]);
    emu.run().unwrap();

    let mut dmem = Vec::new();
    image::dump_data_memory(&mut dmem, emu.state().dmem()).unwrap();
    let mut regs = Vec::new();
    image::dump_registers(&mut regs, emu.state().regs()).unwrap();

    (
        logs.trace.contents(),
        logs.hwreg.contents(),
        logs.leds.contents(),
        logs.display.contents(),
        String::from_utf8(dmem).unwrap(),
        String::from_utf8(regs).unwrap(),
    )
}

#[test]
fn identical_runs_are_byte_identical() {
    assert_eq!(run_mixed_workload(), run_mixed_workload());
}
