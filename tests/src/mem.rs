use crate::util::*;
use common::isa::{Opcode::*, Reg::*};
use emu_lib::{Emulator, SimError};
use emu_lib::trace::Tracer;

#[test]
fn store_then_load() {
    let emu = run_prog(&[
        li(T0, 1234),
        ins(Sw, T0, Zero, Imm1, Zero, 100, 0),
        ins(Lw, V0, Zero, Imm1, Zero, 100, 0),
        halt(),
    ]);
    assert_eq!(emu.state().mem_read(100), 1234);
    assert_eq!(emu.state().reg_read(V0), 1234);
}

#[test]
fn effective_address_is_rs_plus_rt() {
    let emu = run_prog(&[
        li(T0, 90),
        li(T1, 10),
        ins(Sw, T0, T0, T1, Zero, 0, 0), // mem[100] = 90
        ins(Lw, V0, T1, Imm1, Zero, 90, 0),
        halt(),
    ]);
    assert_eq!(emu.state().reg_read(V0), 90);
}

#[test]
fn rm_offsets_both_directions() {
    // lw adds rm to the loaded word; sw adds rm to the stored register.
    let emu = run_prog(&[
        li(T0, 50),
        li(T2, 7),
        ins(Sw, T0, Zero, Imm1, T2, 200, 0), // mem[200] = 50 + 7
        ins(Lw, V0, Zero, Imm1, T2, 200, 0), // v0 = 57 + 7
        halt(),
    ]);
    assert_eq!(emu.state().mem_read(200), 57);
    assert_eq!(emu.state().reg_read(V0), 64);
}

#[test]
fn preloaded_data_image() {
    let mut emu = Emulator::new(Tracer::discard());
    emu.load_instruction_image(&[
        ins(Lw, V0, Zero, Imm1, Zero, 3, 0),
        halt(),
    ]);
    emu.load_data_image(&[0, 0, 0, 0x0BAD_CAFE_u32 as i32]);
    emu.run().unwrap();
    assert_eq!(emu.state().reg_read(V0), 0x0BAD_CAFE_u32 as i32);
}

#[test]
fn load_fault_is_hard() {
    let mut emu = Emulator::new(Tracer::discard());
    emu.load_instruction_image(&[
        li(T0, 2047),
        ins(Sll, T0, T0, Imm1, Zero, 4, 0), // 32752, far out of range
        ins(Lw, V0, T0, Zero, Zero, 0, 0),
        halt(),
    ]);
    let err = emu.run().unwrap_err();
    assert!(matches!(
        err,
        SimError::MemoryFault {
            pc: 2,
            op: "load",
            addr: 32752,
        }
    ));
}

#[test]
fn store_fault_at_4096() {
    let mut emu = Emulator::new(Tracer::discard());
    emu.load_instruction_image(&[
        li(T0, 1024),
        ins(Add, T0, T0, T0, Zero, 0, 0), // 2048
        ins(Sw, Zero, T0, T0, Zero, 0, 0), // address 4096, one past the end
    ]);
    let err = emu.run().unwrap_err();
    assert!(matches!(
        err,
        SimError::MemoryFault {
            op: "store",
            addr: 4096,
            ..
        }
    ));
}
