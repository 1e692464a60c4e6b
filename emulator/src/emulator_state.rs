
use common::constants::{IOR_COUNT, MEM_SIZE};
use common::ioreg::IoReg;
use common::isa::{NUM_REGS, Reg};

use log::trace;

/// Knobs for behavior the reference machine leaves loose.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimFlags {
    /// Treat register 0 as hardwired zero. The reference machine lets
    /// programs overwrite it, so this defaults to off.
    pub enforce_zero_register: bool,
}

// This is separate from the Emulator so a mutable borrow can be passed to
// the device models while the driver still owns them.
pub struct EmulatorState {
    pc: u32,
    cycle: u32,
    regs: [i32; NUM_REGS],
    dmem: Vec<i32>,
    imem: Vec<String>,
    ior: [i32; IOR_COUNT],
    flags: SimFlags,
}

impl EmulatorState {
    pub fn new(flags: SimFlags) -> Self {
        EmulatorState {
            pc: 0,
            cycle: 0,
            regs: [0; NUM_REGS],
            dmem: vec![0; MEM_SIZE],
            imem: vec!["000000000000".to_owned(); MEM_SIZE],
            ior: [0; IOR_COUNT],
            flags,
        }
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn inc_cycle(&mut self) {
        self.cycle += 1;
    }

    pub fn reg_read(&self, reg: Reg) -> i32 {
        self.regs[reg.index()]
    }

    pub fn reg_write(&mut self, reg: Reg, val: i32) {
        if self.flags.enforce_zero_register && reg == Reg::Zero {
            trace!("Reg: dropping write of {val:#x} to $zero");
            return;
        }
        trace!("Reg: writing {val:#x} to {reg}");
        self.regs[reg.index()] = val;
    }

    // Decode rewrites both immediate registers every cycle, whatever the
    // opcode and whatever the flags say about register 0.
    pub fn set_imm_regs(&mut self, imm1: i32, imm2: i32) {
        self.regs[Reg::Imm1.index()] = imm1;
        self.regs[Reg::Imm2.index()] = imm2;
    }

    pub fn regs(&self) -> &[i32; NUM_REGS] {
        &self.regs
    }

    pub fn mem_read(&self, addr: usize) -> i32 {
        self.dmem[addr]
    }

    pub fn mem_write(&mut self, addr: usize, val: i32) {
        trace!("Mem: writing {val:#x} to {addr:#05x}");
        self.dmem[addr] = val;
    }

    pub fn dmem(&self) -> &[i32] {
        &self.dmem
    }

    pub fn dmem_mut(&mut self) -> &mut [i32] {
        &mut self.dmem
    }

    /// The raw text in instruction slot `pc`, or `None` past the end of
    /// instruction memory.
    pub fn instr_at(&self, pc: u32) -> Option<&str> {
        self.imem.get(pc as usize).map(|s| s.as_str())
    }

    pub fn ior(&self, reg: IoReg) -> i32 {
        self.ior[reg.index()]
    }

    pub fn set_ior(&mut self, reg: IoReg, val: i32) {
        self.ior[reg.index()] = val;
    }

    pub fn load_instruction_image(&mut self, lines: &[String]) {
        for (slot, line) in self.imem.iter_mut().zip(lines) {
            slot.clone_from(line);
        }
    }

    pub fn load_data_image(&mut self, words: &[i32]) {
        self.dmem[..words.len()].copy_from_slice(words);
    }
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new(SimFlags::default())
    }
}
