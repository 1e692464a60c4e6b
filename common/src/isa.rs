
use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::ToPrimitive;

pub const NUM_REGS: usize = 16;

// Register 1 and 2 are rewritten with the current instruction's immediates
// on every decode; the rest are plain storage, names are convention only.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Reg {
    Zero = 0,
    Imm1,
    Imm2,
    V0,
    A0,
    A1,
    A2,
    T0,
    T1,
    T2,
    S0,
    S1,
    S2,
    Gp,
    Sp,
    Ra,
}

impl Reg {
    pub const NUM_BITS: u32 = 4;

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}", format!("{:?}", self).to_lowercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

pub const NUM_OPCODES: usize = 22;

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Opcode {
    Add = 0,
    Sub,
    Mac,
    And,
    Or,
    Xor,
    Sll,
    Sra,
    Srl,
    Beq,
    Bne,
    Blt,
    Bgt,
    Ble,
    Bge,
    Jal,
    Lw,
    Sw,
    Reti,
    In,
    Out,
    Halt,
}

impl Opcode {
    pub const NUM_BITS: u32 = 8;
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// One decoded instruction. Immediates are kept sign-extended; `encode`
/// masks them back down to their 12-bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    pub rd: Reg,
    pub rs: Reg,
    pub rt: Reg,
    pub rm: Reg,
    pub imm1: i32,
    pub imm2: i32,
}

impl Instruction {
    // The inverse of decoder::decode.
    pub fn encode(&self) -> String {
        format!(
            "{:02X}{:X}{:X}{:X}{:X}{:03X}{:03X}",
            self.op.to_u32().unwrap(),
            self.rd.to_u32().unwrap(),
            self.rs.to_u32().unwrap(),
            self.rt.to_u32().unwrap(),
            self.rm.to_u32().unwrap(),
            (self.imm1 as u32) & 0xFFF,
            (self.imm2 as u32) & 0xFFF,
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}, {}, {}, {}, {}, {}",
            self.op, self.rd, self.rs, self.rt, self.rm, self.imm1, self.imm2
        )
    }
}
