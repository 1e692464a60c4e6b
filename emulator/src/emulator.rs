
use common::constants::{MEM_SIZE, PC_MASK};
use common::decoder::{self, DecodeError};
use common::ioreg::IoReg;
use common::isa::{Instruction, Opcode};

use crate::emulator_state::{EmulatorState, SimFlags};
use crate::interrupt;
use crate::io::{Device, Disk, Irq2, Monitor, Timer};
use crate::trace::{Access, Tracer};

use std::io;

use log::{debug, error};
use num_traits::FromPrimitive;
use thiserror::Error;

/// Hard faults that stop the run. Everything here was "reported and
/// limped on" in the reference tool; see DESIGN.md for the divergences.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("decode fault at pc {pc:03X}: {source}")]
    Decode {
        pc: u32,
        #[source]
        source: DecodeError,
    },
    #[error("{op} fault at pc {pc:03X}: address {addr} outside data memory")]
    MemoryFault {
        pc: u32,
        op: &'static str,
        addr: i32,
    },
    #[error("fetch fault: pc {pc} outside instruction memory")]
    FetchFault { pc: u32 },
    #[error("dma fault: sector {sector}, buffer {buffer} outside the disk or data memory")]
    DmaFault { sector: i32, buffer: i32 },
    #[error("trace write failed")]
    Trace(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
}

pub struct Emulator {
    state: EmulatorState,
    disk: Disk,
    timer: Timer,
    irq2: Irq2,
    monitor: Monitor,
    tracer: Tracer,
}

impl Emulator {
    pub fn new(tracer: Tracer) -> Emulator {
        Self::with_flags(tracer, SimFlags::default())
    }

    pub fn with_flags(tracer: Tracer, flags: SimFlags) -> Emulator {
        Emulator {
            state: EmulatorState::new(flags),
            disk: Disk::new(),
            timer: Timer,
            irq2: Irq2::new(),
            monitor: Monitor::new(),
            tracer,
        }
    }

    pub fn load_instruction_image(&mut self, lines: &[String]) {
        self.state.load_instruction_image(lines);
    }

    pub fn load_data_image(&mut self, words: &[i32]) {
        self.state.load_data_image(words);
    }

    pub fn load_disk_image(&mut self, words: &[i32]) {
        self.disk.load_image(words);
    }

    pub fn set_irq2_schedule(&mut self, schedule: Vec<u32>) {
        self.irq2.set_schedule(schedule);
    }

    pub fn state(&self) -> &EmulatorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EmulatorState {
        &mut self.state
    }

    pub fn disk(&self) -> &Disk {
        &self.disk
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn cycles(&self) -> u32 {
        self.state.cycle()
    }

    pub fn flush_trace(&mut self) -> io::Result<()> {
        self.tracer.flush()
    }

    // Run until the halt state machine reaches HALTED.
    pub fn run(&mut self) -> Result<(), SimError> {
        while self.step()? == RunState::Running {}
        Ok(())
    }

    /// One cycle: one atomic transition over all shared state. The order
    /// below is part of the observable contract and must not be shuffled.
    pub fn step(&mut self) -> Result<RunState, SimError> {
        let cycle = self.state.cycle();
        self.state.set_ior(IoReg::Clks, cycle as i32);
        // The external line is a one-cycle pulse.
        self.state.set_ior(IoReg::Irq2Status, 0);

        let pc = self.state.pc();
        let raw = self
            .state
            .instr_at(pc)
            .ok_or(SimError::FetchFault { pc })?
            .to_owned();
        let ins = decoder::decode(&raw).map_err(|source| SimError::Decode { pc, source })?;
        // Every decode latches the immediates, whatever the opcode.
        self.state.set_imm_regs(ins.imm1, ins.imm2);

        self.tracer.instruction(pc, &raw, self.state.regs())?;
        debug!("cycle {cycle}: pc {pc:03X}: {ins}");

        if ins.op == Opcode::Halt {
            if self.disk.idle() {
                self.state.inc_cycle();
                return Ok(RunState::Halted);
            }
            // Parked on halt until the disk drains; devices still run, and
            // a delivered interrupt moves pc back off the halt.
        } else {
            self.exec(&ins)?;
        }

        self.irq2.tick(&mut self.state);
        self.disk.tick(&mut self.state);
        self.timer.tick(&mut self.state);
        interrupt::service(&mut self.state);

        self.state.inc_cycle();
        Ok(RunState::Running)
    }

    fn advance_pc(&mut self) {
        let pc = self.state.pc();
        self.state.set_pc(pc + 1);
    }

    fn exec(&mut self, ins: &Instruction) -> Result<(), SimError> {
        use Opcode::*;
        match ins.op {
            Add | Sub | Mac | And | Or | Xor | Sll | Sra | Srl => self.exec_arith(ins),
            Beq | Bne | Blt | Bgt | Ble | Bge | Jal => self.exec_branch(ins),
            Lw | Sw => self.exec_mem(ins)?,
            In | Out | Reti => self.exec_io(ins)?,
            Halt => unreachable!("halt is handled by the driver"),
        }
        Ok(())
    }

    fn exec_arith(&mut self, ins: &Instruction) {
        let rs = self.state.reg_read(ins.rs);
        let rt = self.state.reg_read(ins.rt);
        let rm = self.state.reg_read(ins.rm);

        use Opcode::*;
        let result = match ins.op {
            Add => rs.wrapping_add(rt).wrapping_add(rm),
            Sub => rs.wrapping_sub(rt).wrapping_sub(rm),
            Mac => rs.wrapping_mul(rt).wrapping_add(rm),
            And => rs & rt & rm,
            Or => rs | rt | rm,
            Xor => rs ^ rt ^ rm,
            // Shift counts alias mod 32, as on the reference target.
            Sll => rs.wrapping_shl(rt as u32),
            Sra => rs.wrapping_shr(rt as u32),
            Srl => ((rs as u32).wrapping_shr(rt as u32)) as i32,
            _ => unreachable!(),
        };

        self.state.reg_write(ins.rd, result);
        self.advance_pc();
    }

    fn exec_branch(&mut self, ins: &Instruction) {
        let rs = self.state.reg_read(ins.rs);
        let rt = self.state.reg_read(ins.rt);
        // Branch targets are instruction-memory indices; whatever the
        // register holds is masked down to 12 bits.
        let target = (self.state.reg_read(ins.rm) & PC_MASK) as u32;

        use Opcode::*;
        if ins.op == Jal {
            let link = self.state.pc() as i32 + 1;
            self.state.reg_write(ins.rd, link);
            self.state.set_pc(target);
            return;
        }

        let taken = match ins.op {
            Beq => rs == rt,
            Bne => rs != rt,
            Blt => rs < rt,
            Bgt => rs > rt,
            Ble => rs <= rt,
            Bge => rs >= rt,
            _ => unreachable!(),
        };

        if taken {
            self.state.set_pc(target);
        } else {
            self.advance_pc();
        }
    }

    fn exec_mem(&mut self, ins: &Instruction) -> Result<(), SimError> {
        let rs = self.state.reg_read(ins.rs);
        let rt = self.state.reg_read(ins.rt);
        let addr = rs.wrapping_add(rt);
        if !(0..MEM_SIZE as i32).contains(&addr) {
            let op = if ins.op == Opcode::Lw { "load" } else { "store" };
            return Err(SimError::MemoryFault {
                pc: self.state.pc(),
                op,
                addr,
            });
        }
        let addr = addr as usize;
        let rm = self.state.reg_read(ins.rm);

        match ins.op {
            Opcode::Lw => {
                let val = self.state.mem_read(addr).wrapping_add(rm);
                self.state.reg_write(ins.rd, val);
            }
            Opcode::Sw => {
                let val = self.state.reg_read(ins.rd).wrapping_add(rm);
                self.state.mem_write(addr, val);
            }
            _ => unreachable!(),
        }

        self.advance_pc();
        Ok(())
    }

    fn exec_io(&mut self, ins: &Instruction) -> Result<(), SimError> {
        let addr = self
            .state
            .reg_read(ins.rs)
            .wrapping_add(self.state.reg_read(ins.rt));
        let Some(reg) = IoReg::from_i32(addr) else {
            // Real hardware would simply not respond.
            error!(
                "pc {:03X}: I/O address {addr} outside the register bank, ignored",
                self.state.pc()
            );
            self.advance_pc();
            return Ok(());
        };

        match ins.op {
            Opcode::In => {
                let val = self.state.ior(reg);
                // Reading the monitor command slot consumes it.
                if reg == IoReg::MonitorCmd {
                    self.state.set_ior(IoReg::MonitorCmd, 0);
                }
                self.state.reg_write(ins.rd, val);
                self.tracer
                    .hw_access(self.state.ior(IoReg::Clks), Access::Read, reg, val)?;
                self.advance_pc();
            }
            Opcode::Out => {
                let val = self.state.reg_read(ins.rm);
                self.state.set_ior(reg, val);
                self.tracer
                    .hw_access(self.state.ior(IoReg::Clks), Access::Write, reg, val)?;
                self.out_side_effects(reg)?;
                self.advance_pc();
            }
            Opcode::Reti => {
                let ret = self.state.ior(IoReg::IrqReturn);
                self.state.set_pc(ret as u32);
                // The reference tool never logs a reti issued through I/O
                // address 0; kept for trace compatibility.
                if reg != IoReg::Irq0Enable {
                    self.tracer
                        .hw_access(self.state.ior(IoReg::Clks), Access::Write, reg, ret)?;
                }
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    // Slots with hardware behind them, serviced synchronously inside the
    // out instruction itself (not by the per-cycle device ticks).
    fn out_side_effects(&mut self, reg: IoReg) -> Result<(), SimError> {
        match reg {
            IoReg::Leds => {
                let cycle = self.state.ior(IoReg::Clks);
                self.tracer.led(cycle, self.state.ior(IoReg::Leds))?;
            }
            IoReg::Display7Seg => {
                let cycle = self.state.ior(IoReg::Clks);
                self.tracer
                    .display7seg(cycle, self.state.ior(IoReg::Display7Seg))?;
            }
            IoReg::MonitorCmd if self.state.ior(IoReg::MonitorCmd) == 1 => {
                self.monitor.commit(&self.state);
            }
            IoReg::DiskCmd if self.state.ior(IoReg::DiskStatus) == 0 => {
                self.disk.launch(&mut self.state)?;
            }
            _ => {}
        }
        Ok(())
    }
}
