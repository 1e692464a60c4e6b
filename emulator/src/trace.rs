
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use common::ioreg::IoReg;
use common::isa::NUM_REGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Access::Read => write!(f, "READ"),
            Access::Write => write!(f, "WRITE"),
        }
    }
}

/// The four execution-time logs. The formats are frozen: downstream
/// tooling diffs these files byte for byte against the reference tool's.
pub struct Tracer {
    trace: Box<dyn Write>,
    hwreg: Box<dyn Write>,
    leds: Box<dyn Write>,
    display: Box<dyn Write>,
}

impl Tracer {
    pub fn new(
        trace: Box<dyn Write>,
        hwreg: Box<dyn Write>,
        leds: Box<dyn Write>,
        display: Box<dyn Write>,
    ) -> Tracer {
        Tracer {
            trace,
            hwreg,
            leds,
            display,
        }
    }

    /// A tracer that drops everything, for callers that only care about
    /// architectural end state.
    pub fn discard() -> Tracer {
        Tracer::new(
            Box::new(io::sink()),
            Box::new(io::sink()),
            Box::new(io::sink()),
            Box::new(io::sink()),
        )
    }

    // One line per retired cycle, snapshotted before the instruction
    // executes. The trailing space matches the reference tool.
    pub fn instruction(&mut self, pc: u32, raw: &str, regs: &[i32; NUM_REGS]) -> io::Result<()> {
        write!(self.trace, "{pc:03X} {raw} ")?;
        for reg in regs {
            write!(self.trace, "{reg:08X} ")?;
        }
        writeln!(self.trace)
    }

    pub fn hw_access(&mut self, cycle: i32, access: Access, reg: IoReg, value: i32) -> io::Result<()> {
        writeln!(self.hwreg, "{} {access} {reg} {value:08X}", cycle as u32)
    }

    pub fn led(&mut self, cycle: i32, value: i32) -> io::Result<()> {
        writeln!(self.leds, "{} {value:08X}", cycle as u32)
    }

    pub fn display7seg(&mut self, cycle: i32, value: i32) -> io::Result<()> {
        writeln!(self.display, "{} {value:08X}", cycle as u32)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.trace.flush()?;
        self.hwreg.flush()?;
        self.leds.flush()?;
        self.display.flush()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// An in-memory sink that can be read back after the run. Tests hand
/// clones of one of these to the [`Tracer`] the way the CLI hands it
/// files.
#[derive(Default, Clone)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
