//! Loading of the input images and dumping of the end-state artifacts.
//!
//! These are thin adapters over the text formats; all of the semantics
//! live in the emulator proper. Instruction text is loaded verbatim (a
//! malformed line only matters if it is ever fetched, and then it is a
//! decode fault), while numeric images are parsed here and rejected up
//! front.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use common::constants::{DISK_WORDS, MEM_SIZE};
use common::isa::NUM_REGS;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("instruction image has {0} lines, instruction memory holds {MEM_SIZE}")]
    TooManyInstructions(usize),
    #[error("image has {got} words, {capacity} fit")]
    TooManyWords { got: usize, capacity: usize },
    #[error("word {index}: {text:?} is not an 8-hex-digit word")]
    BadWord { index: usize, text: String },
    #[error("irq2 entry {index}: {text:?} is not a cycle number")]
    BadCycle { index: usize, text: String },
    #[error("irq2 schedule must be strictly ascending at entry {0}")]
    UnorderedSchedule(usize),
}

////////////////////////////////////////////////////////////////////////////////
// Loading

pub fn parse_instruction_image(text: &str) -> Result<Vec<String>, ImageError> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    if lines.len() > MEM_SIZE {
        return Err(ImageError::TooManyInstructions(lines.len()));
    }
    Ok(lines)
}

fn parse_words(text: &str, capacity: usize) -> Result<Vec<i32>, ImageError> {
    let mut words = Vec::new();
    for (index, token) in text.split_whitespace().enumerate() {
        if words.len() == capacity {
            return Err(ImageError::TooManyWords {
                got: capacity + 1,
                capacity,
            });
        }
        if token.len() > 8 {
            return Err(ImageError::BadWord {
                index,
                text: token.to_owned(),
            });
        }
        let word = u32::from_str_radix(token, 16).map_err(|_| ImageError::BadWord {
            index,
            text: token.to_owned(),
        })?;
        words.push(word as i32);
    }
    Ok(words)
}

pub fn parse_data_image(text: &str) -> Result<Vec<i32>, ImageError> {
    parse_words(text, MEM_SIZE)
}

pub fn parse_disk_image(text: &str) -> Result<Vec<i32>, ImageError> {
    parse_words(text, DISK_WORDS)
}

pub fn parse_irq2_schedule(text: &str) -> Result<Vec<u32>, ImageError> {
    let mut schedule = Vec::new();
    for (index, token) in text.split_whitespace().enumerate() {
        let cycle: u32 = token.parse().map_err(|_| ImageError::BadCycle {
            index,
            text: token.to_owned(),
        })?;
        if schedule.last().is_some_and(|&prev| prev >= cycle) {
            return Err(ImageError::UnorderedSchedule(index));
        }
        schedule.push(cycle);
    }
    Ok(schedule)
}

fn read_text(path: &Path) -> Result<String, ImageError> {
    fs::read_to_string(path).map_err(|source| ImageError::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn load_instruction_image(path: &Path) -> Result<Vec<String>, ImageError> {
    parse_instruction_image(&read_text(path)?)
}

pub fn load_data_image(path: &Path) -> Result<Vec<i32>, ImageError> {
    parse_data_image(&read_text(path)?)
}

pub fn load_disk_image(path: &Path) -> Result<Vec<i32>, ImageError> {
    parse_disk_image(&read_text(path)?)
}

pub fn load_irq2_schedule(path: &Path) -> Result<Vec<u32>, ImageError> {
    parse_irq2_schedule(&read_text(path)?)
}

////////////////////////////////////////////////////////////////////////////////
// Dumping

pub fn dump_data_memory(out: &mut impl Write, dmem: &[i32]) -> io::Result<()> {
    for word in dmem {
        writeln!(out, "{word:08X}")?;
    }
    Ok(())
}

// Registers 0-2 are scratch by construction; only 3-15 are dumped.
pub fn dump_registers(out: &mut impl Write, regs: &[i32; NUM_REGS]) -> io::Result<()> {
    for reg in &regs[3..] {
        writeln!(out, "{reg:08X}")?;
    }
    Ok(())
}

pub fn dump_cycles(out: &mut impl Write, cycles: u32) -> io::Result<()> {
    writeln!(out, "{cycles}")
}

// Everything up to and including the last nonzero word; nothing if the
// whole image is zero.
fn dump_truncated(out: &mut impl Write, words: &[i32]) -> io::Result<()> {
    let Some(last) = words.iter().rposition(|&word| word != 0) else {
        return Ok(());
    };
    for word in &words[..=last] {
        writeln!(out, "{word:08X}")?;
    }
    Ok(())
}

pub fn dump_disk(out: &mut impl Write, sectors: &[i32]) -> io::Result<()> {
    dump_truncated(out, sectors)
}

pub fn dump_monitor_text(out: &mut impl Write, frame: &[u8]) -> io::Result<()> {
    let Some(last) = frame.iter().rposition(|&px| px != 0) else {
        return Ok(());
    };
    for px in &frame[..=last] {
        writeln!(out, "{px:02X}")?;
    }
    Ok(())
}

// Fixed 65536 bytes, row-major, never truncated.
pub fn dump_monitor_binary(out: &mut impl Write, frame: &[u8]) -> io::Result<()> {
    out.write_all(frame)
}
