pub const MEM_SIZE: usize = 4096; // Words of data memory, slots of instruction memory

pub const INSTR_CHARS: usize = 12; // Hex digits per instruction slot

pub const IOR_COUNT: usize = 23;

pub const SECTOR_WORDS: usize = 128;
pub const NUM_SECTORS: usize = 128;
pub const DISK_WORDS: usize = NUM_SECTORS * SECTOR_WORDS;
pub const DISK_DELAY_CYCLES: u32 = 1024;

pub const MONITOR_DIM: usize = 256;
pub const MONITOR_PIXELS: usize = MONITOR_DIM * MONITOR_DIM;

pub const PC_MASK: i32 = 0xFFF;
