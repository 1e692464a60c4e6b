pub mod emulator;
pub mod emulator_state;
pub mod image;
pub mod interrupt;
pub mod io;
pub mod trace;

pub use emulator::{Emulator, RunState, SimError};
pub use emulator_state::{EmulatorState, SimFlags};
