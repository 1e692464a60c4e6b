
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use emu_lib::Emulator;
use emu_lib::image::{self, ImageError};
use emu_lib::trace::Tracer;

/// SIMP processor simulator
#[derive(Parser)]
struct Args {
    /// Instruction memory image
    imemin: PathBuf,
    /// Data memory image
    dmemin: PathBuf,
    /// Disk image
    diskin: PathBuf,
    /// External interrupt schedule
    irq2in: PathBuf,
    /// Data memory dump
    dmemout: PathBuf,
    /// Register dump (r3-r15)
    regout: PathBuf,
    /// Instruction trace
    trace: PathBuf,
    /// Hardware register trace
    hwregtrace: PathBuf,
    /// Cycle count
    cycles: PathBuf,
    /// LED log
    leds: PathBuf,
    /// 7-segment display log
    display7seg: PathBuf,
    /// Disk dump
    diskout: PathBuf,
    /// Monitor text dump
    monitor: PathBuf,
    /// Monitor binary dump
    monitoryuv: PathBuf,
}

fn create(path: &Path) -> Result<BufWriter<File>, ImageError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ImageError::Io {
            path: path.to_owned(),
            source,
        })
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let imem = image::load_instruction_image(&args.imemin)?;
    let dmem = image::load_data_image(&args.dmemin)?;
    let disk = image::load_disk_image(&args.diskin)?;
    let irq2 = image::load_irq2_schedule(&args.irq2in)?;

    // Every artifact file is opened before the first cycle runs; an
    // unopenable file is a startup error, not a mid-run surprise.
    let mut dmemout = create(&args.dmemout)?;
    let mut regout = create(&args.regout)?;
    let trace = create(&args.trace)?;
    let hwregtrace = create(&args.hwregtrace)?;
    let mut cycles = create(&args.cycles)?;
    let leds = create(&args.leds)?;
    let display7seg = create(&args.display7seg)?;
    let mut diskout = create(&args.diskout)?;
    let mut monitor = create(&args.monitor)?;
    let mut monitoryuv = create(&args.monitoryuv)?;

    let tracer = Tracer::new(
        Box::new(trace),
        Box::new(hwregtrace),
        Box::new(leds),
        Box::new(display7seg),
    );
    let mut emu = Emulator::new(tracer);
    emu.load_instruction_image(&imem);
    emu.load_data_image(&dmem);
    emu.load_disk_image(&disk);
    emu.set_irq2_schedule(irq2);

    // A hard fault stops the run but the end state is still dumped; it is
    // usually the most useful thing to look at.
    let result = emu.run();
    emu.flush_trace()?;

    image::dump_data_memory(&mut dmemout, emu.state().dmem())?;
    image::dump_registers(&mut regout, emu.state().regs())?;
    image::dump_cycles(&mut cycles, emu.cycles())?;
    image::dump_disk(&mut diskout, emu.disk().contents())?;
    image::dump_monitor_text(&mut monitor, emu.monitor().frame())?;
    image::dump_monitor_binary(&mut monitoryuv, emu.monitor().frame())?;

    for out in [
        &mut dmemout,
        &mut regout,
        &mut cycles,
        &mut diskout,
        &mut monitor,
        &mut monitoryuv,
    ] {
        out.flush()?;
    }

    result?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("sim_cli: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
