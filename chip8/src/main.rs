use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use emul8_core::{LoadStoreQuirk, Quirks, ShiftQuirk};

mod run;

/// Source register for the shift instructions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftMode {
    /// Vx = Vy shifted
    Vy,
    /// Vx shifted in place
    Vx,
}

/// What the register block transfers do to the index register
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LoadStoreMode {
    /// I += x + 1
    Advance,
    /// I is unchanged
    Keep,
}

/// What to do when the program hits an error
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop and report the error
    Halt,
    /// Log the error and carry on with the next instruction
    Skip,
}

#[derive(Parser, Debug)]
#[command(name = "emul8", about = "Runs a Chip-8 ROM headlessly.")]
struct Args {
    /// ROM image to load
    rom: PathBuf,

    /// Milliseconds between cycles
    #[arg(long, default_value_t = 2)]
    delay: u64,

    /// Number of cycles to run before exiting (runs forever if omitted)
    #[arg(long)]
    cycles: Option<u64>,

    /// Source register of SHR/SHL
    #[arg(long, value_enum, default_value_t = ShiftMode::Vy)]
    shift: ShiftMode,

    /// Index register behavior of register store/load
    #[arg(long, value_enum, default_value_t = LoadStoreMode::Advance)]
    load_store: LoadStoreMode,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// What to do when the program hits an error
    #[arg(long, value_enum, default_value_t = OnError::Halt)]
    on_error: OnError,

    /// Keyboard keys (1234/QWER/ASDF/ZXCV) held down for the whole run
    #[arg(long, value_name = "KEYS", default_value = "")]
    hold: String,

    /// Log the program bytes once they're loaded
    #[arg(long)]
    dump: bool,

    /// Print the final frame when the run ends
    #[arg(long)]
    print_frame: bool,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn quirks(&self) -> Quirks {
        Quirks {
            shift: match self.shift {
                ShiftMode::Vy => ShiftQuirk::ShiftVy,
                ShiftMode::Vx => ShiftQuirk::ShiftVx,
            },
            load_store: match self.load_store {
                LoadStoreMode::Advance => LoadStoreQuirk::AdvanceIndex,
                LoadStoreMode::Keep => LoadStoreQuirk::KeepIndex,
            },
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level)
        .env()
        .init()?;

    let options = run::Options {
        quirks: args.quirks(),
        cycle_time: std::time::Duration::from_millis(args.delay),
        cycles: args.cycles,
        seed: args.seed,
        on_error: args.on_error,
        hold: args.hold.clone(),
        dump: args.dump,
        print_frame: args.print_frame,
    };
    run::run(&args.rom, &options)
}
