use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use emul8_core::{keymap, Chip8, FrameBuffer, Quirks, PIXEL_ON};

use crate::OnError;

pub struct Options {
    pub quirks: Quirks,
    pub cycle_time: Duration,
    pub cycles: Option<u64>,
    pub seed: Option<u64>,
    pub on_error: OnError,
    pub hold: String,
    pub dump: bool,
    pub print_frame: bool,
}

pub fn run(rom: &Path, options: &Options) -> Result<()> {
    let mut chip8 = Chip8::with_quirks(options.quirks);
    if let Some(seed) = options.seed {
        chip8 = chip8.with_rng(StdRng::seed_from_u64(seed));
    }

    // Load ROM
    let file = File::open(rom).wrap_err_with(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    match chip8.load_rom_from(&mut reader) {
        Ok(()) => info!("successfully loaded ROM {}", rom.display()),
        Err(e) => warn!(
            "encountered error {} while attempting to load ROM but continuing execution",
            e
        ),
    };
    if options.dump {
        dump_program(&chip8);
    }

    let keypad = held_keys(&options.hold)?;

    // Set initial timing
    let mut last_cycle: Instant = Instant::now();
    let mut executed: u64 = 0;

    info!("running...");
    while options.cycles.map_or(true, |cycles| executed < cycles) {
        // Handle input
        chip8.set_keypad(keypad);

        // Update state
        if let Err(e) = chip8.cycle() {
            match options.on_error {
                OnError::Halt => {
                    finish(&chip8, options);
                    return Err(e).wrap_err(format!("halted after {} cycles", executed));
                }
                OnError::Skip => warn!("skipping: {}", e),
            }
        }
        executed += 1;

        if chip8.get_frame().is_some() {
            debug!("frame updated at cycle {}", executed);
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if options.cycle_time > elapsed_cycle_time {
            std::thread::sleep(options.cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("stopped after {} cycles", executed);
    finish(&chip8, options);
    Ok(())
}

fn finish(chip8: &Chip8, options: &Options) {
    if options.print_frame {
        print!("{}", render_frame(chip8.frame_buffer()));
    }
}

/// Translates the keyboard keys to hold into keypad flags
fn held_keys(hold: &str) -> Result<[bool; 16]> {
    let mut keypad = [false; 16];
    for key in hold.chars() {
        let hex = keymap(key).ok_or_else(|| eyre!("{:?} is not mapped to the keypad", key))?;
        keypad[usize::from(hex)] = true;
    }
    Ok(keypad)
}

/// Logs the loaded program as hex, 8 bytes to a line
fn dump_program(chip8: &Chip8) {
    info!("program code:");
    for line in program_lines(chip8.rom()) {
        info!("\t{}", line);
    }
}

fn program_lines(rom: &[u8]) -> Vec<String> {
    rom.chunks(8)
        .map(|line| {
            let bytes: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
            bytes.join(" ")
        })
        .collect()
}

/// Formats the frame with one character per pixel
fn render_frame(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            let mut line: String = row
                .iter()
                .map(|&pixel| if pixel == PIXEL_ON { '#' } else { '.' })
                .collect();
            line.push('\n');
            line
        })
        .collect()
}
