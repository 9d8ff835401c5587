use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info, warn};

use octet_core::{Chip8, FrameBuffer, RunState, CLOCK_SPEED};
use octet_display::Display;

pub struct Settings {
    pub rom: PathBuf,
    pub cycles: u64,
    pub seed: Option<u64>,
    pub keys: Vec<u8>,
    /// Whether the default clock speed should be ignored
    pub fast_forward: bool,
}

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let mut chip8 = match settings.seed {
        Some(seed) => Chip8::seeded(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let rom = std::fs::read(&settings.rom)
        .with_context(|| format!("unable to read ROM {}", settings.rom.display()))?;
    chip8.load_rom(&rom)?;
    info!("loaded {} byte ROM from {}", rom.len(), settings.rom.display());

    let mut display = Display::new(io::stdout());
    let (frame, outcome) = execute(&mut chip8, &settings);
    if let Some(frame) = frame {
        display.render(&frame)?;
    }
    outcome
}

/// Runs the cycle budget, returning the last frame drawn and how the run ended
fn execute(chip8: &mut Chip8, settings: &Settings) -> (Option<FrameBuffer>, anyhow::Result<()>) {
    let mut keys = settings.keys.iter().copied();
    let mut last_frame = None;

    // Set initial timing
    let cycle_time = Duration::from_nanos(CLOCK_SPEED);
    let mut last_cycle = Instant::now();

    for cycle in 0..settings.cycles {
        match chip8.advance_cpu() {
            Ok(RunState::Running) => {}
            Ok(RunState::AwaitingKey { register }) => match keys.next() {
                Some(key) => {
                    let pressed = chip8.key_press(key).and_then(|_| chip8.key_release(key));
                    if let Err(e) = pressed {
                        return (last_frame, Err(e.into()));
                    }
                }
                None => {
                    warn!(
                        "V{:X} is waiting for a key and none are left; halting after {} cycles",
                        register, cycle
                    );
                    break;
                }
            },
            Err(e) => {
                error!(
                    "halting after {} cycles at {:#05X}: {}",
                    cycle,
                    chip8.interpreter().pc(),
                    e
                );
                return (last_frame, Err(e.into()));
            }
        }
        chip8.advance_timers();

        // If the draw flag is set, keep the frame for the final render
        if let Some(frame) = chip8.get_frame() {
            last_frame = Some(frame);
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !settings.fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    (last_frame, Ok(()))
}
