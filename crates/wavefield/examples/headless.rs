//! Headless run: scripted pointer strokes, an obstacle, a clear, and a reset.
//!
//! Run with: RUST_LOG=debug cargo run --example headless -p wavefield

use wavefield::{CheckerBackground, Pointer, StepInput, WaveParams, WaveSimulation};

const SIZE: usize = 128;
const STEPS: u64 = 600;
const REPORT_EVERY: u64 = 50;

/// Host input for a given step: a circular stroke in WAVES mode, a wall in
/// BLOCK mode, a wipe in CLEAR mode, then a reset near the end.
fn script(step: u64) -> StepInput {
    let t = step as f32 * 0.05;
    let centre = SIZE as f32 * 0.5;

    let toggle = matches!(step, 150 | 220 | 300);
    let reset = step == 520;

    let pointer = match step {
        0..=149 => Pointer::pressed(centre + t.cos() * 30.0, centre + t.sin() * 30.0),
        151..=219 => Pointer::pressed(20.0 + (step - 151) as f32 * 1.2, centre + 20.0),
        221..=299 if step % 10 == 0 => Pointer::pressed(centre, centre).widened(),
        _ => Pointer::default(),
    };

    StepInput {
        pointer,
        toggle,
        reset,
    }
}

fn main() {
    env_logger::init();

    let params = WaveParams::with_size(SIZE, SIZE);
    let mut sim = match WaveSimulation::new(params) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("cannot start: {}", err);
            std::process::exit(1);
        }
    };
    let background = CheckerBackground::default();

    for step in 0..STEPS {
        let frame = sim.tick(&script(step), &background);
        let mean_luma = frame
            .pixels()
            .iter()
            .map(|p| 0.2126 * p.r + 0.7152 * p.g + 0.0722 * p.b)
            .sum::<f32>()
            / frame.pixels().len() as f32;

        if step % REPORT_EVERY == 0 {
            println!(
                "step {:4} | mode {:?} | max |a| {:8.4} | energy {:12.3} | blocked {:5} | luma {:.3}",
                sim.step_count(),
                sim.mode(),
                sim.max_abs_amplitude(),
                sim.energy(),
                sim.blocked_count(),
                mean_luma
            );
        }
    }
}
