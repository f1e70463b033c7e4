//! Interaction tests: injection, obstacles, clearing, mode cycling and reset.
//!
//! Tests cover:
//! - Gaussian injection into the velocity channel
//! - BLOCK marks cells permanently; blocked cells refuse later impulses
//! - CLEAR zeroes a local area without blocking it
//! - Toggle edges cycle WAVES -> BLOCK -> CLEAR -> WAVES
//! - Global reset restores the initial state

use wavefield::{InteractionMode, Pointer, PointerButton, StepInput, WaveParams, WaveSimulation};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn quiet_sim(size: usize) -> WaveSimulation {
    let params = WaveParams {
        seed_density: 0.0,
        ..WaveParams::with_size(size, size)
    };
    WaveSimulation::new(params).unwrap()
}

/// Press the toggle for one step, then release it for one step.
fn toggle(sim: &mut WaveSimulation) {
    sim.step(&StepInput::toggle());
    sim.step(&StepInput::idle());
}

fn press(sim: &mut WaveSimulation, x: f32, y: f32) {
    sim.step(&StepInput::pointer(Pointer::pressed(x, y)));
}

// =============================================================================
// INJECTION
// =============================================================================

#[test]
fn injection_sets_velocity_to_peak_at_centre() {
    let mut sim = quiet_sim(64);
    press(&mut sim, 10.0, 10.0);

    let cell = sim.cell(10, 10);
    assert!(
        (cell.velocity - 40.0 * (-0.001f32 * 0.0).exp()).abs() < 1e-4,
        "velocity {}",
        cell.velocity
    );
}

#[test]
fn injection_follows_gaussian_falloff() {
    let mut sim = quiet_sim(64);
    press(&mut sim, 30.0, 30.0);

    let expected = 40.0 * (-0.001f32 * 36.0).exp();
    assert!((sim.cell(36, 30).velocity - expected).abs() < 1e-3);
    // Outside the radius nothing was injected
    assert_eq!(sim.cell(45, 30).velocity, 0.0);
}

#[test]
fn injected_cell_is_not_restepped_in_same_step() {
    let mut sim = quiet_sim(64);
    sim.seed_spike(30, 30, 3.0);
    press(&mut sim, 30.0, 30.0);

    // Amplitude carried through unchanged; the Laplacian did not touch it
    assert_eq!(sim.cell(30, 30).amplitude, 3.0);
}

#[test]
fn injected_velocity_drives_next_step() {
    let mut sim = quiet_sim(64);
    press(&mut sim, 30.0, 30.0);
    sim.step(&StepInput::idle());
    assert!(sim.cell(30, 30).amplitude > 0.0);
}

#[test]
fn held_pointer_raises_surface_while_pressed() {
    let mut sim = quiet_sim(64);
    let input = StepInput::pointer(Pointer::pressed(32.0, 32.0));

    sim.step(&input);
    let mut last = sim.max_abs_amplitude();
    for _ in 0..5 {
        sim.step(&input);
        let max = sim.max_abs_amplitude();
        assert!(max > last, "surface stalled under held pointer: {} -> {}", last, max);
        last = max;
    }

    // Centre has moved by the injected velocity of every held step but the last
    let centre = sim.cell(32, 32);
    assert!((centre.amplitude - 5.0 * 40.0).abs() < 1e-3, "centre {}", centre.amplitude);
    assert!((centre.velocity - 40.0).abs() < 1e-4);
}

#[test]
fn secondary_button_pushes_down() {
    let mut sim = quiet_sim(64);
    let pointer = Pointer::pressed(30.0, 30.0).with_button(PointerButton::Secondary);
    sim.step(&StepInput::pointer(pointer));
    assert!((sim.cell(30, 30).velocity + 40.0).abs() < 1e-4);
    sim.step(&StepInput::idle());
    assert!(sim.cell(30, 30).amplitude < 0.0);
}

#[test]
fn widen_reaches_further() {
    let mut narrow = quiet_sim(64);
    let mut wide = quiet_sim(64);
    narrow.step(&StepInput::pointer(Pointer::pressed(30.0, 30.0)));
    wide.step(&StepInput::pointer(Pointer::pressed(30.0, 30.0).widened()));
    assert_eq!(narrow.cell(45, 30).velocity, 0.0);
    assert!(wide.cell(45, 30).velocity > 0.0);
}

// =============================================================================
// MODE CYCLING
// =============================================================================

#[test]
fn three_toggles_return_to_waves() {
    let mut sim = quiet_sim(16);
    assert_eq!(sim.mode(), InteractionMode::Waves);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Block);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Clear);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Waves);
}

#[test]
fn held_toggle_advances_once() {
    let mut sim = quiet_sim(16);
    for _ in 0..5 {
        sim.step(&StepInput::toggle());
    }
    assert_eq!(sim.mode(), InteractionMode::Block);
}

// =============================================================================
// BLOCKING
// =============================================================================

#[test]
fn blocked_cell_refuses_new_impulses() {
    let mut sim = quiet_sim(64);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Block);

    press(&mut sim, 20.0, 20.0);
    assert!(sim.cell(20, 20).blocked);

    toggle(&mut sim);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Waves);

    press(&mut sim, 20.0, 20.0);
    let cell = sim.cell(20, 20);
    assert!(cell.blocked);
    assert_eq!(cell.amplitude, 0.0);
    assert_eq!(cell.velocity, 0.0);

    for _ in 0..20 {
        sim.step(&StepInput::idle());
        assert_eq!(sim.cell(20, 20).amplitude, 0.0);
    }
}

#[test]
fn clear_mode_does_not_unblock() {
    let mut sim = quiet_sim(64);
    toggle(&mut sim);
    press(&mut sim, 20.0, 20.0);
    let blocked = sim.blocked_count();
    assert!(blocked > 0);

    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Clear);
    press(&mut sim, 20.0, 20.0);
    assert_eq!(sim.blocked_count(), blocked);
}

#[test]
fn obstacle_shadows_waves() {
    let mut sim = quiet_sim(64);

    // Wall across the lattice at y = 32
    toggle(&mut sim);
    for x in (0..64).step_by(4) {
        press(&mut sim, x as f32, 32.0);
    }
    assert!((1..63).all(|x| sim.cell(x, 32).blocked));

    toggle(&mut sim);
    toggle(&mut sim);
    press(&mut sim, 32.0, 10.0);
    for _ in 0..60 {
        sim.step(&StepInput::idle());
    }

    // Interior cells within the pointer radius of the wall line were blocked.
    let far_side = (1..63)
        .flat_map(|x| (44..63).map(move |y| (x, y)))
        .fold(0.0f32, |acc, (x, y)| acc.max(sim.cell(x, y).amplitude.abs()));
    assert_eq!(far_side, 0.0);
}

// =============================================================================
// CLEARING
// =============================================================================

#[test]
fn clear_zeroes_local_area_only() {
    let mut sim = quiet_sim(64);
    sim.seed_spike(20, 20, 4.0);
    sim.seed_spike(50, 50, 4.0);

    toggle(&mut sim);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Clear);

    press(&mut sim, 20.0, 20.0);
    for dy in -3i32..=3 {
        for dx in -3i32..=3 {
            let cell = sim.cell((20 + dx) as usize, (20 + dy) as usize);
            assert_eq!(cell.amplitude, 0.0);
            assert!(!cell.blocked);
        }
    }
    assert!(sim.max_abs_amplitude() > 0.0, "far spike untouched");
}

// =============================================================================
// RESET
// =============================================================================

#[test]
fn reset_restores_initial_state() {
    let mut sim = quiet_sim(64);
    toggle(&mut sim);
    press(&mut sim, 20.0, 20.0);
    toggle(&mut sim);
    assert_eq!(sim.mode(), InteractionMode::Clear);

    sim.step(&StepInput::reset());
    assert_eq!(sim.mode(), InteractionMode::Waves);
    assert_eq!(sim.blocked_count(), 0);
    assert_eq!(sim.max_abs_amplitude(), 0.0);
    assert!(sim.store().previous().cells().iter().all(|c| c.amplitude == 0.0));
}

#[test]
fn reset_overrides_pointer_and_toggle() {
    let mut sim = quiet_sim(64);
    let input = StepInput {
        pointer: Pointer::pressed(30.0, 30.0),
        toggle: true,
        reset: true,
    };
    sim.step(&input);
    assert_eq!(sim.mode(), InteractionMode::Waves);
    assert_eq!(sim.max_abs_amplitude(), 0.0);

    // Toggle still held from the reset step: no new edge
    sim.step(&StepInput::toggle());
    assert_eq!(sim.mode(), InteractionMode::Waves);
}
