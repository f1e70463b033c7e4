//! Explicit leapfrog integration of the 2D scalar wave equation.
//!
//! For every free cell:
//! ```text
//! L    = a(x+1,y) + a(x-1,y) + a(x,y+1) + a(x,y-1) - 4 a(x,y)
//! next = damping * ((c/h)^2 * L - a_prev(x,y) + 2 a(x,y))
//! ```
//! Each cell of the next generation is a pure function of the frozen current
//! generation, so rows are evaluated in parallel with rayon and the result is
//! identical to a serial sweep.

use crate::grid::{Cell, Generation};
use crate::policy::{self, InjectionContext};
use rayon::prelude::*;

/// Leapfrog coefficients, fixed for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepCoefficients {
    /// `(c / h)^2`
    pub laplacian: f32,
    pub damping: f32,
}

/// 4-neighbour Laplacian of the amplitude channel.
///
/// Only defined for interior cells; the policy pins every edge cell before
/// the stepper would reach for a neighbour outside the lattice.
#[inline]
pub(crate) fn laplacian(gen: &Generation, x: usize, y: usize) -> f32 {
    debug_assert!(!gen.is_edge(x, y), "laplacian at edge cell ({}, {})", x, y);
    let cells = gen.cells();
    let idx = gen.idx(x, y);
    let w = gen.width;
    cells[idx + 1].amplitude
        + cells[idx - 1].amplitude
        + cells[idx + w].amplitude
        + cells[idx - w].amplitude
        - 4.0 * cells[idx].amplitude
}

/// Advance one free cell.
#[inline]
pub fn leapfrog(cell: Cell, laplacian: f32, coeffs: StepCoefficients) -> Cell {
    let next =
        (coeffs.laplacian * laplacian - cell.previous + 2.0 * cell.amplitude) * coeffs.damping;
    Cell {
        amplitude: next,
        previous: cell.amplitude,
        velocity: next - cell.amplitude,
        blocked: false,
    }
}

/// Evaluate boundary/injection policy and the PDE for every cell of `next`.
pub fn step_generation(
    current: &Generation,
    next: &mut Generation,
    ctx: &InjectionContext,
    coeffs: StepCoefficients,
) {
    let (width, height) = (current.width, current.height);
    next.cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let cell = current.get(x, y);
                let action = policy::resolve(x, y, width, height, &cell, ctx);
                *out = match policy::apply(action, cell) {
                    Some(resolved) => resolved,
                    None => leapfrog(cell, laplacian(current, x, y), coeffs),
                };
            }
        });
}

/// Discrete energy of the leapfrog scheme.
///
/// ```text
/// E = |a|^2 - d <a, (2 + k L) a_prev> + d |a_prev|^2
/// ```
/// Positive definite for a stable Courant number, and exactly `damping` times
/// smaller after every step without injection. The plain sum of squared
/// amplitudes is not monotone: it oscillates as energy moves between
/// displacement and velocity.
pub fn discrete_energy(gen: &Generation, coeffs: StepCoefficients) -> f64 {
    let (width, height) = (gen.width, gen.height);
    let cells = gen.cells();
    let k = coeffs.laplacian as f64;
    let d = coeffs.damping as f64;

    let prev_at = |x: usize, y: usize| -> f64 {
        if gen.is_edge(x, y) {
            0.0
        } else {
            cells[y * width + x].previous as f64
        }
    };

    (1..height.saturating_sub(1))
        .into_par_iter()
        .map(|y| {
            let mut row = 0.0f64;
            for x in 1..width - 1 {
                let cell = cells[y * width + x];
                let a = cell.amplitude as f64;
                let p = prev_at(x, y);
                let lap_prev = prev_at(x + 1, y)
                    + prev_at(x - 1, y)
                    + prev_at(x, y + 1)
                    + prev_at(x, y - 1)
                    - 4.0 * p;
                row += a * a - d * a * (2.0 * p + k * lap_prev) + d * p * p;
            }
            row
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WaveParams;

    fn coeffs() -> StepCoefficients {
        StepCoefficients {
            laplacian: 0.25,
            damping: 0.995,
        }
    }

    #[test]
    fn test_flat_field_stays_flat() {
        let current = Generation::new(8, 8);
        let mut next = Generation::new(8, 8);
        let ctx = InjectionContext::inactive(&WaveParams::with_size(8, 8));
        step_generation(&current, &mut next, &ctx, coeffs());
        assert!(next.cells().iter().all(|c| c.amplitude == 0.0));
    }

    #[test]
    fn test_laplacian_of_spike() {
        let mut gen = Generation::new(5, 5);
        gen.set(2, 2, Cell::at_rest(1.0));
        assert_eq!(laplacian(&gen, 2, 2), -4.0);
        assert_eq!(laplacian(&gen, 1, 2), 1.0);
    }

    #[test]
    fn test_spike_spreads_to_neighbours() {
        let mut current = Generation::new(5, 5);
        current.set(2, 2, Cell::at_rest(4.0));
        let mut next = Generation::new(5, 5);
        let ctx = InjectionContext::inactive(&WaveParams::with_size(5, 5));
        step_generation(&current, &mut next, &ctx, coeffs());

        // centre: 0.25 * -16 - 4 + 8 = 0
        assert!(next.get(2, 2).amplitude.abs() < 1e-6);
        // neighbour: 0.25 * 4 = 1, damped
        assert!((next.get(1, 2).amplitude - 0.995).abs() < 1e-6);
        assert_eq!(next.get(1, 2).previous, 0.0);
    }

    #[test]
    fn test_leapfrog_keeps_history() {
        let cell = Cell {
            amplitude: 1.0,
            previous: 0.5,
            velocity: 0.5,
            blocked: false,
        };
        let out = leapfrog(cell, 0.0, coeffs());
        assert!((out.amplitude - 1.5 * 0.995).abs() < 1e-6);
        assert_eq!(out.previous, 1.0);
        assert!((out.velocity - (out.amplitude - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_energy_positive_for_spike() {
        let mut gen = Generation::new(9, 9);
        gen.set(4, 4, Cell::at_rest(5.0));
        let energy = discrete_energy(&gen, coeffs());
        assert!(energy > 0.0);
    }

    #[test]
    fn test_energy_zero_for_silent_field() {
        let gen = Generation::new(9, 9);
        assert_eq!(discrete_energy(&gen, coeffs()), 0.0);
    }
}
