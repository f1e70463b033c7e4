//! Per-cell boundary and injection decisions.
//!
//! Evaluated before the PDE update in strict priority order; the first
//! matching rule wins:
//! 1. lattice edge
//! 2. already blocked
//! 3. CLEAR under the pointer
//! 4. BLOCK under the pointer
//! 5. WAVES under the pointer
//! 6. free cell, handed to the stepper

use crate::grid::Cell;
use crate::input::Pointer;
use crate::interaction::InteractionMode;
use crate::params::WaveParams;
use glam::Vec2;

/// Outcome of the policy for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellAction {
    Boundary,
    Blocked,
    Clear,
    Block,
    /// Velocity impulse at the given strength.
    Inject(f32),
    Free,
}

/// The per-step state every cell decision shares.
#[derive(Clone, Copy, Debug)]
pub struct InjectionContext {
    pub mode: InteractionMode,
    /// Pointer centre, present only while the pointer is active.
    pub center: Option<Vec2>,
    pub radius: f32,
    /// Signed impulse peak.
    pub peak: f32,
    pub falloff: f32,
}

impl InjectionContext {
    pub fn new(mode: InteractionMode, pointer: &Pointer, params: &WaveParams) -> Self {
        Self {
            mode,
            center: pointer.active.then_some(pointer.position),
            radius: params.radius(pointer.widen),
            peak: params.injection_peak * pointer.button.impulse_sign(),
            falloff: params.impulse_falloff,
        }
    }

    /// Context with no active pointer.
    pub fn inactive(params: &WaveParams) -> Self {
        Self::new(InteractionMode::Waves, &Pointer::default(), params)
    }

    /// Squared distance to the pointer when the cell lies inside its radius.
    #[inline]
    fn reach(&self, x: usize, y: usize) -> Option<f32> {
        let center = self.center?;
        let dist_sq = Vec2::new(x as f32, y as f32).distance_squared(center);
        (dist_sq <= self.radius * self.radius).then_some(dist_sq)
    }

    /// Gaussian impulse at squared distance `dist_sq`.
    #[inline]
    pub fn impulse(&self, dist_sq: f32) -> f32 {
        self.peak * (-self.falloff * dist_sq).exp()
    }
}

/// Decide what happens to cell (x, y) this step.
pub fn resolve(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    cell: &Cell,
    ctx: &InjectionContext,
) -> CellAction {
    if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
        return CellAction::Boundary;
    }
    if cell.blocked {
        return CellAction::Blocked;
    }
    match (ctx.mode, ctx.reach(x, y)) {
        (InteractionMode::Clear, Some(_)) => CellAction::Clear,
        (InteractionMode::Block, Some(_)) => CellAction::Block,
        (InteractionMode::Waves, Some(dist_sq)) => CellAction::Inject(ctx.impulse(dist_sq)),
        (_, None) => CellAction::Free,
    }
}

/// Apply a non-free action to the current cell. `Free` is the stepper's job
/// and returns `None`.
pub fn apply(action: CellAction, cell: Cell) -> Option<Cell> {
    match action {
        CellAction::Boundary => Some(cell.silenced()),
        CellAction::Blocked | CellAction::Block => Some(Cell {
            blocked: true,
            ..Cell::default()
        }),
        CellAction::Clear => Some(Cell::default()),
        // The cell moves by the velocity it already carried, then the impulse
        // becomes its new velocity. A held pointer keeps pushing the surface.
        CellAction::Inject(impulse) => {
            let amplitude = cell.amplitude + cell.velocity;
            Some(Cell {
                amplitude,
                previous: amplitude - impulse,
                velocity: impulse,
                blocked: false,
            })
        }
        CellAction::Free => None,
    }
}
