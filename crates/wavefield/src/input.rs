//! Per-step input snapshot supplied by the host application.

use glam::Vec2;

/// Which pointer button is down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Crest impulses in WAVES mode.
    #[default]
    Primary,
    /// Trough impulses in WAVES mode.
    Secondary,
}

impl PointerButton {
    /// Sign applied to injected impulses.
    pub fn impulse_sign(self) -> f32 {
        match self {
            PointerButton::Primary => 1.0,
            PointerButton::Secondary => -1.0,
        }
    }
}

/// Pointer state in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pointer {
    pub position: Vec2,
    pub active: bool,
    pub button: PointerButton,
    /// Enlarge the pointer radius.
    pub widen: bool,
}

impl Pointer {
    /// An active primary-button pointer at (x, y).
    pub fn pressed(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            active: true,
            ..Self::default()
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn widened(mut self) -> Self {
        self.widen = true;
        self
    }
}

/// Everything the host feeds into one step. Sampled once and held fixed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StepInput {
    pub pointer: Pointer,
    /// Level of the mode toggle input; a rising edge advances the mode.
    pub toggle: bool,
    /// Global reset trigger.
    pub reset: bool,
}

impl StepInput {
    /// No pointer, no toggle, no reset.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn pointer(pointer: Pointer) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn toggle() -> Self {
        Self {
            toggle: true,
            ..Self::default()
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }
}
