//! Interaction mode state machine.
//!
//! One global mode per simulation, advanced at most once per step on a rising
//! edge of the toggle input: `Waves -> Block -> Clear -> Waves`.

use serde::{Deserialize, Serialize};

/// What an active pointer does to the cells under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Inject Gaussian impulses.
    #[default]
    Waves,
    /// Permanently mark cells as obstacles.
    Block,
    /// Zero amplitude without marking cells blocked.
    Clear,
}

impl InteractionMode {
    /// The mode one toggle later.
    pub fn next(self) -> Self {
        match self {
            InteractionMode::Waves => InteractionMode::Block,
            InteractionMode::Block => InteractionMode::Clear,
            InteractionMode::Clear => InteractionMode::Waves,
        }
    }
}

/// Rising-edge detector over a level-triggered toggle input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleLatch {
    last: bool,
}

impl ToggleLatch {
    /// Record `level`; true only when it went from released to held.
    pub fn rising_edge(&mut self, level: bool) -> bool {
        let edge = level && !self.last;
        self.last = level;
        edge
    }
}

/// Global mode plus the latch that drives it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    mode: InteractionMode,
    latch: ToggleLatch,
}

impl Interaction {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Sample the toggle input once for this step. Returns the new mode when
    /// a transition happened.
    pub fn observe(&mut self, toggle_held: bool) -> Option<InteractionMode> {
        if self.latch.rising_edge(toggle_held) {
            let from = self.mode;
            self.mode = from.next();
            log::debug!("interaction mode {:?} -> {:?}", from, self.mode);
            Some(self.mode)
        } else {
            None
        }
    }

    /// Back to `Waves`. The latch still records `toggle_held`, so a toggle
    /// held through a reset does not fire on the next step.
    pub fn reset(&mut self, toggle_held: bool) {
        self.mode = InteractionMode::Waves;
        self.latch.rising_edge(toggle_held);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_toggles_cycle_back() {
        let mut mode = InteractionMode::default();
        assert_eq!(mode, InteractionMode::Waves);
        mode = mode.next();
        assert_eq!(mode, InteractionMode::Block);
        mode = mode.next();
        assert_eq!(mode, InteractionMode::Clear);
        mode = mode.next();
        assert_eq!(mode, InteractionMode::Waves);
    }

    #[test]
    fn test_latch_fires_once_per_press() {
        let mut latch = ToggleLatch::default();
        assert!(!latch.rising_edge(false));
        assert!(latch.rising_edge(true));
        assert!(!latch.rising_edge(true));
        assert!(!latch.rising_edge(false));
        assert!(latch.rising_edge(true));
    }

    #[test]
    fn test_held_toggle_advances_once() {
        let mut interaction = Interaction::default();
        for _ in 0..10 {
            interaction.observe(true);
        }
        assert_eq!(interaction.mode(), InteractionMode::Block);
    }

    #[test]
    fn test_reset_ignores_held_toggle() {
        let mut interaction = Interaction::default();
        interaction.observe(false);
        interaction.reset(true);
        assert_eq!(interaction.observe(true), None);
        assert_eq!(interaction.mode(), InteractionMode::Waves);
    }
}
