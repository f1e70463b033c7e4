//! Simulation and surface parameters.

use crate::constants::*;
use crate::error::WaveError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wave field simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Lattice width in cells.
    pub width: usize,
    /// Lattice height in cells.
    pub height: usize,
    /// Wave speed in cells per step.
    pub wave_speed: f32,
    /// Lattice spacing.
    pub grid_spacing: f32,
    /// Per-step damping, strictly inside (0, 1).
    pub damping: f32,
    /// Peak of the Gaussian impulse injected in WAVES mode.
    pub injection_peak: f32,
    /// Gaussian falloff coefficient of the injected impulse.
    pub impulse_falloff: f32,
    /// Pointer radius in cells.
    pub pointer_radius: f32,
    /// Pointer radius while widen is held.
    pub wide_pointer_radius: f32,
    /// Blur the field before surface reconstruction.
    pub smoothing: bool,
    /// RNG seed for the initial spikes.
    pub seed: u64,
    /// Fraction of interior cells spiked at start.
    pub seed_density: f32,
    /// Maximum magnitude of a starting spike.
    pub seed_amplitude: f32,
    /// Lighting and refraction.
    pub surface: SurfaceParams,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            wave_speed: WAVE_SPEED,
            grid_spacing: GRID_SPACING,
            damping: DAMPING,
            injection_peak: INJECTION_PEAK,
            impulse_falloff: IMPULSE_FALLOFF,
            pointer_radius: POINTER_RADIUS,
            wide_pointer_radius: WIDE_POINTER_RADIUS,
            smoothing: true,
            seed: DEFAULT_SEED,
            seed_density: SEED_DENSITY,
            seed_amplitude: SEED_AMPLITUDE,
            surface: SurfaceParams::default(),
        }
    }
}

impl WaveParams {
    /// Default parameters at the given lattice size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Softer preset: smaller impulses, slower decay.
    pub fn gentle(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            damping: GENTLE_DAMPING,
            injection_peak: GENTLE_INJECTION_PEAK,
            ..Self::default()
        }
    }

    /// Courant number `c / h`.
    pub fn courant_number(&self) -> f32 {
        self.wave_speed / self.grid_spacing
    }

    /// Laplacian coefficient `(c / h)^2` used by the stepper.
    pub fn laplacian_coefficient(&self) -> f32 {
        let courant = self.courant_number();
        courant * courant
    }

    /// Pointer radius for the current widen state.
    pub fn radius(&self, widen: bool) -> f32 {
        if widen {
            self.wide_pointer_radius
        } else {
            self.pointer_radius
        }
    }

    pub fn validate(&self) -> Result<(), WaveError> {
        if self.width < 3 || self.height < 3 {
            return Err(WaveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.wave_speed.is_finite() && self.wave_speed > 0.0) {
            return Err(invalid("wave_speed", "must be finite and positive"));
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(invalid("grid_spacing", "must be finite and positive"));
        }
        let courant = self.courant_number();
        if courant > COURANT_LIMIT {
            return Err(WaveError::CourantViolation {
                courant,
                limit: COURANT_LIMIT,
            });
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(invalid("damping", "must lie strictly between 0 and 1"));
        }
        if !self.injection_peak.is_finite() {
            return Err(invalid("injection_peak", "must be finite"));
        }
        if !(self.impulse_falloff.is_finite() && self.impulse_falloff >= 0.0) {
            return Err(invalid("impulse_falloff", "must be finite and non-negative"));
        }
        if !(self.pointer_radius > 0.0) {
            return Err(invalid("pointer_radius", "must be positive"));
        }
        if !(self.wide_pointer_radius >= self.pointer_radius) {
            return Err(invalid(
                "wide_pointer_radius",
                "must be at least pointer_radius",
            ));
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(invalid("seed_density", "must lie in [0, 1]"));
        }
        if !(self.seed_amplitude.is_finite() && self.seed_amplitude >= 0.0) {
            return Err(invalid("seed_amplitude", "must be finite and non-negative"));
        }
        self.surface.validate()
    }
}

/// Lighting and refraction parameters for the compositor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Virtual camera position in UV space (+Z towards the viewer).
    pub camera_position: [f32; 3],
    /// Direction towards the light.
    pub light_direction: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
    /// Ambient term added before clamping.
    pub ambient: f32,
    /// Ratio of indices of refraction.
    pub ior_ratio: f32,
    /// Refraction offset gain.
    pub refraction_gain: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            camera_position: CAMERA_POSITION,
            light_direction: LIGHT_DIRECTION,
            shininess: SHININESS,
            ambient: AMBIENT,
            ior_ratio: IOR_RATIO,
            refraction_gain: REFRACTION_GAIN,
        }
    }
}

impl SurfaceParams {
    pub fn camera(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    /// Normalized light direction; falls back to +Z for a zero vector.
    pub fn light(&self) -> Vec3 {
        Vec3::from_array(self.light_direction)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    pub fn validate(&self) -> Result<(), WaveError> {
        if !Vec3::from_array(self.camera_position).is_finite() {
            return Err(invalid("camera_position", "must be finite"));
        }
        if !Vec3::from_array(self.light_direction).is_finite() {
            return Err(invalid("light_direction", "must be finite"));
        }
        if !(self.shininess > 0.0) {
            return Err(invalid("shininess", "must be positive"));
        }
        if !(self.ambient >= 0.0) {
            return Err(invalid("ambient", "must be non-negative"));
        }
        if !(self.ior_ratio > 0.0) {
            return Err(invalid("ior_ratio", "must be positive"));
        }
        if !self.refraction_gain.is_finite() {
            return Err(invalid("refraction_gain", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &'static str) -> WaveError {
    WaveError::InvalidParameter { name, reason }
}
