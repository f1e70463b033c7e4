//! Default tunables for the wave field and its surface compositor.
//!
//! ## Two observed configurations
//!
//! The same algorithm has been run with two parameter sets:
//! - `INJECTION_PEAK` / `DAMPING` (40, 0.995): strong, quickly settling ripples
//! - `GENTLE_INJECTION_PEAK` / `GENTLE_DAMPING` (10, 0.997): softer, longer-lived ripples
//!
//! Neither is canonical; both are exposed through [`crate::WaveParams`].

// =============================================================================
// PROPAGATION
// =============================================================================

/// Wave speed in cells per step.
pub const WAVE_SPEED: f32 = 0.5;

/// Lattice spacing. Courant number is `WAVE_SPEED / GRID_SPACING`.
pub const GRID_SPACING: f32 = 1.0;

/// Stability bound on the Courant number for the 5-point leapfrog scheme.
pub const COURANT_LIMIT: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Per-step amplitude damping.
pub const DAMPING: f32 = 0.995;

/// Damping of the gentle preset.
pub const GENTLE_DAMPING: f32 = 0.997;

// =============================================================================
// INJECTION
// =============================================================================

/// Gaussian impulse peak injected into the velocity channel.
pub const INJECTION_PEAK: f32 = 40.0;

/// Impulse peak of the gentle preset.
pub const GENTLE_INJECTION_PEAK: f32 = 10.0;

/// Gaussian falloff coefficient: `peak * exp(-IMPULSE_FALLOFF * dist^2)`.
pub const IMPULSE_FALLOFF: f32 = 0.001;

/// Pointer radius in cells.
pub const POINTER_RADIUS: f32 = 10.0;

/// Pointer radius while the widen input is held.
pub const WIDE_POINTER_RADIUS: f32 = 20.0;

// =============================================================================
// INITIAL SEEDING
// =============================================================================

/// Fraction of interior cells that start with a random spike.
pub const SEED_DENSITY: f32 = 0.0005;

/// Upper bound on the magnitude of a random starting spike.
pub const SEED_AMPLITUDE: f32 = 2.0;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 0x5EED_F1E1D;

// =============================================================================
// SURFACE
// =============================================================================

/// Virtual camera, in UV space with +Z towards the viewer.
pub const CAMERA_POSITION: [f32; 3] = [0.5, 0.5, 1.5];

/// Direction towards the light (normalized at use).
pub const LIGHT_DIRECTION: [f32; 3] = [-0.4, 0.6, 1.0];

/// Specular exponent.
pub const SHININESS: f32 = 16.0;

/// Ambient light term.
pub const AMBIENT: f32 = 0.2;

/// Ratio of indices of refraction (air over water).
pub const IOR_RATIO: f32 = 1.0 / 1.35;

/// Scale from refracted ray and amplitude to pixel offset.
pub const REFRACTION_GAIN: f32 = 10.0;

/// Lower bound on a vector length before normalizing.
pub const MIN_NORMAL_LENGTH: f32 = 1e-6;
