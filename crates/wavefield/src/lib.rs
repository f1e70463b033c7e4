//! Interactive 2D Wave Field
//!
//! A fixed-resolution scalar wave simulation with:
//! - Explicit leapfrog integration over a 4-neighbour Laplacian
//! - Pointer-driven impulses, permanent obstacles and local clearing
//! - A three-state interaction mode (WAVES / BLOCK / CLEAR)
//! - A lit, refracted surface composited over a background image
//!
//! The crate handles simulation and compositing only. Hosts provide per-step
//! input and display the returned frame.
//!
//! # Example
//!
//! ```
//! use wavefield::{CheckerBackground, Pointer, StepInput, WaveParams, WaveSimulation};
//!
//! let mut sim = WaveSimulation::new(WaveParams::with_size(64, 64)).unwrap();
//!
//! // Drag through the middle of the pool
//! let input = StepInput::pointer(Pointer::pressed(32.0, 32.0));
//! sim.step(&input);
//!
//! // Let it ripple, then composite
//! for _ in 0..10 {
//!     sim.step(&StepInput::idle());
//! }
//! let frame = sim.render(&CheckerBackground::default());
//! assert_eq!(frame.pixels().len(), 64 * 64);
//! ```

pub mod constants;
pub mod error;
pub mod grid;
pub mod input;
pub mod interaction;
pub mod params;
pub mod policy;
pub mod smoothing;
pub mod stepper;
pub mod surface;

pub use error::WaveError;
pub use glam::{Vec2, Vec3};
pub use grid::{Cell, Generation, GridStore};
pub use input::{Pointer, PointerButton, StepInput};
pub use interaction::{Interaction, InteractionMode};
pub use params::{SurfaceParams, WaveParams};
pub use surface::{
    Background, CheckerBackground, Compositor, Frame, ImageBackground, Rgba, SolidBackground,
};

use policy::InjectionContext;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stepper::StepCoefficients;
use surface::SurfaceBuffers;

/// Wave field simulation plus its compositor.
pub struct WaveSimulation {
    /// Parameters, validated at construction.
    params: WaveParams,
    /// Double-buffered lattice
    store: GridStore,
    /// Global interaction mode and toggle latch
    interaction: Interaction,
    coeffs: StepCoefficients,
    compositor: Compositor,

    /// Surface planes and output frame (pre-allocated to avoid per-frame allocation)
    surface: SurfaceBuffers,
    frame: Frame,

    /// Steps taken, including reset steps
    step: u64,
}

impl WaveSimulation {
    /// Create a simulation, rejecting unstable or malformed parameters.
    pub fn new(params: WaveParams) -> Result<Self, WaveError> {
        if let Err(err) = params.validate() {
            log::error!("rejected wave parameters: {}", err);
            return Err(err);
        }

        let (width, height) = (params.width, params.height);
        let mut store = GridStore::new(width, height);
        seed_random(&mut store, &params);

        log::info!(
            "wave field {}x{}: speed {}, spacing {}, damping {}, peak {}",
            width,
            height,
            params.wave_speed,
            params.grid_spacing,
            params.damping,
            params.injection_peak
        );

        Ok(Self {
            coeffs: StepCoefficients {
                laplacian: params.laplacian_coefficient(),
                damping: params.damping,
            },
            compositor: Compositor::new(&params.surface),
            surface: SurfaceBuffers::new(width, height),
            frame: Frame::new(width, height),
            interaction: Interaction::default(),
            store,
            params,
            step: 0,
        })
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn width(&self) -> usize {
        self.store.width()
    }

    pub fn height(&self) -> usize {
        self.store.height()
    }

    /// Run exactly one step.
    ///
    /// The input is copied once and held fixed for the whole step. A reset
    /// overrides everything else: the field is silenced, every cell unblocked,
    /// and the mode returns to WAVES.
    pub fn step(&mut self, input: &StepInput) {
        let input = *input;
        self.step += 1;

        if input.reset {
            self.store.reset();
            self.interaction.reset(input.toggle);
            log::debug!("global reset at step {}", self.step);
            return;
        }

        self.interaction.observe(input.toggle);
        let ctx = InjectionContext::new(self.interaction.mode(), &input.pointer, &self.params);
        let coeffs = self.coeffs;
        self.store.advance(|current, _previous, next| {
            stepper::step_generation(current, next, &ctx, coeffs);
        });
    }

    /// Composite the current generation over `background`.
    pub fn render<B>(&mut self, background: &B) -> &Frame
    where
        B: Background + ?Sized,
    {
        let (height, mask) = self.surface.prepare(self.store.current(), self.params.smoothing);
        self.compositor.render(height, mask, background, &mut self.frame);
        &self.frame
    }

    /// One full frame: step, then composite.
    pub fn tick<B>(&mut self, input: &StepInput, background: &B) -> &Frame
    where
        B: Background + ?Sized,
    {
        self.step(input);
        self.render(background)
    }

    /// Place an at-rest spike at an interior cell of the current generation.
    /// Edge cells are ignored, and generations already published stay as
    /// they were.
    pub fn seed_spike(&mut self, x: usize, y: usize, amplitude: f32) {
        self.store.seed_with(|gen| {
            if x < gen.width && y < gen.height && !gen.is_edge(x, y) {
                let blocked = gen.get(x, y).blocked;
                gen.set(x, y, Cell { blocked, ..Cell::at_rest(amplitude) });
            }
        });
    }

    // ========== Inspection ==========

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    /// Cell of the current generation.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.store.read(x, y)
    }

    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Most recently rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn max_abs_amplitude(&self) -> f32 {
        self.store
            .current()
            .cells()
            .iter()
            .fold(0.0f32, |acc, c| acc.max(c.amplitude.abs()))
    }

    /// Discrete leapfrog energy; shrinks by exactly `damping` per step while
    /// nothing is injected.
    pub fn energy(&self) -> f64 {
        stepper::discrete_energy(self.store.current(), self.coeffs)
    }

    pub fn blocked_count(&self) -> usize {
        self.store
            .current()
            .cells()
            .iter()
            .filter(|c| c.blocked)
            .count()
    }
}

/// Spike a random sprinkling of interior cells so the field starts moving.
fn seed_random(store: &mut GridStore, params: &WaveParams) {
    if params.seed_density <= 0.0 || params.seed_amplitude <= 0.0 {
        return;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let low = 0.5 * params.seed_amplitude;
    let high = params.seed_amplitude;
    store.seed_with(|gen| {
        for y in 1..gen.height - 1 {
            for x in 1..gen.width - 1 {
                if rng.gen::<f32>() < params.seed_density {
                    gen.set(x, y, Cell::at_rest(rng.gen_range(low..=high)));
                }
            }
        }
    });
}
