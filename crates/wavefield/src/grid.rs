//! Double-buffered lattice storage.
//!
//! A [`GridStore`] always holds exactly two published generations: the
//! current one (time `t`) and the one before it (`t-1`). A third, unpublished
//! scratch buffer receives the next generation while the published pair stays
//! frozen; [`GridStore::advance`] then rotates the three buffers by swapping,
//! so nothing is allocated after construction and no reader can see a
//! half-written generation.

use serde::{Deserialize, Serialize};

/// One lattice element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Amplitude at this generation's time step.
    pub amplitude: f32,
    /// Amplitude one step earlier, as seen by the leapfrog update.
    pub previous: f32,
    /// Velocity channel (`amplitude - previous`, or the injected impulse).
    pub velocity: f32,
    /// Permanent obstacle flag.
    pub blocked: bool,
}

impl Cell {
    /// A cell at rest with the given amplitude.
    pub fn at_rest(amplitude: f32) -> Self {
        Self {
            amplitude,
            previous: amplitude,
            velocity: 0.0,
            blocked: false,
        }
    }

    /// Zero amplitude history, keeping the blocked flag.
    pub fn silenced(self) -> Self {
        Self {
            amplitude: 0.0,
            previous: 0.0,
            velocity: 0.0,
            blocked: self.blocked,
        }
    }
}

/// One complete snapshot of the lattice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl Generation {
    /// All cells at zero amplitude, unblocked.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell at (x, y); out-of-range coordinates read as a silent cell.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[self.idx(x, y)]
        } else {
            Cell::default()
        }
    }

    /// Amplitude at signed coordinates, clamped to the nearest edge.
    #[inline]
    pub fn amplitude_clamped(&self, x: i64, y: i64) -> f32 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.cells[cy * self.width + cx].amplitude
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.idx(x, y);
            self.cells[idx] = cell;
        }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }
}

/// Current / previous generation pair plus a scratch buffer for the next.
#[derive(Clone, Debug)]
pub struct GridStore {
    current: Generation,
    previous: Generation,
    scratch: Generation,
    generation: u64,
}

impl GridStore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            current: Generation::new(width, height),
            previous: Generation::new(width, height),
            scratch: Generation::new(width, height),
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.current.width
    }

    pub fn height(&self) -> usize {
        self.current.height
    }

    /// Number of generations committed since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &Generation {
        &self.current
    }

    pub fn previous(&self) -> &Generation {
        &self.previous
    }

    /// Read a cell of the current generation.
    pub fn read(&self, x: usize, y: usize) -> Cell {
        self.current.get(x, y)
    }

    /// Read a cell of the previous generation.
    pub fn read_previous(&self, x: usize, y: usize) -> Cell {
        self.previous.get(x, y)
    }

    /// Compute the next generation from the frozen (current, previous) pair
    /// and publish it.
    ///
    /// `compute` must write every cell of the scratch buffer. After it returns
    /// the scratch buffer becomes current, the old current becomes previous,
    /// and the retired generation is recycled as the next scratch buffer.
    pub fn advance<F>(&mut self, compute: F)
    where
        F: FnOnce(&Generation, &Generation, &mut Generation),
    {
        compute(&self.current, &self.previous, &mut self.scratch);
        self.commit();
    }

    fn commit(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.scratch);
        std::mem::swap(&mut self.current, &mut self.previous);
        self.generation += 1;
    }

    /// Edit the current generation in place.
    ///
    /// Before the first commit the previous generation mirrors the edit so
    /// seeded cells start at rest. Once generations have been published the
    /// previous one is left untouched.
    pub fn seed_with<F>(&mut self, mut edit: F)
    where
        F: FnMut(&mut Generation),
    {
        edit(&mut self.current);
        if self.generation == 0 {
            self.previous.clone_from(&self.current);
        }
    }

    /// Discard all history: every cell silent and unblocked.
    pub fn reset(&mut self) {
        self.current.fill(Cell::default());
        self.previous.fill(Cell::default());
        self.scratch.fill(Cell::default());
        self.generation = 0;
    }
}
