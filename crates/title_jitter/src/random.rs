//! Uniform random sources.

use rand::{Rng, RngCore};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapts any `rand` generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
