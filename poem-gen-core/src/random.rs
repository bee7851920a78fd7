use rand::Rng;

/// Source of randomness used by the model and the generator.
///
/// Every random decision goes through `pick` or `unit`, so a test can
/// replay an exact sequence of draws. Any `rand::Rng` is a `RandomSource`.
pub trait RandomSource {
	/// Returns an index uniformly chosen in `0..len`.
	///
	/// `len` must be strictly positive.
	fn pick(&mut self, len: usize) -> usize;

	/// Returns a float uniformly chosen in `[0, 1)`.
	fn unit(&mut self) -> f64;

	/// Returns a value uniformly chosen in `low..=high`.
	fn between(&mut self, low: usize, high: usize) -> usize {
		low + self.pick(high - low + 1)
	}
}

impl<R: Rng> RandomSource for R {
	fn pick(&mut self, len: usize) -> usize {
		self.random_range(0..len)
	}

	fn unit(&mut self) -> f64 {
		self.random::<f64>()
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::RandomSource;
	use std::collections::VecDeque;

	/// Replays scripted draws, then falls back to fixed answers.
	///
	/// Scripted picks are reduced modulo `len` so a script stays valid
	/// whatever the list sizes are.
	pub(crate) struct Scripted {
		picks: VecDeque<usize>,
		units: VecDeque<f64>,
		default_unit: f64,
	}

	impl Scripted {
		pub(crate) fn new(picks: &[usize], units: &[f64]) -> Self {
			Self { picks: picks.iter().copied().collect(), units: units.iter().copied().collect(), default_unit: 0.99 }
		}

		/// Always picks index 0 and draws `unit` for every float.
		pub(crate) fn constant(unit: f64) -> Self {
			Self { picks: VecDeque::new(), units: VecDeque::new(), default_unit: unit }
		}
	}

	impl RandomSource for Scripted {
		fn pick(&mut self, len: usize) -> usize {
			self.picks.pop_front().unwrap_or(0) % len
		}

		fn unit(&mut self) -> f64 {
			self.units.pop_front().unwrap_or(self.default_unit)
		}
	}
}
