use crate::random::RandomSource;

/// Successors observed after one context of the Markov chain.
///
/// Conceptually, this is a node of the chain whose outgoing edges are the
/// recorded successors. A successor seen twice is stored twice, so a uniform
/// pick over the list reproduces the empirical frequencies.
///
/// ## Invariants
/// - Successors keep their insertion order
/// - A state stored in a model is never empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	successors: Vec<String>,
}

impl State {
	pub(crate) fn from_successors(successors: Vec<String>) -> Self {
		Self { successors }
	}

	/// Records one more occurrence of `next_word` after this context.
	pub fn add_transition(&mut self, next_word: &str) {
		self.successors.push(next_word.to_owned());
	}

	/// Picks a successor uniformly from the recorded list.
	///
	/// Returns `None` if the state has no successors.
	pub fn predict<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.successors.is_empty() {
			return None;
		}
		Some(&self.successors[rng.pick(self.successors.len())])
	}

	/// Appends the successors of `other` after ours.
	pub fn merge(&mut self, other: &Self) {
		self.successors.extend(other.successors.iter().cloned());
	}

	pub fn successors(&self) -> &[String] {
		&self.successors
	}
}
