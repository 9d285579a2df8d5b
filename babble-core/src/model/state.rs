use std::collections::HashMap;

use rand::Rng;

use serde::Serialize;

/// Represents one history in the frequency table.
///
/// A `State` corresponds to a fixed (n-1)-token history (`key`) and stores
/// all observed transitions from this history to the next token.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities
/// - Accumulate transition occurrences during learning
/// - Draw the next token using weighted random sampling
/// - Merge with another state holding the same key
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
/// - `transitions` is non-empty once the state exists (states are only
///   created on their first observed transition)
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct State {
	/// Identifier of the state (space-joined (n-1)-token history).
	key: String,
	/// Outgoing transitions indexed by the next token.
	/// The value is the number of times this transition was observed.
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: HashMap<String, u64>,
}

impl State {
	/// Creates a new empty state for the given history.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: HashMap::new(),
		}
	}

	/// Records an occurrence of a transition toward `next_token`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub(crate) fn add_transition(&mut self, next_token: &str) {
		*self.transitions.entry(next_token.to_owned()).or_insert(0) += 1;
	}

	/// Returns the occurrence count recorded for `next_token` (0 if unseen).
	pub(crate) fn count(&self, next_token: &str) -> u64 {
		self.transitions.get(next_token).copied().unwrap_or(0)
	}

	/// Draws the next token using weighted random sampling.
	///
	/// The probability of selecting a token is proportional to its
	/// occurrence count: a uniform real `r` is drawn in `[0, total)` and
	/// the candidates are walked with a running sum until it exceeds `r`.
	/// The same candidate can be drawn again on a later call.
	///
	/// Returns `None` if the state has no transitions.
	pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.transitions.is_empty() {
			return None;
		}

		// Compute the total number of occurrences
		let total: u64 = self.transitions.values().sum();

		// Uniform real in [0, total)
		let r: f64 = rng.random_range(0.0..total as f64);

		let mut running = 0.0;
		let mut fallback: Option<&str> = None;
		for (next_token, occurrence) in &self.transitions {
			running += *occurrence as f64;
			if running > r {
				return Some(next_token.as_str());
			}
			fallback = Some(next_token.as_str());
		}

		// Float accumulation can land the running sum exactly on r at the
		// end of the walk; the last candidate absorbs it.
		fallback
	}

	/// Merges another state into this one.
	///
	/// Both states must represent the same history; transition occurrence
	/// counts are summed. The caller (table merge) aligns keys, so a
	/// mismatch here is a programming error.
	pub(crate) fn merge(&mut self, other: &Self) {
		debug_assert_eq!(self.key, other.key);
		for (next_token, occurrence) in &other.transitions {
			*self.transitions.entry(next_token.clone()).or_insert(0) += *occurrence;
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn empty_state_yields_nothing() {
		let state = State::new("h");
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(state.sample(&mut rng), None);
	}

	#[test]
	fn single_candidate_is_always_drawn() {
		let mut state = State::new("h");
		state.add_transition("only");
		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..100 {
			assert_eq!(state.sample(&mut rng), Some("only"));
		}
	}

	#[test]
	fn draw_frequency_is_proportional_to_counts() {
		let mut state = State::new("h");
		state.add_transition("x");
		for _ in 0..3 {
			state.add_transition("y");
		}

		let mut rng = StdRng::seed_from_u64(42);
		let draws = 20_000;
		let mut hits = 0usize;
		for _ in 0..draws {
			if state.sample(&mut rng) == Some("y") {
				hits += 1;
			}
		}

		// Expected 0.75; with 20k draws the ratio stays well inside +-0.03.
		let ratio = hits as f64 / draws as f64;
		assert!((0.72..=0.78).contains(&ratio), "ratio was {ratio}");
	}

	#[test]
	fn merge_sums_occurrences() {
		let mut left = State::new("h");
		left.add_transition("a");
		left.add_transition("a");
		let mut right = State::new("h");
		right.add_transition("a");
		right.add_transition("b");

		left.merge(&right);
		assert_eq!(left.count("a"), 3);
		assert_eq!(left.count("b"), 1);
	}
}
