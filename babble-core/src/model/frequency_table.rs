use std::collections::HashMap;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::Serialize;

use super::corpus::Corpus;
use super::state::State;
use crate::error::ModelError;

/// The learned n-gram model: history -> next-token occurrence counts.
///
/// Each contiguous `n`-token window of a corpus contributes one
/// observation: the first `n - 1` tokens joined with single spaces form
/// the history key, the last token is the observed successor.
///
/// # Responsibilities
/// - Accumulate transition counts from corpora
/// - Merge additively with another table of the same order
/// - Hand out a random history as a generation seed
/// - Draw a next token for a given history
///
/// # Invariants
/// - `n` is always >= 1 (`n = 1` degenerates to unigram sampling under a
///   single empty history key)
/// - Every recorded count is >= 1, and a history's transition map is
///   non-empty once the history exists
/// - Accumulation is order-independent: any permutation of the input
///   windows yields the same table
/// - Read-only during generation
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// The order of the model (number of tokens in one window).
	n: usize, // must be >= 1

	/// Mapping from a history (space-joined n-1 tokens) to its state.
	states: HashMap<String, State>,
}

impl FrequencyTable {
	/// Creates an empty table of order `n`.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidOrder`] if `n` is zero.
	pub fn new(n: usize) -> Result<Self, ModelError> {
		if n == 0 {
			return Err(ModelError::InvalidOrder(n));
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// The order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of distinct histories in the table.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns true if the table holds no histories.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Accumulates every `n`-token window of the corpus into the table.
	///
	/// A corpus shorter than `n` tokens contributes nothing; that is a
	/// valid outcome, surfaced as [`ModelError::EmptyModel`] only when
	/// generation is attempted on a table that stayed empty.
	pub fn add_corpus(&mut self, corpus: &Corpus) {
		for window in corpus.windows(self.n) {
			let history = window[..self.n - 1].join(" ");
			let next_token = &window[self.n - 1];

			// Get or create the state for this history
			let state = self
				.states
				.entry(history.clone())
				.or_insert_with(|| State::new(&history));
			state.add_transition(next_token);
		}
	}

	/// Returns the occurrence count recorded for `next_token` after
	/// `history` (0 if the pair was never observed).
	pub fn count(&self, history: &str, next_token: &str) -> u64 {
		self.states
			.get(history)
			.map(|state| state.count(next_token))
			.unwrap_or(0)
	}

	/// Iterates over the history keys, in no particular order.
	pub fn histories(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Returns a history chosen uniformly at random, to seed generation.
	///
	/// Returns `None` if the table is empty.
	pub(crate) fn random_history<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.states.keys().choose(rng).map(String::as_str)
	}

	/// Draws the next token after `history`, with probability proportional
	/// to the recorded counts.
	///
	/// # Errors
	/// Returns [`ModelError::UnseenHistory`] if the history is absent from
	/// the table. No default is substituted and no shorter history is
	/// tried.
	pub(crate) fn next_token<R: Rng + ?Sized>(
		&self,
		history: &str,
		rng: &mut R,
	) -> Result<&str, ModelError> {
		self.states
			.get(history)
			.and_then(|state| state.sample(rng))
			.ok_or_else(|| ModelError::UnseenHistory(history.to_owned()))
	}

	/// Merges another table into this one.
	///
	/// Occurrence counts for matching history/next-token pairs are summed;
	/// histories only present in `other` are cloned in. Merging the tables
	/// of two texts is equivalent to accumulating both texts into one
	/// table.
	///
	/// # Errors
	/// Returns [`ModelError::OrderMismatch`] if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		if self.n != other.n {
			return Err(ModelError::OrderMismatch { left: self.n, right: other.n });
		}

		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state);
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		Ok(())
	}
}
