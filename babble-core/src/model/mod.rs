//! Top-level module for the n-gram sentence generation system.
//!
//! The pipeline runs corpus -> frequency table -> generator -> formatter.
//! `build_model` and `generate` are the two entry points external
//! collaborators (CLI, server) are expected to use; the individual types
//! remain available for callers that need finer control, such as table
//! merging or a generation step budget.

use rand::Rng;

use crate::error::ModelError;

/// Tokenization and the immutable token sequence (`Corpus`).
///
/// Splits normalized text into word tokens and standalone sentence-terminal
/// punctuation, and exposes the n-gram windows over the result.
pub mod corpus;

/// The learned model: history -> next-token occurrence counts.
///
/// Handles n-gram accumulation from a corpus and additive merging of
/// tables built from separate texts.
pub mod frequency_table;

/// Sentence generation driven by weighted random sampling.
///
/// Maintains the rolling history window and counts completed sentences;
/// supports an optional step budget.
pub mod generator;

/// Display formatting of generated text (spacing and capitalization).
pub mod format;

/// Internal representation of a single history and its outgoing
/// transitions. Performs the weighted random draw. Not exposed publicly.
mod state;

use self::corpus::Corpus;
use self::frequency_table::FrequencyTable;
use self::generator::Generator;

/// Builds a frequency table from one or more raw texts.
///
/// Each text is lowercased, tokenized, and accumulated into a single table
/// of order `n`. Texts are indexed independently, so no n-gram spans two
/// inputs; the result equals the additive merge of per-text tables.
///
/// # Errors
/// - [`ModelError::InvalidOrder`] if `n` is zero.
/// - [`ModelError::EmptyModel`] if no text contributed a single n-gram.
pub fn build_model<S: AsRef<str>>(texts: &[S], n: usize) -> Result<FrequencyTable, ModelError> {
	let mut table = FrequencyTable::new(n)?;
	for text in texts {
		let corpus = Corpus::tokenize(&text.as_ref().to_lowercase());
		table.add_corpus(&corpus);
	}
	if table.is_empty() {
		return Err(ModelError::EmptyModel);
	}
	Ok(table)
}

/// Generates `sentence_count` sentences from a frequency table and formats
/// them for display.
///
/// Runs the generator with no step budget: a table with no reachable
/// sentence terminal does not return. Callers needing bounded latency
/// should use
/// [`generator::Generator`] with a step budget instead.
///
/// # Errors
/// - [`ModelError::InvalidSentenceCount`] if `sentence_count` is zero.
/// - [`ModelError::EmptyModel`] if the table has no histories.
/// - [`ModelError::UnseenHistory`] if the rolling window drifts to an
///   untrained history.
pub fn generate<R: Rng + ?Sized>(
	table: &FrequencyTable,
	sentence_count: usize,
	rng: &mut R,
) -> Result<String, ModelError> {
	Generator::new(table)?.generate(sentence_count, rng)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn build_model_lowercases_input() {
		let table = build_model(&["The Cat The"], 2).unwrap();
		assert_eq!(table.count("the", "cat"), 1);
		assert_eq!(table.count("cat", "the"), 1);
	}

	#[test]
	fn build_model_rejects_empty_input() {
		assert_eq!(build_model(&[""], 2), Err(ModelError::EmptyModel));
	}

	#[test]
	fn build_model_rejects_order_zero() {
		assert_eq!(build_model(&["a b"], 0), Err(ModelError::InvalidOrder(0)));
	}

	#[test]
	fn build_model_equals_merge_of_per_text_tables() {
		let combined = build_model(&["a b a", "b c b"], 2).unwrap();

		let mut merged = build_model(&["a b a"], 2).unwrap();
		merged.merge(&build_model(&["b c b"], 2).unwrap()).unwrap();

		assert_eq!(combined, merged);
	}

	#[test]
	fn generate_produces_a_formatted_sentence() {
		// Single history, single transition: output is fully determined.
		let table = build_model(&["a ."], 2).unwrap();
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(generate(&table, 1, &mut rng).unwrap(), "A.\n");
	}
}
