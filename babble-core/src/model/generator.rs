use rand::Rng;

use super::corpus::is_sentence_terminal;
use super::format;
use super::frequency_table::FrequencyTable;
use crate::error::ModelError;

/// Drives weighted sampling over a frequency table until the requested
/// number of sentences is complete.
///
/// # Responsibilities
/// - Seed generation with a uniformly chosen history from the table
/// - Keep the rolling (n-1)-token window current while tokens accumulate
/// - Count completed sentences on terminal tokens and stop at the target
/// - Enforce the optional step budget
///
/// # Notes
/// - Without a step budget, a table where no sentence terminal is
///   reachable from the current history never terminates. That hazard is
///   deliberately not masked; callers needing bounded latency opt into
///   [`Generator::with_max_steps`].
pub struct Generator<'m> {
	table: &'m FrequencyTable,
	max_steps: Option<usize>,
}

/// Rolling generation state: the trailing (n-1)-token window, the
/// accumulated raw output, and the completed-sentence count. Discarded
/// once the output is produced.
struct GenerationState {
	window: Vec<String>,
	text: String,
	sentences: usize,
}

impl GenerationState {
	/// Starts from a seed history: its tokens become both the initial
	/// output and the initial window. Seed tokens never count toward the
	/// sentence total; only drawn tokens do.
	fn seed(history: &str) -> Self {
		Self {
			window: history.split_whitespace().map(str::to_owned).collect(),
			text: history.to_owned(),
			sentences: 0,
		}
	}

	/// The current history key (space-joined trailing window).
	fn history(&self) -> String {
		self.window.join(" ")
	}

	/// Appends a drawn token, marks the sentence complete if the token is
	/// a terminal (with an explicit line break), and trims the window back
	/// to `keep` tokens.
	fn push(&mut self, token: &str, keep: usize) {
		self.text.push(' ');
		self.text.push_str(token);
		if is_sentence_terminal(token) {
			self.text.push('\n');
			self.sentences += 1;
		}

		self.window.push(token.to_owned());
		if self.window.len() > keep {
			self.window.remove(0);
		}
	}
}

impl<'m> Generator<'m> {
	/// Creates a generator over a table.
	///
	/// # Errors
	/// Returns [`ModelError::EmptyModel`] if the table has no histories,
	/// before any sampling is attempted.
	pub fn new(table: &'m FrequencyTable) -> Result<Self, ModelError> {
		if table.is_empty() {
			return Err(ModelError::EmptyModel);
		}
		Ok(Self { table, max_steps: None })
	}

	/// Caps the number of sampling steps.
	///
	/// The default is unbounded; a budget turns potential
	/// non-termination into
	/// [`ModelError::StepBudgetExhausted`].
	pub fn with_max_steps(mut self, max_steps: usize) -> Self {
		self.max_steps = Some(max_steps);
		self
	}

	/// Generates exactly `sentence_count` sentences and formats them.
	///
	/// Seeds with a random history, then repeatedly draws the next token
	/// for the trailing window until enough sentence terminals have been
	/// drawn. Every completed sentence ends with its terminal mark
	/// followed by a line break.
	///
	/// # Errors
	/// - [`ModelError::InvalidSentenceCount`] if `sentence_count` is zero.
	/// - [`ModelError::UnseenHistory`] if the window drifts to an
	///   untrained history mid-generation.
	/// - [`ModelError::StepBudgetExhausted`] if a step budget is set and
	///   runs out first.
	pub fn generate<R: Rng + ?Sized>(
		&self,
		sentence_count: usize,
		rng: &mut R,
	) -> Result<String, ModelError> {
		if sentence_count == 0 {
			return Err(ModelError::InvalidSentenceCount(sentence_count));
		}

		// new() guarantees at least one history
		let seed = self.table.random_history(rng).ok_or(ModelError::EmptyModel)?;
		let mut state = GenerationState::seed(seed);

		let keep = self.table.order() - 1;
		let mut steps = 0usize;
		while state.sentences < sentence_count {
			if let Some(budget) = self.max_steps {
				if steps >= budget {
					return Err(ModelError::StepBudgetExhausted { steps });
				}
			}

			let token = self.table.next_token(&state.history(), rng)?;
			state.push(token, keep);
			steps += 1;
		}

		Ok(format::format_output(&state.text))
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::build_model;

	#[test]
	fn empty_table_is_rejected_before_sampling() {
		let table = FrequencyTable::new(2).unwrap();
		assert!(matches!(Generator::new(&table), Err(ModelError::EmptyModel)));
	}

	#[test]
	fn sentence_count_zero_is_rejected() {
		let table = build_model(&["a ."], 2).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		let result = Generator::new(&table).unwrap().generate(0, &mut rng);
		assert_eq!(result, Err(ModelError::InvalidSentenceCount(0)));
	}

	#[test]
	fn stops_after_requested_sentences_each_with_a_line_break() {
		// "a" -> "." and "." -> "a": a terminal is reachable from every
		// history, so generation always terminates.
		let table = build_model(&["a . a ."], 2).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		let text = Generator::new(&table).unwrap().generate(3, &mut rng).unwrap();
		assert_eq!(text.matches('\n').count(), 3);
		assert!(text.ends_with(".\n"));
		for line in text.lines() {
			assert!(line.ends_with('.'), "line {line:?} lacks its terminal");
		}
	}

	#[test]
	fn drifting_to_an_unseen_history_fails_outright() {
		// After the first sentence the window holds ".", which was never
		// observed as a history.
		let table = build_model(&["a b ."], 2).unwrap();
		let mut rng = StdRng::seed_from_u64(5);

		let result = Generator::new(&table).unwrap().generate(2, &mut rng);
		assert_eq!(result, Err(ModelError::UnseenHistory(".".to_owned())));
	}

	#[test]
	fn step_budget_turns_non_termination_into_an_error() {
		// No sentence terminal anywhere in the table.
		let table = build_model(&["a b a b a"], 2).unwrap();
		let mut rng = StdRng::seed_from_u64(11);

		let result = Generator::new(&table)
			.unwrap()
			.with_max_steps(50)
			.generate(1, &mut rng);
		assert_eq!(result, Err(ModelError::StepBudgetExhausted { steps: 50 }));
	}

	#[test]
	fn unigram_generation_terminates_on_a_drawn_terminal() {
		// n = 1: the history is always the empty key.
		let table = build_model(&["end ."], 1).unwrap();
		let mut rng = StdRng::seed_from_u64(21);

		let text = Generator::new(&table).unwrap().generate(1, &mut rng).unwrap();
		assert!(text.ends_with(".\n"));
		assert_eq!(text.matches('\n').count(), 1);
	}
}
