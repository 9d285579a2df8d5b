use thiserror::Error;

/// Failures surfaced by model construction and generation.
///
/// All failures propagate synchronously to the caller. The core never
/// retries, never clamps an out-of-range parameter, and never returns a
/// partial result: generation yields exactly the requested number of
/// sentences or fails outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
	/// The n-gram order was zero. Callers must validate `n` as a positive
	/// integer; the core fails fast on violation.
	#[error("n-gram order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// The requested sentence count was zero.
	#[error("sentence count must be >= 1, got {0}")]
	InvalidSentenceCount(usize),

	/// Two tables of different order cannot be merged.
	#[error("cannot merge tables of different order ({left} vs {right})")]
	OrderMismatch { left: usize, right: usize },

	/// The frequency table holds no histories: every input text was empty,
	/// or every corpus was shorter than `n` tokens.
	#[error("frequency table is empty (corpus shorter than the n-gram order)")]
	EmptyModel,

	/// The rolling window reached a history never observed during training.
	///
	/// A structural gap of fixed-order n-gram models without smoothing.
	/// The core does not fall back to a shorter history; callers may choose
	/// to restart generation with a fresh random seed.
	#[error("history {0:?} is absent from the frequency table")]
	UnseenHistory(String),

	/// The optional step budget ran out before the last sentence completed.
	#[error("step budget exhausted after {steps} steps")]
	StepBudgetExhausted { steps: usize },
}
