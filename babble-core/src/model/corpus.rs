/// Sentence-terminal punctuation marks, each tokenized as a standalone unit.
const SENTENCE_TERMINALS: [char; 3] = ['.', '?', '!'];

/// Returns true if the token is a single sentence-terminal mark.
pub(crate) fn is_sentence_terminal(token: &str) -> bool {
	matches!(token, "." | "?" | "!")
}

/// An immutable, ordered sequence of normalized tokens.
///
/// A token is either a maximal run of word characters (apostrophes inside
/// words are kept, so contractions stay intact) or a single
/// sentence-terminal mark (`.`, `?`, `!`).
///
/// # Invariants
/// - Tokens contain no whitespace and are never empty.
/// - Built once from input text; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
	tokens: Vec<String>,
}

impl Corpus {
	/// Tokenizes raw text into a corpus.
	///
	/// The caller is expected to have lowercased the text already
	/// (`build_model` does this); tokenization itself does not change case.
	///
	/// # Behavior
	/// - Strips every character that is not a word character, whitespace,
	///   or one of `? . — ! - '`.
	/// - Newlines, underscores, hyphens, and em-dashes become spaces: they
	///   separate words but carry no content.
	/// - `.`, `?`, and `!` are padded with spaces so they split off as
	///   standalone tokens.
	/// - Splits on whitespace runs; empty tokens are discarded, so text
	///   with no valid tokens yields an empty corpus.
	pub fn tokenize(raw: &str) -> Self {
		let mut scrubbed = String::with_capacity(raw.len());
		for c in raw.chars() {
			match c {
				c if SENTENCE_TERMINALS.contains(&c) => {
					scrubbed.push(' ');
					scrubbed.push(c);
					scrubbed.push(' ');
				}
				'\n' | '_' | '-' | '—' => scrubbed.push(' '),
				'\'' => scrubbed.push(c),
				c if c.is_alphanumeric() || c.is_whitespace() => scrubbed.push(c),
				_ => (),
			}
		}

		Self {
			tokens: scrubbed.split_whitespace().map(str::to_owned).collect(),
		}
	}

	/// Returns the tokens in corpus order.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Number of tokens in the corpus.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns true if the corpus holds no tokens.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns all contiguous `n`-token windows, in corpus order.
	///
	/// For a corpus of length `L` and `n <= L` this yields exactly
	/// `L - n + 1` windows; for `n > L` it yields none, which is a valid
	/// outcome and simply leaves the frequency table empty.
	///
	/// `n` must be at least 1.
	pub fn windows(&self, n: usize) -> std::slice::Windows<'_, String> {
		self.tokens.windows(n)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_words_and_terminal_punctuation() {
		let corpus = Corpus::tokenize("i like to watch anime.");
		assert_eq!(corpus.tokens(), ["i", "like", "to", "watch", "anime", "."]);
	}

	#[test]
	fn keeps_apostrophes_inside_words() {
		let corpus = Corpus::tokenize("don't stop!");
		assert_eq!(corpus.tokens(), ["don't", "stop", "!"]);
	}

	#[test]
	fn separators_and_noise_are_dropped() {
		let corpus = Corpus::tokenize("well, half-done em—dash\nsnake_case; end?");
		assert_eq!(
			corpus.tokens(),
			["well", "half", "done", "em", "dash", "snake", "case", "end", "?"]
		);
	}

	#[test]
	fn retokenizing_joined_output_is_stable() {
		let corpus = Corpus::tokenize("well, i don't know... maybe-tomorrow?\nor_never!");
		let joined = corpus.tokens().join(" ");
		assert_eq!(Corpus::tokenize(&joined), corpus);
	}

	#[test]
	fn text_without_tokens_yields_empty_corpus() {
		assert!(Corpus::tokenize("").is_empty());
		assert!(Corpus::tokenize(",;:()\t \n").is_empty());
	}

	#[test]
	fn window_count_is_len_minus_n_plus_one() {
		let corpus = Corpus::tokenize("a b c d e");
		assert_eq!(corpus.len(), 5);
		assert_eq!(corpus.windows(2).count(), 4);
		assert_eq!(corpus.windows(5).count(), 1);
		assert_eq!(corpus.windows(6).count(), 0);
	}
}
