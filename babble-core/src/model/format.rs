/// Cleans raw generated text for display.
///
/// Two passes, both pure:
/// - Remove any whitespace run immediately preceding a sentence terminal
///   or a quote mark, so `word .` becomes `word.`.
/// - Capitalize the first character of the text and the first letter that
///   follows a sentence terminal plus whitespace.
///
/// Repeated punctuation (ellipses, `. ?`) gets no special casing: each
/// terminal starts its own boundary, whatever preceded it.
pub fn format_output(raw: &str) -> String {
	capitalize_sentences(&tighten_punctuation(raw))
}

/// Drops whitespace sitting between a token and a following terminal or
/// quote mark. Line breaks inserted after a terminal are untouched.
fn tighten_punctuation(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		if matches!(c, '.' | '?' | '!' | '"') {
			while out.ends_with(char::is_whitespace) {
				out.pop();
			}
		}
		out.push(c);
	}
	out
}

/// Uppercases the first character of the text and every letter that opens
/// a new sentence (a terminal mark, then whitespace, then the letter).
fn capitalize_sentences(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	// A boundary opens once a terminal is followed by whitespace and stays
	// open across the whitespace run.
	let mut after_terminal = false;
	let mut at_boundary = false;

	for (i, c) in text.chars().enumerate() {
		if i == 0 || (at_boundary && c.is_alphabetic()) {
			out.extend(c.to_uppercase());
		} else {
			out.push(c);
		}

		if matches!(c, '.' | '?' | '!') {
			after_terminal = true;
			at_boundary = false;
		} else if c.is_whitespace() {
			if after_terminal {
				at_boundary = true;
			}
		} else {
			after_terminal = false;
			at_boundary = false;
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn spacing_and_capitalization_are_fixed() {
		assert_eq!(
			format_output("the cat sat . it slept ."),
			"The cat sat. It slept."
		);
	}

	#[test]
	fn line_breaks_between_sentences_survive() {
		assert_eq!(format_output("a .\n b .\n"), "A.\n B.\n");
	}

	#[test]
	fn every_terminal_kind_opens_a_boundary() {
		assert_eq!(
			format_output("really ? yes ! fine ."),
			"Really? Yes! Fine."
		);
	}

	#[test]
	fn whitespace_before_quotes_is_dropped() {
		assert_eq!(format_output("she left \" now \" ."), "She left\" now\".");
	}

	#[test]
	fn repeated_punctuation_is_left_as_is() {
		// Inherited behavior: the second terminal still opens a boundary.
		assert_eq!(format_output("wait . ? go ."), "Wait.? Go.");
	}

	#[test]
	fn empty_input_stays_empty() {
		assert_eq!(format_output(""), "");
	}
}
