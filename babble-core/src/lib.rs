//! Word-level n-gram sentence generation library.
//!
//! This crate learns token-transition frequencies from raw text and
//! generates novel sentences by weighted random sampling:
//! - Tokenization and normalization of raw text into a corpus
//! - N-gram frequency accumulation (history -> next-token counts)
//! - Frequency-weighted generation with sentence-boundary detection
//! - Display formatting of the generated output
//!
//! The crate knows nothing about files, command-line arguments, or the
//! console. Callers hand in raw strings and integers and get strings back;
//! every failure propagates as a [`error::ModelError`].

/// Core model types and generation logic.
///
/// This module exposes the corpus, frequency table, generator, and
/// formatter, plus the two high-level entry points `build_model` and
/// `generate`. Internal sampling state is kept private.
pub mod model;

/// Error kinds shared by model construction and generation.
pub mod error;
