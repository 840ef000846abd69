//! Text similarity metrics used by the WER and ROUGE-LSum scorers

pub mod rouge;
pub mod word_error_rate;

pub use rouge::{rouge_lsum, RougeScore};
pub use word_error_rate::{tokenize_words, word_error_rate};
