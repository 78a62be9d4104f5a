//! i+1 sentence sequencer — learning-ordered sentence lists for language study.
//!
//! Orders transcribed, segmented sentences so that each one introduces as
//! few unknown words as possible, front-loading the most frequent
//! vocabulary and growing the learner's known words one sentence at a time.

pub mod core;
pub mod schema;
