pub mod config;
pub mod corpus;
pub mod curriculum;
pub mod frequency;
pub mod known;
pub mod pipeline;
pub mod pool;
pub mod romanize;
pub mod segment;
pub mod sequencer;
pub mod writer;
pub mod wordlist;
