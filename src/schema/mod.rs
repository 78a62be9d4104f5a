pub mod selection;
pub mod sentence;
