//! SQL dump files as ordered line sequences

mod line_sequence;

pub use line_sequence::LineSequence;
