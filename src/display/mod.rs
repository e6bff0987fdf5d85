//! Interactive terminal output.

pub mod braille;
pub mod terminal;
