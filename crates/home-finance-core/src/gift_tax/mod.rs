pub mod brackets;
pub mod calculator;
