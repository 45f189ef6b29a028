pub mod amortization;
pub mod comparison;
pub mod optimal_rate;
