pub mod format;
pub mod funding;
pub mod gift_tax;
pub mod loan;
