pub mod history;
pub mod prospect;

pub use history::*;
pub use prospect::*;
