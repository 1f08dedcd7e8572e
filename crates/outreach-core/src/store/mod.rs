pub mod history_store;
pub mod prospect_store;

pub use history_store::HistoryStore;
pub use prospect_store::ProspectStore;
