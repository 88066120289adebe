pub mod badge;
pub mod journal_entry;
pub mod profile;
