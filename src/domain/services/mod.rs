pub mod account_forms;
pub mod autosave;
pub mod media;
pub mod restrictions;
pub mod submission_gate;
pub mod validation;
