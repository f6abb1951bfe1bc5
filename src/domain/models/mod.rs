pub mod account;
pub mod event;
pub mod notification;
pub mod patch;
pub mod restriction;
pub mod save_status;
