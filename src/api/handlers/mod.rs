pub mod event;
pub mod health;
pub mod organizer;
pub mod wizard;
