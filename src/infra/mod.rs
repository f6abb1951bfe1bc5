pub mod factory;
pub mod notifier;
pub mod repositories;
