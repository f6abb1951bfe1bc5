pub mod memory_draft_cache;
pub mod memory_event_repo;
pub mod sqlite_draft_cache;
pub mod sqlite_event_repo;
