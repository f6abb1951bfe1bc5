pub mod audience;
pub mod basic;
pub mod datetime;
pub mod location;
pub mod media;

pub use audience::{AudienceCatalog, AudienceEditor};
pub use basic::BasicDetailsEditor;
pub use datetime::DateTimeEditor;
pub use location::LocationEditor;
pub use media::{MediaEditor, MediaUpdate};
