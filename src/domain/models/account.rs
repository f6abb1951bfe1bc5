use serde::{Deserialize, Serialize};

/// Organizer account as submitted from the admin "add organizer" dialog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateOrganizerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub password: String,
}

/// Same account in the edit dialog; credentials are managed elsewhere.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EditOrganizerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
