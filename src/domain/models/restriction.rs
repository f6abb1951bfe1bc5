use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::domain::models::event::{DraftField, EventDraft, EventStatus};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldRestriction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<u64>,
    pub can_edit: bool,
}

impl FieldRestriction {
    pub fn locked() -> Self {
        Self { min_value: None, can_edit: false }
    }

    pub fn at_least(min_value: u64) -> Self {
        Self { min_value: Some(min_value), can_edit: true }
    }
}

/// Per-field edit constraints, attached to a wizard session only when an
/// existing record is being edited.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RestrictionSet(BTreeMap<DraftField, FieldRestriction>);

impl RestrictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraints for editing `original`: the free/paid choice is fixed once
    /// the event exists, and an approved event cannot shrink its capacity.
    pub fn for_existing(original: &EventDraft) -> Self {
        let mut set = Self::new();
        set.insert(DraftField::IsFree, FieldRestriction::locked());

        if original.status == EventStatus::Approved {
            if let Ok(capacity) = original.capacity.trim().parse::<u64>() {
                set.insert(DraftField::Capacity, FieldRestriction::at_least(capacity));
            }
        }
        set
    }

    pub fn insert(&mut self, field: DraftField, restriction: FieldRestriction) {
        self.0.insert(field, restriction);
    }

    pub fn get(&self, field: DraftField) -> Option<&FieldRestriction> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DraftField, &FieldRestriction)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RestrictionWarning {
    Locked { field: DraftField },
    Clamped { field: DraftField, requested: String, minimum: u64 },
}

impl RestrictionWarning {
    pub fn field(&self) -> DraftField {
        match self {
            RestrictionWarning::Locked { field } => *field,
            RestrictionWarning::Clamped { field, .. } => *field,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RestrictionWarning::Locked { field } => {
                format!("{} cannot be changed after the event is created", field)
            }
            RestrictionWarning::Clamped { field, requested, minimum } => {
                format!("{} cannot be reduced below {} (requested {})", field, minimum, requested)
            }
        }
    }
}
