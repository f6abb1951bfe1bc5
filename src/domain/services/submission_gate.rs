use crate::domain::models::event::{DayType, DraftField, EventDraft, EventType};

/// A field that must be present whenever `applies` holds for the draft.
pub struct RequirementRule {
    pub field: DraftField,
    pub applies: fn(&EventDraft) -> bool,
}

fn always(_: &EventDraft) -> bool {
    true
}

fn single_day(draft: &EventDraft) -> bool {
    draft.day_type == DayType::SingleDay
}

fn multi_day(draft: &EventDraft) -> bool {
    draft.day_type == DayType::MultiDay
}

fn paid(draft: &EventDraft) -> bool {
    !draft.is_free
}

fn physical(draft: &EventDraft) -> bool {
    draft.event_type == EventType::Physical
}

fn virtual_event(draft: &EventDraft) -> bool {
    draft.event_type == EventType::Virtual
}

pub const REQUIREMENTS: &[RequirementRule] = &[
    RequirementRule { field: DraftField::Title, applies: always },
    RequirementRule { field: DraftField::Description, applies: always },
    RequirementRule { field: DraftField::Time, applies: always },
    RequirementRule { field: DraftField::Duration, applies: always },
    RequirementRule { field: DraftField::CoverImage, applies: always },
    RequirementRule { field: DraftField::Capacity, applies: always },
    RequirementRule { field: DraftField::Category, applies: always },
    RequirementRule { field: DraftField::Date, applies: single_day },
    RequirementRule { field: DraftField::DateRange, applies: multi_day },
    RequirementRule { field: DraftField::Price, applies: paid },
    RequirementRule { field: DraftField::Venue, applies: physical },
    RequirementRule { field: DraftField::VirtualLink, applies: virtual_event },
    RequirementRule { field: DraftField::Course, applies: always },
    RequirementRule { field: DraftField::Department, applies: always },
    RequirementRule { field: DraftField::Year, applies: always },
];

/// Required fields that the draft does not fill yet, in rule order.
pub fn missing_fields(draft: &EventDraft) -> Vec<DraftField> {
    REQUIREMENTS
        .iter()
        .filter(|rule| (rule.applies)(draft))
        .filter(|rule| !draft.is_present(rule.field))
        .map(|rule| rule.field)
        .collect()
}

pub fn is_complete(draft: &EventDraft) -> bool {
    REQUIREMENTS
        .iter()
        .all(|rule| !(rule.applies)(draft) || draft.is_present(rule.field))
}
