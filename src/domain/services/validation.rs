use chrono::{NaiveDate, NaiveTime};
use crate::domain::models::{
    account::FieldError,
    event::{DayType, DraftField, EventDraft, EventType},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Inline messages for malformed values. Empty fields are the submission
/// gate's concern and are not reported here; fields switched off by a
/// discriminator are skipped.
pub fn field_errors(draft: &EventDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !draft.capacity.is_empty() && !matches!(draft.capacity.trim().parse::<u64>(), Ok(n) if n > 0) {
        errors.push(error(DraftField::Capacity, "Capacity must be a positive whole number"));
    }

    if !draft.duration.is_empty() && !matches!(draft.duration.trim().parse::<f64>(), Ok(n) if n > 0.0) {
        errors.push(error(DraftField::Duration, "Duration must be a positive number of hours"));
    }

    if !draft.is_free
        && !draft.price.is_empty()
        && !matches!(draft.price.trim().parse::<f64>(), Ok(n) if n >= 0.0)
    {
        errors.push(error(DraftField::Price, "Price must be a non-negative amount"));
    }

    if !draft.time.is_empty() && NaiveTime::parse_from_str(&draft.time, TIME_FORMAT).is_err() {
        errors.push(error(DraftField::Time, "Time must use HH:MM"));
    }

    match draft.day_type {
        DayType::SingleDay => {
            if !draft.date.is_empty() && parse_date(&draft.date).is_none() {
                errors.push(error(DraftField::Date, "Date must use YYYY-MM-DD"));
            }
        }
        DayType::MultiDay => {
            if let Some(range) = draft.date_range.as_ref().filter(|r| r.is_filled()) {
                match (parse_date(&range.from), parse_date(&range.to)) {
                    (Some(from), Some(to)) if from > to => {
                        errors.push(error(DraftField::DateRange, "End date must be on or after the start date"));
                    }
                    (Some(_), Some(_)) => {}
                    _ => errors.push(error(DraftField::DateRange, "Dates must use YYYY-MM-DD")),
                }
            }
        }
    }

    if draft.event_type == EventType::Virtual
        && !draft.virtual_link.is_empty()
        && !(draft.virtual_link.starts_with("https://") || draft.virtual_link.starts_with("http://"))
    {
        errors.push(error(DraftField::VirtualLink, "Virtual link must be an http(s) URL"));
    }

    errors
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn error(field: DraftField, message: &str) -> FieldError {
    FieldError::new(field.as_str(), message)
}
