use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::domain::models::event::{DateRange, DayType, DraftField, EventDraft, EventType};

/// A partial update of an [`EventDraft`]. Present fields replace the draft's
/// values on merge, absent fields are left untouched.
///
/// `status` and `organizer` have no slot here: review status and provenance
/// are assigned server-side, and incoming JSON for them is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        *self == DraftPatch::default()
    }

    /// Shallow merge into `draft`.
    pub fn merge_into(&self, draft: &mut EventDraft) {
        if let Some(val) = &self.title { draft.title = val.clone(); }
        if let Some(val) = &self.description { draft.description = val.clone(); }
        if let Some(val) = &self.category { draft.category = val.clone(); }
        if let Some(val) = self.day_type { draft.day_type = val; }
        if let Some(val) = &self.date { draft.date = val.clone(); }
        if let Some(val) = &self.date_range { draft.date_range = Some(val.clone()); }
        if let Some(val) = &self.time { draft.time = val.clone(); }
        if let Some(val) = &self.duration { draft.duration = val.clone(); }
        if let Some(val) = self.is_free { draft.is_free = val; }
        if let Some(val) = &self.price { draft.price = val.clone(); }
        if let Some(val) = self.event_type { draft.event_type = val; }
        if let Some(val) = &self.venue { draft.venue = val.clone(); }
        if let Some(val) = &self.virtual_link { draft.virtual_link = val.clone(); }
        if let Some(val) = &self.cover_image { draft.cover_image = val.clone(); }
        if let Some(val) = &self.poster { draft.poster = val.clone(); }
        if let Some(val) = &self.gallery_images { draft.gallery_images = val.clone(); }
        if let Some(val) = &self.course { draft.course = val.clone(); }
        if let Some(val) = &self.department { draft.department = val.clone(); }
        if let Some(val) = &self.year { draft.year = val.clone(); }
        if let Some(val) = &self.capacity { draft.capacity = val.clone(); }
    }

    pub fn touches(&self, field: DraftField) -> bool {
        match field {
            DraftField::Title => self.title.is_some(),
            DraftField::Description => self.description.is_some(),
            DraftField::Category => self.category.is_some(),
            DraftField::DayType => self.day_type.is_some(),
            DraftField::Date => self.date.is_some(),
            DraftField::DateRange => self.date_range.is_some(),
            DraftField::Time => self.time.is_some(),
            DraftField::Duration => self.duration.is_some(),
            DraftField::IsFree => self.is_free.is_some(),
            DraftField::Price => self.price.is_some(),
            DraftField::EventType => self.event_type.is_some(),
            DraftField::Venue => self.venue.is_some(),
            DraftField::VirtualLink => self.virtual_link.is_some(),
            DraftField::CoverImage => self.cover_image.is_some(),
            DraftField::Poster => self.poster.is_some(),
            DraftField::GalleryImages => self.gallery_images.is_some(),
            DraftField::Course => self.course.is_some(),
            DraftField::Department => self.department.is_some(),
            DraftField::Year => self.year.is_some(),
            DraftField::Capacity => self.capacity.is_some(),
            DraftField::Status | DraftField::Organizer => false,
        }
    }

    /// Overwrites `field` in this patch with the value held by `original`,
    /// if the patch sets that field at all. Returns true when the value
    /// actually changed.
    pub fn restore_from(&mut self, field: DraftField, original: &EventDraft) -> bool {
        fn restore<T: Clone + PartialEq>(slot: &mut Option<T>, value: &T) -> bool {
            match slot {
                Some(current) if current != value => {
                    *current = value.clone();
                    true
                }
                _ => false,
            }
        }

        match field {
            DraftField::Title => restore(&mut self.title, &original.title),
            DraftField::Description => restore(&mut self.description, &original.description),
            DraftField::Category => restore(&mut self.category, &original.category),
            DraftField::DayType => restore(&mut self.day_type, &original.day_type),
            DraftField::Date => restore(&mut self.date, &original.date),
            DraftField::DateRange => match &original.date_range {
                Some(range) => restore(&mut self.date_range, range),
                None => self.date_range.take().is_some(),
            },
            DraftField::Time => restore(&mut self.time, &original.time),
            DraftField::Duration => restore(&mut self.duration, &original.duration),
            DraftField::IsFree => restore(&mut self.is_free, &original.is_free),
            DraftField::Price => restore(&mut self.price, &original.price),
            DraftField::EventType => restore(&mut self.event_type, &original.event_type),
            DraftField::Venue => restore(&mut self.venue, &original.venue),
            DraftField::VirtualLink => restore(&mut self.virtual_link, &original.virtual_link),
            DraftField::CoverImage => restore(&mut self.cover_image, &original.cover_image),
            DraftField::Poster => restore(&mut self.poster, &original.poster),
            DraftField::GalleryImages => restore(&mut self.gallery_images, &original.gallery_images),
            DraftField::Course => restore(&mut self.course, &original.course),
            DraftField::Department => restore(&mut self.department, &original.department),
            DraftField::Year => restore(&mut self.year, &original.year),
            DraftField::Capacity => restore(&mut self.capacity, &original.capacity),
            DraftField::Status | DraftField::Organizer => false,
        }
    }

    /// Mutable access to the string value of a numeric-text field.
    pub fn numeric_text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Capacity => self.capacity.as_mut(),
            DraftField::Price => self.price.as_mut(),
            DraftField::Duration => self.duration.as_mut(),
            _ => None,
        }
    }
}
