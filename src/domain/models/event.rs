use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayType {
    #[default]
    #[serde(rename = "single day")]
    SingleDay,
    #[serde(rename = "multi day")]
    MultiDay,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Physical,
    Virtual,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    pub fn is_filled(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }
}

/// An event record, either in progress inside the wizard or finalized in the
/// event collection. Both share one JSON layout.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub day_type: DayType,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub time: String,
    pub duration: String,
    pub is_free: bool,
    pub price: String,
    pub event_type: EventType,
    pub venue: String,
    pub virtual_link: String,
    pub cover_image: String,
    pub poster: String,
    pub gallery_images: Vec<String>,
    pub course: Vec<String>,
    pub department: Vec<String>,
    /// Selected years keyed by course.
    pub year: BTreeMap<String, Vec<String>>,
    pub capacity: String,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub organizer: String,
}

/// Field names of [`EventDraft`], used by restrictions, the submission gate
/// and inline validation messages.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Title,
    Description,
    Category,
    DayType,
    Date,
    DateRange,
    Time,
    Duration,
    IsFree,
    Price,
    EventType,
    Venue,
    VirtualLink,
    CoverImage,
    Poster,
    GalleryImages,
    Course,
    Department,
    Year,
    Capacity,
    Status,
    Organizer,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Category => "category",
            DraftField::DayType => "dayType",
            DraftField::Date => "date",
            DraftField::DateRange => "dateRange",
            DraftField::Time => "time",
            DraftField::Duration => "duration",
            DraftField::IsFree => "isFree",
            DraftField::Price => "price",
            DraftField::EventType => "eventType",
            DraftField::Venue => "venue",
            DraftField::VirtualLink => "virtualLink",
            DraftField::CoverImage => "coverImage",
            DraftField::Poster => "poster",
            DraftField::GalleryImages => "galleryImages",
            DraftField::Course => "course",
            DraftField::Department => "department",
            DraftField::Year => "year",
            DraftField::Capacity => "capacity",
            DraftField::Status => "status",
            DraftField::Organizer => "organizer",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EventDraft {
    /// Builds the wizard draft for an existing record. Capacity is the only
    /// field rewritten on load.
    pub fn hydrate(record: &EventDraft) -> Self {
        let mut draft = record.clone();
        draft.capacity = canonical_capacity(&record.capacity);
        draft
    }

    /// A field is present when it is neither unset nor empty.
    pub fn is_present(&self, field: DraftField) -> bool {
        match field {
            DraftField::Title => !self.title.is_empty(),
            DraftField::Description => !self.description.is_empty(),
            DraftField::Category => !self.category.is_empty(),
            DraftField::DayType | DraftField::EventType | DraftField::IsFree | DraftField::Status => true,
            DraftField::Date => !self.date.is_empty(),
            DraftField::DateRange => self.date_range.as_ref().is_some_and(DateRange::is_filled),
            DraftField::Time => !self.time.is_empty(),
            DraftField::Duration => !self.duration.is_empty(),
            DraftField::Price => !self.price.is_empty(),
            DraftField::Venue => !self.venue.is_empty(),
            DraftField::VirtualLink => !self.virtual_link.is_empty(),
            DraftField::CoverImage => !self.cover_image.is_empty(),
            DraftField::Poster => !self.poster.is_empty(),
            DraftField::GalleryImages => !self.gallery_images.is_empty(),
            DraftField::Course => !self.course.is_empty(),
            DraftField::Department => !self.department.is_empty(),
            DraftField::Year => self.year.values().any(|years| !years.is_empty()),
            DraftField::Capacity => !self.capacity.is_empty(),
            DraftField::Organizer => !self.organizer.is_empty(),
        }
    }

    /// Drops courses without any selected year and adds courses that have
    /// years but are missing from the course list.
    pub fn sync_audience(&mut self) {
        self.year.retain(|_, years| !years.is_empty());
        self.course.retain(|course| self.year.contains_key(course));
        for course in self.year.keys() {
            if !self.course.contains(course) {
                self.course.push(course.clone());
            }
        }
    }
}

/// Canonical integer-string form of a capacity value ("0100" -> "100").
/// Non-numeric input is returned trimmed so validation can report it.
pub fn canonical_capacity(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(value) => value.to_string(),
        Err(_) => trimmed.to_string(),
    }
}
