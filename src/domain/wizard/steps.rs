//! Steps of the event request / edit wizard and their navigation rules.
//!
//! Steps are linear indices `0..=4`. Any step may be jumped to directly;
//! only the final submit is gated.

use serde::{Deserialize, Serialize};
use crate::domain::models::event::DraftField;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    BasicDetails,
    DateTime,
    Location,
    Media,
    Audience,
}

impl WizardStep {
    pub fn all() -> &'static [Self] {
        &[
            Self::BasicDetails,
            Self::DateTime,
            Self::Location,
            Self::Media,
            Self::Audience,
        ]
    }

    pub const LAST_INDEX: usize = 4;

    /// Step at `index`, clamped to the valid range.
    pub fn from_index(index: usize) -> Self {
        Self::all()[index.min(Self::LAST_INDEX)]
    }

    pub fn index(self) -> usize {
        match self {
            Self::BasicDetails => 0,
            Self::DateTime => 1,
            Self::Location => 2,
            Self::Media => 3,
            Self::Audience => 4,
        }
    }

    // Both directions clamp at the ends.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn is_first(self) -> bool {
        self == Self::BasicDetails
    }

    pub fn is_last(self) -> bool {
        self == Self::Audience
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicDetails => "Basic Details",
            Self::DateTime => "Date & Time",
            Self::Location => "Location",
            Self::Media => "Media",
            Self::Audience => "Target Audience",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::BasicDetails => "Name the event, describe it and set pricing",
            Self::DateTime => "Choose a single day or a date range and the start time",
            Self::Location => "Pick a venue or provide a link for virtual events",
            Self::Media => "Upload a cover image, poster and gallery",
            Self::Audience => "Select eligible courses, years and departments",
        }
    }

    /// Draft fields edited on this step.
    pub fn fields(self) -> &'static [DraftField] {
        match self {
            Self::BasicDetails => &[
                DraftField::Title,
                DraftField::Description,
                DraftField::Category,
                DraftField::IsFree,
                DraftField::Price,
            ],
            Self::DateTime => &[
                DraftField::DayType,
                DraftField::Date,
                DraftField::DateRange,
                DraftField::Time,
                DraftField::Duration,
            ],
            Self::Location => &[
                DraftField::EventType,
                DraftField::Venue,
                DraftField::VirtualLink,
            ],
            Self::Media => &[
                DraftField::CoverImage,
                DraftField::Poster,
                DraftField::GalleryImages,
            ],
            Self::Audience => &[
                DraftField::Course,
                DraftField::Year,
                DraftField::Department,
                DraftField::Capacity,
            ],
        }
    }
}
