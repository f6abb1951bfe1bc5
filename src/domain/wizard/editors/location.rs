use crate::domain::models::{event::EventType, patch::DraftPatch};
use crate::domain::wizard::FormContext;

#[derive(Debug, Default)]
pub struct LocationEditor {
    venue_query: String,
}

impl LocationEditor {
    pub fn set_event_type(&mut self, ctx: &mut dyn FormContext, event_type: EventType) {
        ctx.update_form_data(DraftPatch { event_type: Some(event_type), ..Default::default() });
    }

    pub fn set_venue(&mut self, ctx: &mut dyn FormContext, venue: &str) {
        self.venue_query.clear();
        ctx.update_form_data(DraftPatch { venue: Some(venue.to_string()), ..Default::default() });
    }

    pub fn set_virtual_link(&mut self, ctx: &mut dyn FormContext, link: &str) {
        ctx.update_form_data(DraftPatch { virtual_link: Some(link.trim().to_string()), ..Default::default() });
    }

    pub fn set_venue_query(&mut self, query: &str) {
        self.venue_query = query.to_string();
    }

    /// Case-insensitive filter over known venues.
    pub fn venue_suggestions<'a>(&self, venues: &'a [String]) -> Vec<&'a str> {
        let query = self.venue_query.trim().to_lowercase();
        venues
            .iter()
            .filter(|v| query.is_empty() || v.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}
