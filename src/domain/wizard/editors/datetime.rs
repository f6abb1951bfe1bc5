use crate::domain::models::{
    event::{DateRange, DayType},
    patch::DraftPatch,
};
use crate::domain::wizard::FormContext;

#[derive(Debug, Default)]
pub struct DateTimeEditor {
    calendar_open: bool,
}

impl DateTimeEditor {
    pub fn set_day_type(&mut self, ctx: &mut dyn FormContext, day_type: DayType) {
        self.calendar_open = false;
        ctx.update_form_data(DraftPatch { day_type: Some(day_type), ..Default::default() });
    }

    pub fn set_date(&mut self, ctx: &mut dyn FormContext, date: &str) {
        self.calendar_open = false;
        ctx.update_form_data(DraftPatch { date: Some(date.to_string()), ..Default::default() });
    }

    /// Picking a range end before its start swaps the two.
    pub fn set_date_range(&mut self, ctx: &mut dyn FormContext, from: &str, to: &str) {
        let range = if !from.is_empty() && !to.is_empty() && to < from {
            DateRange::new(to, from)
        } else {
            DateRange::new(from, to)
        };
        if range.is_filled() {
            self.calendar_open = false;
        }
        ctx.update_form_data(DraftPatch { date_range: Some(range), ..Default::default() });
    }

    pub fn set_time(&mut self, ctx: &mut dyn FormContext, time: &str) {
        ctx.update_form_data(DraftPatch { time: Some(time.to_string()), ..Default::default() });
    }

    pub fn set_duration(&mut self, ctx: &mut dyn FormContext, duration: &str) {
        ctx.update_form_data(DraftPatch { duration: Some(duration.trim().to_string()), ..Default::default() });
    }

    pub fn toggle_calendar(&mut self) {
        self.calendar_open = !self.calendar_open;
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }
}
