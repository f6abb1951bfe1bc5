use crate::domain::models::patch::DraftPatch;
use crate::domain::wizard::FormContext;

pub const CATEGORIES: &[&str] = &[
    "technical",
    "cultural",
    "sports",
    "workshop",
    "seminar",
    "competition",
    "other",
];

/// Title, description, category and pricing.
#[derive(Debug, Default)]
pub struct BasicDetailsEditor {
    category_query: String,
}

impl BasicDetailsEditor {
    pub fn set_title(&mut self, ctx: &mut dyn FormContext, title: &str) {
        ctx.update_form_data(DraftPatch { title: Some(title.to_string()), ..Default::default() });
    }

    pub fn set_description(&mut self, ctx: &mut dyn FormContext, description: &str) {
        ctx.update_form_data(DraftPatch { description: Some(description.to_string()), ..Default::default() });
    }

    pub fn set_category(&mut self, ctx: &mut dyn FormContext, category: &str) {
        self.category_query.clear();
        ctx.update_form_data(DraftPatch { category: Some(category.to_string()), ..Default::default() });
    }

    /// Switching to free keeps the typed price around; it is simply ignored
    /// until the event becomes paid again.
    pub fn set_free(&mut self, ctx: &mut dyn FormContext, is_free: bool) {
        ctx.update_form_data(DraftPatch { is_free: Some(is_free), ..Default::default() });
    }

    pub fn set_price(&mut self, ctx: &mut dyn FormContext, price: &str) {
        ctx.update_form_data(DraftPatch { price: Some(price.trim().to_string()), ..Default::default() });
    }

    pub fn set_category_query(&mut self, query: &str) {
        self.category_query = query.to_string();
    }

    pub fn category_query(&self) -> &str {
        &self.category_query
    }

    pub fn matching_categories(&self) -> Vec<&'static str> {
        let query = self.category_query.to_lowercase();
        CATEGORIES
            .iter()
            .copied()
            .filter(|c| c.contains(query.as_str()))
            .collect()
    }
}
