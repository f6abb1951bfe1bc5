use std::collections::{BTreeMap, BTreeSet};
use serde::Serialize;
use crate::domain::models::patch::DraftPatch;
use crate::domain::wizard::FormContext;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CourseOption {
    pub name: String,
    pub years: Vec<String>,
}

/// Courses (with their years) and departments an event can target.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AudienceCatalog {
    pub courses: Vec<CourseOption>,
    pub departments: Vec<String>,
}

impl AudienceCatalog {
    pub fn standard() -> Self {
        let course = |name: &str, years: u8| CourseOption {
            name: name.to_string(),
            years: (1..=years).map(|y| y.to_string()).collect(),
        };
        Self {
            courses: vec![
                course("BTech", 4),
                course("MTech", 2),
                course("BCA", 3),
                course("MCA", 2),
                course("MBA", 2),
                course("BSc", 3),
            ],
            departments: ["CSE", "ECE", "ME", "CE", "EE", "Management", "Sciences"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    pub fn years_of(&self, course: &str) -> Option<&[String]> {
        self.courses.iter().find(|c| c.name == course).map(|c| c.years.as_slice())
    }
}

/// Course/year/department targeting plus capacity.
///
/// Courses and years are co-selected: a course counts as selected exactly
/// while at least one of its years is, so every year change also rewrites the
/// course list.
#[derive(Debug, Default)]
pub struct AudienceEditor {
    search: String,
    expanded: BTreeSet<String>,
}

impl AudienceEditor {
    pub fn toggle_year(&mut self, ctx: &mut dyn FormContext, course: &str, year: &str) {
        let mut years = ctx.draft().year.clone();
        let selected = years.entry(course.to_string()).or_default();
        match selected.iter().position(|y| y == year) {
            Some(idx) => {
                selected.remove(idx);
            }
            None => selected.push(year.to_string()),
        }
        ctx.update_form_data(audience_patch(years));
    }

    pub fn select_all_years(&mut self, ctx: &mut dyn FormContext, catalog: &AudienceCatalog, course: &str) {
        let Some(all) = catalog.years_of(course) else {
            return;
        };
        let mut years = ctx.draft().year.clone();
        years.insert(course.to_string(), all.to_vec());
        self.expanded.insert(course.to_string());
        ctx.update_form_data(audience_patch(years));
    }

    pub fn clear_course(&mut self, ctx: &mut dyn FormContext, course: &str) {
        let mut years = ctx.draft().year.clone();
        if years.remove(course).is_none() {
            return;
        }
        ctx.update_form_data(audience_patch(years));
    }

    pub fn toggle_department(&mut self, ctx: &mut dyn FormContext, department: &str) {
        let mut departments = ctx.draft().department.clone();
        match departments.iter().position(|d| d == department) {
            Some(idx) => {
                departments.remove(idx);
            }
            None => departments.push(department.to_string()),
        }
        ctx.update_form_data(DraftPatch { department: Some(departments), ..Default::default() });
    }

    pub fn set_capacity(&mut self, ctx: &mut dyn FormContext, capacity: &str) {
        ctx.update_form_data(DraftPatch { capacity: Some(capacity.trim().to_string()), ..Default::default() });
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }

    pub fn toggle_expanded(&mut self, course: &str) {
        if !self.expanded.remove(course) {
            self.expanded.insert(course.to_string());
        }
    }

    pub fn is_expanded(&self, course: &str) -> bool {
        self.expanded.contains(course)
    }

    pub fn visible_courses<'a>(&self, catalog: &'a AudienceCatalog) -> Vec<&'a CourseOption> {
        let query = self.search.trim().to_lowercase();
        catalog
            .courses
            .iter()
            .filter(|c| query.is_empty() || c.name.to_lowercase().contains(&query))
            .collect()
    }
}

fn audience_patch(mut years: BTreeMap<String, Vec<String>>) -> DraftPatch {
    years.retain(|_, selected| !selected.is_empty());
    let courses = years.keys().cloned().collect();
    DraftPatch {
        course: Some(courses),
        year: Some(years),
        ..Default::default()
    }
}
