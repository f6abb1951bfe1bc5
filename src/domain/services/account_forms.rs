use regex::Regex;
use std::sync::LazyLock;
use crate::domain::models::account::{CreateOrganizerForm, EditOrganizerForm, FieldError};

// Constant patterns; the test module compiles both.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{10}$").expect("valid phone pattern")
});

const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_create(form: &CreateOrganizerForm) -> Vec<FieldError> {
    let mut errors = validate_profile(&form.name, &form.email, &form.phone, &form.college);
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    errors
}

pub fn validate_edit(form: &EditOrganizerForm) -> Vec<FieldError> {
    validate_profile(&form.name, &form.email, &form.phone, &form.college)
}

fn validate_profile(name: &str, email: &str, phone: &str, college: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().len() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if !PHONE_RE.is_match(phone.trim()) {
        errors.push(FieldError::new("phone", "Phone number must be 10 digits"));
    }
    if college.trim().is_empty() {
        errors.push(FieldError::new("college", "Select a college"));
    }
    errors
}
