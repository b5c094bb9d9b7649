//! Input validation for create and update payloads

use practice::models::{
    NewAppointment, NewClient, NewPackage, NewPayment, NewService, NewSessionNote,
};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

fn check_rating(value: Option<i16>, field: &str, min: i16, max: i16) -> Result<(), String> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(format!(
            "{} must be between {} and {}",
            field, min, max
        )),
        _ => Ok(()),
    }
}

fn check_positive(value: Option<i32>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if v <= 0 => Err(format!("{} must be positive", field)),
        _ => Ok(()),
    }
}

/// Largest amount a `NUMERIC(10, 2)` column holds
fn max_money() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

fn check_money(value: Decimal, field: &str) -> Result<(), String> {
    if value < Decimal::ZERO {
        return Err(format!("{} must not be negative", field));
    }

    if value > max_money() {
        return Err(format!("{} must be at most {}", field, max_money()));
    }

    if value.normalize().scale() > 2 {
        return Err(format!("{} must have at most two decimal places", field));
    }

    Ok(())
}

pub fn validate_new_client(payload: &NewClient) -> Result<(), String> {
    require(&payload.first_name, "First name")?;
    require(&payload.last_name, "Last name")?;

    // An empty string from a cleared form field counts as no email
    if let Some(email) = payload.email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }

    Ok(())
}

pub fn validate_new_service(payload: &NewService) -> Result<(), String> {
    require(&payload.name, "Name")?;
    check_positive(payload.duration_minutes, "Duration")?;

    match payload.price {
        Some(price) => check_money(price, "Price"),
        None => Ok(()),
    }
}

pub fn validate_new_package(payload: &NewPackage) -> Result<(), String> {
    require(&payload.name, "Name")?;

    check_money(payload.price, "Price")?;

    if payload.session_count <= 0 {
        return Err("Session count must be positive".to_string());
    }

    check_positive(payload.validity_days, "Validity days")
}

pub fn validate_new_appointment(payload: &NewAppointment) -> Result<(), String> {
    require(&payload.title, "Title")?;

    if payload.start_time >= payload.end_time {
        return Err("Start time must be before end time".to_string());
    }

    Ok(())
}

pub fn validate_new_session_note(payload: &NewSessionNote) -> Result<(), String> {
    require(&payload.notes, "Notes")?;
    check_positive(payload.duration_minutes, "Duration")?;
    check_rating(payload.mood_rating, "Mood rating", 1, 10)?;
    check_rating(payload.energy_level, "Energy level", 1, 10)?;
    check_rating(payload.pain_level, "Pain level", 0, 10)
}

pub fn validate_new_payment(payload: &NewPayment) -> Result<(), String> {
    check_money(payload.amount, "Amount")?;

    if payload.currency.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err("Currency must not be blank".to_string());
    }

    Ok(())
}
