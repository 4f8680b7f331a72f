//! Input validation module
//!
//! All range and presence checks happen here, before any calculation
//! runs. The calculation engine never sees an unvalidated value, and a
//! non-finite number is always a validation error rather than
//! something to be coerced.

use tracing::{debug, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::metrics::{ActivityLevel, Gender};
use crate::models::{BmiRequest, CalorieGoalRequest, Measurement, PersonProfile, RegisterRequest};

/// Accepted input ranges for health calculations
pub struct HealthConstraints;

impl HealthConstraints {
    /// Height range (centimeters)
    pub const HEIGHT_MIN: f64 = 50.0;
    pub const HEIGHT_MAX: f64 = 300.0;

    /// Weight range (kilograms)
    pub const WEIGHT_MIN: f64 = 20.0;
    pub const WEIGHT_MAX: f64 = 500.0;

    /// Age range (years)
    pub const AGE_MIN: u32 = 1;
    pub const AGE_MAX: u32 = 150;
}

/// Validate a BMI request and produce the measurement the engine will
/// consume. Age/gender/activity level are optional here; when present
/// the age still has to be in range.
pub fn validate_bmi_request(req: &BmiRequest) -> AppResult<Measurement> {
    let (height, weight) = match (req.height, req.weight) {
        (Some(h), Some(w)) => (h, w),
        _ => {
            warn!("BMI request missing required fields");
            return Err(AppError::ValidationError(
                "Height and weight are required".to_string(),
            ));
        }
    };

    validate_height(height)?;
    validate_weight(weight)?;

    if let Some(age) = req.age {
        validate_age(age)?;
    }

    debug!("BMI request validation passed");
    Ok(Measurement {
        weight_kg: weight,
        height_cm: height,
    })
}

/// Validate a calorie-goal request. Height, weight, age, gender and
/// activity level are all required; goal type stays optional.
pub fn validate_calorie_goal_request(
    req: &CalorieGoalRequest,
) -> AppResult<(PersonProfile, ActivityLevel)> {
    let (height, weight, age, gender, activity) = match (
        req.height,
        req.weight,
        req.age,
        req.gender.as_deref(),
        req.activity_level.as_deref(),
    ) {
        (Some(h), Some(w), Some(a), Some(g), Some(al)) => (h, w, a, g, al),
        _ => {
            warn!("Calorie goal request missing required fields");
            return Err(AppError::ValidationError(
                "Height, weight, age, gender, and activity level are required".to_string(),
            ));
        }
    };

    validate_height(height)?;
    validate_weight(weight)?;
    validate_age(age)?;

    let profile = PersonProfile {
        measurement: Measurement {
            weight_kg: weight,
            height_cm: height,
        },
        age_years: age,
        gender: Gender::parse(gender),
    };

    debug!("Calorie goal request validation passed");
    Ok((profile, ActivityLevel::parse(activity)))
}

/// Validate a registration request via its declared field constraints.
pub fn validate_register_request(req: &RegisterRequest) -> AppResult<()> {
    if let Err(validation_errors) = req.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let msgs: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|c| c.as_ref()))
                    .collect();
                format!("{}: {}", field, msgs.join(", "))
            })
            .collect();

        warn!(errors = ?error_messages, "Registration validation failed");
        return Err(AppError::ValidationError(error_messages.join("; ")));
    }

    Ok(())
}

/// Validate a height value in centimeters
fn validate_height(value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::ValidationError(
            "Height must be a finite number".to_string(),
        ));
    }

    if value < HealthConstraints::HEIGHT_MIN || value > HealthConstraints::HEIGHT_MAX {
        return Err(AppError::ValidationError(
            "Height must be between 50 and 300 cm".to_string(),
        ));
    }

    Ok(())
}

/// Validate a weight value in kilograms
fn validate_weight(value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::ValidationError(
            "Weight must be a finite number".to_string(),
        ));
    }

    if value < HealthConstraints::WEIGHT_MIN || value > HealthConstraints::WEIGHT_MAX {
        return Err(AppError::ValidationError(
            "Weight must be between 20 and 500 kg".to_string(),
        ));
    }

    Ok(())
}

/// Validate an age value in years
fn validate_age(value: u32) -> AppResult<()> {
    if value < HealthConstraints::AGE_MIN || value > HealthConstraints::AGE_MAX {
        return Err(AppError::ValidationError(
            "Age must be between 1 and 150 years".to_string(),
        ));
    }

    Ok(())
}
