//! Data models for health records and API payloads
//!
//! Defines the core data structures used throughout the application.
//! Wire types use camelCase field names to stay compatible with the
//! existing frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::metrics::{ActivityLevel, BmiCategory, Gender};

/// Validated body measurement pair, the engine's primary input.
///
/// Exists only transiently between validation and computation; it is
/// never stored as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Measurement {
    /// Weight in kilograms
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight_kg: f64,

    /// Height in centimeters
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: f64,
}

/// A persisted health calculation, one per saved engine invocation.
///
/// Append-only: records are never updated or deleted, and history
/// queries return them newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: Uuid,

    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,

    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub bmi_category: BmiCategory,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,

    pub created_at: DateTime<Utc>,
}

/// Measurement plus the demographic fields the BMR formula needs.
#[derive(Debug, Clone, Copy)]
pub struct PersonProfile {
    pub measurement: Measurement,
    pub age_years: u32,
    pub gender: Gender,
}

/// Registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input DTO for POST /api/health/bmi.
///
/// Height and weight are required; the rest widen the response with
/// BMR and daily-calorie estimates when present. Presence checks
/// happen in the validation layer so missing fields produce the
/// domain's own error messages rather than a deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    #[serde(default)]
    pub save_data: bool,
}

/// Input DTO for POST /api/health/calorie-goal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieGoalRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal_type: Option<String>,
    #[serde(default)]
    pub save_data: bool,
}

/// Response body for POST /api/health/bmi.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub height: f64,
    pub weight: f64,
    /// Null unless age and gender were supplied
    pub bmr: Option<i32>,
    /// Null unless age, gender and activity level were supplied
    pub daily_calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_record_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}

/// Response body for POST /api/health/calorie-goal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieGoalResponse {
    pub bmr: i32,
    pub daily_calories: i32,
    /// Null when no goal type was requested
    pub goal_calories: Option<i32>,
    pub goal_type: Option<String>,
    pub height: f64,
    pub weight: f64,
    pub age: u32,
    pub gender: String,
    pub activity_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_record_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}

/// Response body for GET /api/health/history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HealthRecord>,
    pub count: usize,
}

/// Input DTO for POST /api/auth/register.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Input DTO for POST /api/auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body for successful register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Liveness probe response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
}
