//! HTTP request handlers
//!
//! Implements the REST API: health-metric calculations, per-user
//! record history, and account registration/login. Validation runs
//! before any calculation; handlers never feed raw input to the
//! calculation engine.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::auth::{self, AuthUser};
use crate::config::Settings;
use crate::error::AppError;
use crate::metrics::{self, ActivityLevel, Gender, GoalType};
use crate::models::{
    AuthResponse, BmiRequest, BmiResponse, CalorieGoalRequest, CalorieGoalResponse,
    HealthRecord, HistoryResponse, LoginRequest, RegisterRequest, StatusResponse, User,
};
use crate::state::AppState;
use crate::validation::{
    validate_bmi_request, validate_calorie_goal_request, validate_register_request,
};

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Liveness probe
            .route("/status", web::get().to(status))
            // Account endpoints
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login)),
            )
            // Health calculation endpoints
            .service(
                web::scope("/health")
                    .route("/bmi", web::post().to(calculate_bmi))
                    .route("/calorie-goal", web::post().to(calculate_calorie_goal))
                    .route("/history", web::get().to(get_history))
                    .route("/latest", web::get().to(get_latest_record)),
            ),
    );
}

/// Liveness probe
///
/// GET /api/status
pub async fn status(
    state: web::Data<Arc<RwLock<AppState>>>,
) -> Result<HttpResponse, AppError> {
    let state = state.read().await;

    Ok(HttpResponse::Ok().json(StatusResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds(),
    }))
}

/// Register a new account
///
/// POST /api/auth/register
pub async fn register(
    state: web::Data<Arc<RwLock<AppState>>>,
    settings: web::Data<Settings>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    validate_register_request(&body)?;

    let user = User {
        id: Uuid::new_v4(),
        name: body.name.clone(),
        email: body.email.clone(),
        password_hash: auth::hash_password(&body.password)?,
        created_at: Utc::now(),
    };

    {
        let mut state = state.write().await;
        if !state.insert_user(user.clone()) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
    }

    let token = auth::create_token(
        &user,
        &settings.security.jwt_secret,
        settings.security.token_ttl_hours,
    )?;

    info!(user_id = %user.id, created_at = %user.created_at, "User registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// Exchange credentials for a bearer token
///
/// POST /api/auth/login
pub async fn login(
    state: web::Data<Arc<RwLock<AppState>>>,
    settings: web::Data<Settings>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let state = state.read().await;

    let user = state
        .find_user_by_email(&body.email)
        .filter(|user| auth::verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let token = auth::create_token(
        user,
        &settings.security.jwt_secret,
        settings.security.token_ttl_hours,
    )?;

    info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        token,
    }))
}

/// Calculate BMI, optionally enriched with BMR and daily calories
///
/// POST /api/health/bmi
///
/// Height and weight are required. BMR is included when age and gender
/// are supplied, daily calories when an activity level is supplied as
/// well. With `saveData`, the calculation is persisted to the caller's
/// history.
pub async fn calculate_bmi(
    user: AuthUser,
    state: web::Data<Arc<RwLock<AppState>>>,
    body: web::Json<BmiRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let correlation_id = extract_correlation_id(&req);

    let measurement = validate_bmi_request(&body)?;
    let bmi_result = metrics::compute_bmi(measurement.weight_kg, measurement.height_cm);

    let gender = body.gender.as_deref().map(Gender::parse);
    let activity_level = body.activity_level.as_deref().map(ActivityLevel::parse);

    let bmr = match (body.age, gender) {
        (Some(age), Some(gender)) => Some(metrics::compute_bmr(
            measurement.weight_kg,
            measurement.height_cm,
            age,
            gender,
        )),
        _ => None,
    };

    let daily_calories = match (bmr, activity_level) {
        (Some(bmr), Some(level)) => Some(metrics::compute_daily_calories(bmr, level)),
        _ => None,
    };

    let mut response = BmiResponse {
        bmi: bmi_result.bmi,
        category: bmi_result.category.as_str(),
        color: bmi_result.category.color(),
        description: bmi_result.category.description(),
        height: measurement.height_cm,
        weight: measurement.weight_kg,
        bmr,
        daily_calories,
        health_record_id: None,
        saved: None,
    };

    if body.save_data {
        let record = HealthRecord {
            id: Uuid::new_v4(),
            user_id: user.user_id,
            height: measurement.height_cm,
            weight: measurement.weight_kg,
            bmi: bmi_result.bmi,
            bmi_category: bmi_result.category,
            age: body.age,
            gender,
            activity_level,
            created_at: Utc::now(),
        };

        response.health_record_id = Some(record.id);
        response.saved = Some(true);

        let mut state = state.write().await;
        state.add_record(record);
    }

    info!(
        correlation_id = %correlation_id,
        user_id = %user.user_id,
        bmi = response.bmi,
        saved = body.save_data,
        "BMI calculated"
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Calculate a goal-adjusted calorie target
///
/// POST /api/health/calorie-goal
///
/// Requires height, weight, age, gender and activity level. The goal
/// type is optional; without one, only maintenance calories are
/// returned.
pub async fn calculate_calorie_goal(
    user: AuthUser,
    state: web::Data<Arc<RwLock<AppState>>>,
    body: web::Json<CalorieGoalRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let correlation_id = extract_correlation_id(&req);

    let (profile, activity_level) = validate_calorie_goal_request(&body)?;
    let measurement = profile.measurement;

    let bmr = metrics::compute_bmr(
        measurement.weight_kg,
        measurement.height_cm,
        profile.age_years,
        profile.gender,
    );
    let daily_calories = metrics::compute_daily_calories(bmr, activity_level);

    let goal_calories = body
        .goal_type
        .as_deref()
        .map(|goal| metrics::compute_goal_calories(daily_calories, GoalType::parse(goal)));

    let mut response = CalorieGoalResponse {
        bmr,
        daily_calories,
        goal_calories,
        goal_type: body.goal_type.clone(),
        height: measurement.height_cm,
        weight: measurement.weight_kg,
        age: profile.age_years,
        gender: profile.gender.as_str().to_string(),
        activity_level: activity_level.as_str().to_string(),
        health_record_id: None,
        saved: None,
    };

    if body.save_data {
        // The record also carries the BMI for this measurement so that
        // history entries are uniform across both endpoints.
        let bmi_result = metrics::compute_bmi(measurement.weight_kg, measurement.height_cm);

        let record = HealthRecord {
            id: Uuid::new_v4(),
            user_id: user.user_id,
            height: measurement.height_cm,
            weight: measurement.weight_kg,
            bmi: bmi_result.bmi,
            bmi_category: bmi_result.category,
            age: Some(profile.age_years),
            gender: Some(profile.gender),
            activity_level: Some(activity_level),
            created_at: Utc::now(),
        };

        response.health_record_id = Some(record.id);
        response.saved = Some(true);

        let mut state = state.write().await;
        state.add_record(record);
    }

    info!(
        correlation_id = %correlation_id,
        user_id = %user.user_id,
        bmr = bmr,
        daily_calories = daily_calories,
        "Calorie goal calculated"
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Get the caller's health history, newest first
///
/// GET /api/health/history
pub async fn get_history(
    user: AuthUser,
    state: web::Data<Arc<RwLock<AppState>>>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let state = state.read().await;
    let records = state.history(user.user_id, settings.history.limit);

    Ok(HttpResponse::Ok().json(HistoryResponse {
        count: records.len(),
        records,
    }))
}

/// Get the caller's most recent health record
///
/// GET /api/health/latest
pub async fn get_latest_record(
    user: AuthUser,
    state: web::Data<Arc<RwLock<AppState>>>,
) -> Result<HttpResponse, AppError> {
    let state = state.read().await;

    match state.latest(user.user_id) {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(AppError::NotFound("No health records found".to_string())),
    }
}

/// Extract or generate correlation ID from request headers
fn extract_correlation_id(req: &HttpRequest) -> String {
    req.headers()
        .get("X-Correlation-ID")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
