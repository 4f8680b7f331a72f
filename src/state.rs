//! Application state management
//!
//! Central state container for the FitLife backend, holding registered
//! users and their append-only health record history. All access goes
//! through an `Arc<RwLock<AppState>>` shared across request handlers.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{HealthRecord, User};

/// Central application state
#[derive(Debug)]
pub struct AppState {
    /// Registered users keyed by lowercased email
    users: HashMap<String, User>,
    /// Per-user health records, oldest first. Append-only.
    records: HashMap<Uuid, Vec<HealthRecord>>,
    /// Application start time
    start_time: DateTime<Utc>,
    /// Total records persisted since startup
    total_records: u64,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        info!("Initializing application state");
        Self {
            users: HashMap::new(),
            records: HashMap::new(),
            start_time: Utc::now(),
            total_records: 0,
        }
    }

    /// Register a user. Returns false if the email is already taken.
    pub fn insert_user(&mut self, user: User) -> bool {
        let key = user.email.to_lowercase();
        if self.users.contains_key(&key) {
            return false;
        }

        info!(user_id = %user.id, "Registered new user");
        self.users.insert(key, user);
        true
    }

    /// Look up a user by email (case-insensitive).
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.get(&email.to_lowercase())
    }

    /// Append a health record to its owner's history.
    pub fn add_record(&mut self, record: HealthRecord) {
        self.total_records += 1;

        debug!(
            record_id = %record.id,
            user_id = %record.user_id,
            total = self.total_records,
            "Persisting health record"
        );

        self.records.entry(record.user_id).or_default().push(record);
    }

    /// Get up to `limit` most recent records for a user, newest first.
    pub fn history(&self, user_id: Uuid, limit: usize) -> Vec<HealthRecord> {
        self.records
            .get(&user_id)
            .map(|records| records.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Get the most recent record for a user.
    pub fn latest(&self, user_id: Uuid) -> Option<&HealthRecord> {
        self.records.get(&user_id).and_then(|records| records.last())
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.start_time).num_seconds() as u64
    }

    /// Total records persisted since startup
    pub fn total_records(&self) -> u64 {
        self.total_records
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BmiCategory;

    fn record_for(user_id: Uuid, weight: f64) -> HealthRecord {
        HealthRecord {
            id: Uuid::new_v4(),
            user_id,
            height: 175.0,
            weight,
            bmi: 22.9,
            bmi_category: BmiCategory::NormalWeight,
            age: None,
            gender: None,
            activity_level: None,
            created_at: Utc::now(),
        }
    }

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert_eq!(state.total_records(), 0);
        assert!(state.latest(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_user_registration_rejects_duplicates() {
        let mut state = AppState::new();

        assert!(state.insert_user(user("alex@example.com")));
        assert!(!state.insert_user(user("alex@example.com")));
        // Email comparison is case-insensitive
        assert!(!state.insert_user(user("Alex@Example.com")));
    }

    #[test]
    fn test_find_user_by_email() {
        let mut state = AppState::new();
        state.insert_user(user("alex@example.com"));

        assert!(state.find_user_by_email("ALEX@example.com").is_some());
        assert!(state.find_user_by_email("other@example.com").is_none());
    }

    #[test]
    fn test_add_and_fetch_records() {
        let mut state = AppState::new();
        let user_id = Uuid::new_v4();

        state.add_record(record_for(user_id, 70.0));
        state.add_record(record_for(user_id, 71.0));

        assert_eq!(state.total_records(), 2);
        assert_eq!(state.latest(user_id).unwrap().weight, 71.0);
    }

    #[test]
    fn test_history_newest_first_with_limit() {
        let mut state = AppState::new();
        let user_id = Uuid::new_v4();

        for i in 0..10 {
            state.add_record(record_for(user_id, 70.0 + f64::from(i)));
        }

        let history = state.history(user_id, 5);
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].weight, 79.0);
        assert_eq!(history[4].weight, 75.0);
    }

    #[test]
    fn test_history_isolated_per_user() {
        let mut state = AppState::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        state.add_record(record_for(user_a, 70.0));
        state.add_record(record_for(user_b, 90.0));

        assert_eq!(state.history(user_a, 50).len(), 1);
        assert_eq!(state.latest(user_b).unwrap().weight, 90.0);
        assert!(state.history(Uuid::new_v4(), 50).is_empty());
    }
}
