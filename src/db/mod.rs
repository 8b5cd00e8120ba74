//! Storage layer (per-user JSON documents).

pub mod store;

pub use store::LogStore;

/// Collection names as constants.
pub mod collections {
    /// Activity emission records (append-only)
    pub const DAILY_ACTIVITIES: &str = "daily_activities";
    /// Material logs (append-only)
    pub const MATERIAL_LOGS: &str = "logs";
    /// User profile (single document)
    pub const USER_PROFILE: &str = "user_profile";
}
