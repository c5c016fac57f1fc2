//! Data models for VenueSync

pub mod revenue_day;

// Re-export commonly used types
pub use revenue_day::RevenueDay;
