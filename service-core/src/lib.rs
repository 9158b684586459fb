//! service-core: Shared infrastructure for the tenant onboarding crates.
pub mod config;
pub mod observability;
