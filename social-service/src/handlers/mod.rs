//! HTTP handlers for social-service.

pub mod auth;
pub mod comments;
pub mod companies;
pub mod likes;
pub mod metrics;
pub mod posts;
pub mod user;
