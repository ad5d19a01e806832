// Domain modules
pub mod approvals;
pub mod auth;
pub mod events;
pub mod registrations;
