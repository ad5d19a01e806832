//! Auth domain - the boundary with the external identity provider
//!
//! The provider signs a JWT carrying the caller's member id and role claim.
//! This domain only verifies it and turns it into an explicit `Actor`; sessions,
//! sign-up and passwords live with the provider.

pub mod jwt;

pub use jwt::{Claims, JwtService};
