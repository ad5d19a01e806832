/// Authorization for core operations.
///
/// Identity comes from the external provider (see `server::middleware`); the core
/// never reads it from ambient state. Every operation takes an [`Actor`] and
/// re-checks the role it needs:
///
/// ```ignore
/// actor.can(Capability::ProposeEvents).check()?;
/// ```
mod builder;
mod capability;
mod role;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use role::Role;
