//! `opsdesk-rbac` — pure authorization boundary for account administration.
//!
//! This crate is intentionally decoupled from HTTP and storage: the registry
//! holds seeded role/permission data, and the engine is a pure decision
//! function over a resolved permission set.

pub mod engine;
pub mod permission;
pub mod registry;
pub mod role;

pub use engine::{authorize, AccountAction, Actor};
pub use permission::{perms, Permission};
pub use registry::{RoleRegistry, RoleSelector};
pub use role::{Role, RoleDef};
