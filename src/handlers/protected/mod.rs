// handlers/protected/mod.rs - handlers behind `jwt_auth_middleware`
//
// Every handler here receives the `AuthUser` extension and derives its data
// scope from it; nothing reads the user from ambient state.

pub mod auth; // Session introspection
pub mod dashboard; // Role dashboards and statistics
