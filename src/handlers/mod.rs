// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (JWT auth, role-scoped data)
pub mod protected; // JWT authentication required (/api/*)
pub mod public; // No authentication required
