// Handler tiers
//
// Public (no auth) → Protected (bearer token resolved to a stored user)
pub mod protected; // Bearer token required
pub mod public; // No authentication required
