//! Authentication for the AIlways front end
//!
//! Nothing here validates credentials or sessions itself: the backend session
//! service is the only authority. This module asks it who the current user is
//! and gates protected pages on cookie presence.

pub mod guard;
pub mod identity;

pub use guard::{route_guard, GuardDecision, RouteGuard};
pub use identity::{get_me, CurrentUser, User};
