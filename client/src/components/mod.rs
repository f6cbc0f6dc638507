//! Reusable UI components shared by the route pages.

pub mod navbar;
pub mod protected_route;
