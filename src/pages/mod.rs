//! Page modules for route-level screens.

pub mod sign_up;
