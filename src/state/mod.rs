//! Client-side state for the session screen.
//!
//! DESIGN
//! ======
//! `session` holds the plain view model, `store` abstracts where it lives
//! (signal or mutex), and `controller` drives it from the auth service.

pub mod controller;
pub mod session;
pub mod store;
