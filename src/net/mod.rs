//! Networking modules for the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` defines the service contract the screen consumes, `gotrue` is the
//! HTTP implementation, `subscription` handles session-change listeners, and
//! `types` defines the wire schema.

pub mod auth;
pub mod gotrue;
pub mod subscription;
pub mod types;
