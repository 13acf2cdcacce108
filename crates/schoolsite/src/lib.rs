//! Multi-tenant school website platform.
//!
//! A request's host decides which application tree serves it: the platform's
//! marketing site, a registered school's site rendered through one of the
//! templates, or the fallback for domains nobody has configured.

pub mod config;
pub mod edge;
pub mod error;
pub mod service;
pub mod sites;
pub mod telemetry;
pub mod templates;
pub mod tenant;
