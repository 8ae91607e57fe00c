//! Command handlers grouped by registry family.
//!
//! Handlers return the rendered output; the dispatcher prints it.

pub(crate) mod config;
pub(crate) mod descriptors;
pub(crate) mod experiments;
pub(crate) mod projects;
pub(crate) mod provenance;
pub(crate) mod workflows;
