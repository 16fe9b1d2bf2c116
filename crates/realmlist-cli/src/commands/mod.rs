//! Handlers for each output mode.

pub(crate) mod lua;
pub(crate) mod realms;
