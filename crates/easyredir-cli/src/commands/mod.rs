//! Command handlers grouped by resource.

pub(crate) mod hosts;
pub(crate) mod rules;
