//! Flutter-facing bindings for the Marslink feed core.

pub mod api;
