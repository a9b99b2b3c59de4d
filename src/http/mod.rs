//! Internal HTTP layer for Vertex AI communication.
//!
//! This module is `pub(crate)` - it contains implementation details
//! not exposed to library users.

pub(crate) mod common;
pub(crate) mod error_helpers;
pub(crate) mod generate;
pub(crate) mod loud_wire;
