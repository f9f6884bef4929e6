//! Gateway test support utilities
//!
//! Shared by the gateway's unit tests and every integration test binary.

pub mod logging;
