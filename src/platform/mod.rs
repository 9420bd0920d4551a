//! Platform abstraction layer
//!
//! Handles browser/native differences for persistence (LocalStorage on web,
//! JSON files under the user data directory natively).

pub mod storage;
