// ARChide - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, csv/serde for decoding and encoding.
// Must NOT depend on: platform, app, or touch the filesystem directly.

pub mod catalog;
pub mod export;
pub mod mapping;
pub mod model;
pub mod relocate;
pub mod validate;
