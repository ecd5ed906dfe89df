// ARChide - platform/mod.rs
//
// Platform abstraction layer: filesystem mutation and the interactive console.
// Dependencies: standard library.
// Must NOT depend on: core, app.

pub mod console;
pub mod fs;
