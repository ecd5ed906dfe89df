// ARChide - app/mod.rs
//
// Application layer: run orchestration and console reporting.
// Dependencies: core, platform.

pub mod report;
pub mod run;
