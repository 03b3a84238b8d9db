//! SkyWrangler CLI - command line tools for survey mission plans.
//!
//! This crate provides:
//! - plan_mission: turn a mission parameters record into a `.plan` file

pub mod io;
pub mod logging;

pub use io::{read_request, write_plan};
pub use logging::init_tracing;
