pub mod cli;
pub mod errors;
pub mod gate;
pub mod report;
pub mod runtime;
pub mod utils;

pub use errors::GateError;
