//! Command line front end for the Open Drone ID codec.
//!
//! - `odid decode`: hex-encoded messages in, a JSON or text report out.
//! - `odid build`: a YAML broadcast profile in, hex-encoded messages out.

mod error;
mod profile;
mod report;

pub use error::*;
pub use profile::*;
pub use report::*;
