//! Build file generation
//!
//! - `QmakeGenerator`: emits a qmake `.pro` file from flattened file lists and
//!   a configuration set
//! - `QmakeSettings`: exporter-wide flags and libraries the generator reads

mod error;
mod qmake;

pub use error::{GenerateError, GenerateResult};
pub use qmake::{QmakeGenerator, QmakeSettings};
