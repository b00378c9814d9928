pub mod classification;
pub mod constructors;
pub mod types;

pub use classification::ErrorKind;
pub use constructors::*;
pub use types::{Error, Result};
