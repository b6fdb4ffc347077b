pub mod domain;
pub mod extract;
pub mod schedule;
pub mod source;

mod document;
mod filename;
mod heading;
mod locale;
mod ports;
mod service;

pub use document::*;
pub use filename::*;
pub use heading::*;
pub use ports::*;
pub use service::*;
