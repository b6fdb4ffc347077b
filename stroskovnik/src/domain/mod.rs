mod aggregate;
mod clock;
mod error;
mod period;
mod schedule;
mod settings;
mod work_type;

pub use aggregate::*;
pub use clock::*;
pub use error::*;
pub use period::*;
pub use schedule::*;
pub use settings::*;
pub use work_type::*;
