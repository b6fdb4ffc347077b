use serde::Serialize;
use strum::{Display, EnumString};

/// Work-type code attached to every row of the timesheet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
pub enum WorkType {
    /// Regular on-site work.
    #[strum(serialize = "001")]
    Regular,
    #[strum(serialize = "002")]
    BusinessTrip,
}
