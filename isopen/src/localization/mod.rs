pub(crate) mod coordinates;
pub(crate) mod holidays;
pub(crate) mod solar;

pub use crate::localization::coordinates::Coordinates;
pub use crate::localization::holidays::{HolidayCalendar, HolidayProvider};
pub use crate::localization::solar::{SolarProvider, SunriseSolar};
