pub mod julian;
pub mod solar_time;
pub mod sun;

pub use julian::{date_to_julian_day, datetime_from_julian_date, julian_date, julian_day_to_date};
pub use solar_time::{equation_of_time, true_solar_time, TrueSolarTime, DEFAULT_STANDARD_MERIDIAN};
pub use sun::{apparent_solar_longitude, normalize_degrees, solar_longitude_at};
