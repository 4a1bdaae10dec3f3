pub mod dates;
pub mod math;
