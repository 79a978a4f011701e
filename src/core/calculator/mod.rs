pub mod aggregate;
pub mod time_math;
