pub mod calculator;
pub mod checkin;
pub mod log;
pub mod policy;
pub mod refresh;
pub mod status;
