pub mod clock_state;
pub mod pay_summary;
pub mod session;
