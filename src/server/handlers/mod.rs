pub mod attendance;
pub mod departments;
pub mod health;
pub mod uploads;
