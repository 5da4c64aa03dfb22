pub mod departments;
pub mod employee_info;
pub mod employee_time_logs;
pub mod items;
