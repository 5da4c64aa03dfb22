pub mod attendance_service;
pub mod department_service;
pub mod import_service;

pub use attendance_service::{AttendanceService, DailyAttendance};
pub use department_service::{DepartmentInput, DepartmentService};
pub use import_service::{ImportReport, ImportService, RowFailure};
