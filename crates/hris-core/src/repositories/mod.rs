//! Repository traits (ports)

pub mod attendance_repository;
pub mod employee_repository;
pub mod photo_storage;

pub use attendance_repository::AttendanceRepository;
pub use employee_repository::EmployeeRepository;
pub use photo_storage::PhotoStorage;

#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use photo_storage::MockPhotoStorage;
