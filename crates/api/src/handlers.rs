pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod specialty;
