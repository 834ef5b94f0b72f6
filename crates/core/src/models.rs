pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod response;
pub mod specialty;
