//! # Clinic Core
//!
//! Domain types and rules shared by the storage and HTTP crates: the
//! appointment model, the availability engine that turns a doctor's working
//! hours into bookable slots, and the booking guard that keeps two active
//! appointments off the same slot.

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod store;
