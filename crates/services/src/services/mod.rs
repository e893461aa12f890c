//! Domain services on top of the database models.
//!
//! - [`bed_codes`] - letter-code sequencing for plant beds
//! - [`bloom_calendar`] - Dutch month-range parsing and sowing advice
//! - [`save_retry`] - retrying save wrapper with user-facing notifications
//! - [`error_messages`] - translation of raw errors into Dutch messages
//! - [`plant_beds`] - plant bed creation and soft deletion
//! - [`trash`] - listing, restoring and purging deleted items

pub mod bed_codes;
pub mod bloom_calendar;
pub mod error_messages;
pub mod notify;
pub mod plant_beds;
pub mod save_retry;
pub mod trash;
