pub mod garden;
pub mod logbook_entry;
pub mod plant;
pub mod plant_bed;
pub mod session;
pub mod task;
pub mod user;
