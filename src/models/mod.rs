pub mod communication;
pub mod project;
pub mod status;
pub mod urgency;
