pub mod alerts;
pub mod calculator;
pub mod clock;
pub mod communication;
pub mod deadlines;
pub mod gantt;
pub mod log;
pub mod notify;
pub mod projects;
pub mod session;
pub mod store;
