//! Core system components for the range finder
pub mod capture;
pub mod clock;
pub mod control;
pub mod deadline;
pub mod event;
pub mod resources;
