pub mod command_input;
pub mod deadline_timer;
pub mod echo_capture;
pub mod range_measure;
pub mod report;
