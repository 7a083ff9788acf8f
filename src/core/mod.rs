pub mod channel;
pub mod functions;
pub mod queue;
pub mod timer;
