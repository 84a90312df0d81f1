//! Background tasks module
//!
//! The cancellable scheduler, the loop that owns the dial timer, and the
//! tasks that feed it input and print its frames.

pub mod event_loop;
pub mod frame_writer;
pub mod pointer_reader;
pub mod scheduler;

// Re-export main functions
pub use event_loop::run_dial_timer;
pub use frame_writer::frame_writer_task;
pub use pointer_reader::pointer_reader_task;
pub use scheduler::{Scheduler, TimerFired, TimerHandle, TimerKind};
