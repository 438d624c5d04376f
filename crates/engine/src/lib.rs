//! Reference discrete-event engine.
//!
//! [`SmplEngine`] implements the [`multirun_core::Engine`] contract with
//! single-server devices, FIFO queues and a seeded random stream. Models
//! use its extra methods (`reserve`, `enqueue`, `neg_exp`, ...) directly.

mod device;
mod engine;
mod error;
mod event_queue;
mod queue;

pub use device::Device;
pub use engine::{EngineStats, SmplEngine};
pub use error::EngineError;
pub use event_queue::EventKey;
pub use queue::Queue;
