mod engine;

pub use engine::{TickSink, TimerEngine, TimerStatus};
