//! Benchmark categories by threading

pub mod marching;
pub mod multi_thread;
pub mod single_thread;
