//! Distributed fixed-window rate limiting.

pub mod fixed_window;

pub use fixed_window::{FixedWindowLimiter, LimitDecision};
