pub mod ease;
pub mod scheduler;
pub mod tween;
