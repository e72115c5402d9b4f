pub mod planner;

pub use planner::{plan_transform, target_size, uniform_size, Transform};
