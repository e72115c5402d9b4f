pub mod config;
pub mod occupancy;
pub mod subject;

pub use config::DetectionConfig;
pub use occupancy::{occupancy_mask, occupancy_weights, with_synthesized_alpha};
pub use subject::{detect_in_weights, detect_subject, Detection};
