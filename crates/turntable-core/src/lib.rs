pub mod analysis;
pub mod composite;
pub mod consts;
pub mod detection;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod transform;
pub mod verify;
