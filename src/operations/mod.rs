pub mod batch;
pub mod creation;
pub mod shaping;
pub mod transform;
