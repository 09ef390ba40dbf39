mod place;

pub use place::{Place, Placeable};
