pub mod collection;
pub mod io;

pub use collection::{Feature, FeatureCollection, Geometry, Position};
pub use io::{read_collection, write_collection};
