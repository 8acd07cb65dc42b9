pub mod convert;
pub mod engine;
pub mod viewport;

pub use convert::{multi_polygon_to_rings, record_to_multi_polygon};
pub use engine::{GeoEngine, GeometryEngine, Operation};
pub use viewport::{Bounds, centroid};
