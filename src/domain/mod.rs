pub mod record;

pub use record::{LatLng, PolygonRecord, Ring};
