//! polymerge - Select polygons from GeoJSON feature collections and merge
//! them by union or intersection

pub mod combinator;
pub mod config;
pub mod domain;
pub mod error;
pub mod feature;
pub mod files;
pub mod geometry;
pub mod loader;
pub mod selection;
pub mod view;

pub use error::{Error, Result};
