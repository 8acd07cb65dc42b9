use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON position, longitude first. Extra elements such as altitude are
/// accepted on input and dropped on load.
pub type Position = Vec<f64>;

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

/// A GeoJSON FeatureCollection holding polygon features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Foreign members such as `bbox` or `crs`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn new(name: Option<String>, features: Vec<Feature>) -> Self {
        Self {
            type_: feature_collection_type(),
            name,
            features,
            extra: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub type_: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Foreign members such as `id` or `bbox`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Option<Map<String, Value>>) -> Self {
        Self {
            type_: feature_type(),
            properties,
            geometry: Some(geometry),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

/// Geometry of a feature. Only polygonal types are meaningful here, anything
/// else deserializes to `Unsupported` and is rejected by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Unsupported,
}
