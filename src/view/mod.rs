use crate::combinator::{CombineOutcome, combine};
use crate::config::{MapConfig, PathStyle, TileLayerConfig};
use crate::domain::{LatLng, Ring};
use crate::error::{Error, Result};
use crate::feature::FeatureCollection;
use crate::files::FileList;
use crate::geometry::{Bounds, GeoEngine, GeometryEngine, Operation, centroid};
use crate::loader::{load_records, to_feature_collection};
use crate::selection::SelectionTracker;
use log::debug;
use serde::Serialize;

/// Whether the map may combine polygons and write results back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapVariant {
    ReadWrite,
    ReadOnly,
}

/// State of the Union / Intersect buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub union_enabled: bool,
    pub intersect_enabled: bool,
}

/// One polygon overlay as drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub index: usize,
    pub rings: Vec<Ring>,
    pub selected: bool,
    pub style: PathStyle,
}

/// Everything needed to draw the map: tile layer, viewport and overlays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub variant: MapVariant,
    pub center: LatLng,
    pub zoom: u8,
    pub bounds: Bounds,
    pub tiles: TileLayerConfig,
    pub overlays: Vec<Overlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Controls>,
}

/// Interactive polygon map over one feature collection
pub struct MapView<E = GeoEngine> {
    variant: MapVariant,
    config: MapConfig,
    filename: Option<String>,
    source: FeatureCollection,
    tracker: SelectionTracker,
    center: Option<LatLng>,
    engine: E,
}

impl MapView<GeoEngine> {
    /// Map that can combine polygons and write them back under `filename`
    pub fn read_write(
        filename: impl Into<String>,
        collection: FeatureCollection,
        config: MapConfig,
    ) -> Result<Self> {
        Self::build(MapVariant::ReadWrite, Some(filename.into()), collection, config, GeoEngine)
    }

    /// Visualization only, no combination
    pub fn read_only(collection: FeatureCollection, config: MapConfig) -> Result<Self> {
        Self::build(MapVariant::ReadOnly, None, collection, config, GeoEngine)
    }
}

impl<E: GeometryEngine> MapView<E> {
    fn build(
        variant: MapVariant,
        filename: Option<String>,
        collection: FeatureCollection,
        config: MapConfig,
        engine: E,
    ) -> Result<Self> {
        let records = load_records(&collection)?;
        let tracker = SelectionTracker::new(records, config.palette.clone());
        let mut view = Self {
            variant,
            config,
            filename,
            source: collection,
            tracker,
            center: None,
            engine,
        };
        view.refresh_center();
        Ok(view)
    }

    /// Swap the geometry engine, keeping all other state
    pub fn with_engine<F: GeometryEngine>(self, engine: F) -> MapView<F> {
        MapView {
            variant: self.variant,
            config: self.config,
            filename: self.filename,
            source: self.source,
            tracker: self.tracker,
            center: self.center,
            engine,
        }
    }

    /// Reload after the input collection changed. Selection is reset.
    pub fn set_collection(&mut self, collection: FeatureCollection) -> Result<()> {
        let records = load_records(&collection)?;
        self.tracker.set_records(records);
        self.source = collection;
        self.refresh_center();
        Ok(())
    }

    fn refresh_center(&mut self) {
        if let Some(center) = centroid(self.tracker.records()) {
            self.center = Some(center);
        }
    }

    /// Toggle selection of the overlay at `index`
    pub fn click(&mut self, index: usize) -> Result<bool> {
        self.tracker.toggle(index)
    }

    pub fn union(&mut self, files: &mut FileList) -> Result<CombineOutcome> {
        self.run(Operation::Union, files)
    }

    pub fn intersect(&mut self, files: &mut FileList) -> Result<CombineOutcome> {
        self.run(Operation::Intersect, files)
    }

    fn run(&mut self, op: Operation, files: &mut FileList) -> Result<CombineOutcome> {
        let filename = match (self.variant, &self.filename) {
            (MapVariant::ReadWrite, Some(name)) => name.clone(),
            _ => return Err(Error::ReadOnly),
        };
        if files.get(&filename).is_none() {
            return Err(Error::UnknownFile(filename));
        }

        let outcome = combine(&self.engine, &mut self.tracker, op)?;
        if !outcome.is_combined() {
            return Ok(outcome);
        }

        self.refresh_center();
        let updated = to_feature_collection(self.tracker.records(), &self.source);
        files.replace(&filename, updated.clone())?;
        files.select(&filename)?;
        self.source = updated;
        debug!("Wrote {} polygons back to {}", self.tracker.len(), filename);

        Ok(outcome)
    }

    /// Render model of the map, or `None` when there is nothing to draw
    pub fn scene(&self) -> Option<MapScene> {
        let records = self.tracker.records();
        let center = self.center?;
        let bounds = Bounds::from_records(records)?;

        let overlays = records
            .iter()
            .zip(self.tracker.styles())
            .enumerate()
            .map(|(index, (record, style))| Overlay {
                index,
                rings: record.rings.clone(),
                selected: record.selected,
                style: style.clone(),
            })
            .collect();

        let controls = match self.variant {
            MapVariant::ReadWrite => Some(self.controls()),
            MapVariant::ReadOnly => None,
        };

        Some(MapScene {
            variant: self.variant,
            center,
            zoom: self.config.zoom,
            bounds,
            tiles: self.config.tiles.clone(),
            overlays,
            controls,
        })
    }

    pub fn controls(&self) -> Controls {
        let enabled = self.variant == MapVariant::ReadWrite && self.tracker.operation_permitted();
        Controls {
            union_enabled: enabled,
            intersect_enabled: enabled,
        }
    }

    pub fn variant(&self) -> MapVariant {
        self.variant
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Current polygons in the external feature collection format
    pub fn collection(&self) -> FeatureCollection {
        to_feature_collection(self.tracker.records(), &self.source)
    }
}
