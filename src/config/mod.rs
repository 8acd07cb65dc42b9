use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stroke and fill constants for polygon overlays.
///
/// Selected overlays are drawn with a heavier stroke and a darker fill so the
/// selection stands out against the tile layer:
///   Unselected: weight 1.0, fill opacity 0.2
///   Selected:   weight 3.0, fill opacity 0.5
pub mod styles {
    pub const STROKE_COLOR: &str = "#3388ff";
    pub const FILL_COLOR: &str = "#3388ff";

    pub const UNSELECTED_WEIGHT: f32 = 1.0;
    pub const UNSELECTED_FILL_OPACITY: f32 = 0.2;

    pub const SELECTED_WEIGHT: f32 = 3.0;
    pub const SELECTED_FILL_OPACITY: f32 = 0.5;
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}
fn default_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}
fn default_zoom() -> u8 {
    13
}
fn default_stroke_color() -> String {
    styles::STROKE_COLOR.to_string()
}
fn default_fill_color() -> String {
    styles::FILL_COLOR.to_string()
}
fn default_verbose() -> bool {
    false
}

/// Visual style of one polygon overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    #[serde(default = "default_stroke_color")]
    pub color: String,
    pub weight: f32,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    pub fill_opacity: f32,
}

impl PathStyle {
    pub fn unselected() -> Self {
        Self {
            color: default_stroke_color(),
            weight: styles::UNSELECTED_WEIGHT,
            fill_color: default_fill_color(),
            fill_opacity: styles::UNSELECTED_FILL_OPACITY,
        }
    }

    pub fn selected() -> Self {
        Self {
            color: default_stroke_color(),
            weight: styles::SELECTED_WEIGHT,
            fill_color: default_fill_color(),
            fill_opacity: styles::SELECTED_FILL_OPACITY,
        }
    }
}

/// The pair of styles used for unselected and selected overlays
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Palette {
    #[serde(default = "PathStyle::unselected")]
    pub unselected: PathStyle,
    #[serde(default = "PathStyle::selected")]
    pub selected: PathStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            unselected: PathStyle::unselected(),
            selected: PathStyle::selected(),
        }
    }
}

impl Palette {
    pub fn for_selection(&self, selected: bool) -> &PathStyle {
        if selected {
            &self.selected
        } else {
            &self.unselected
        }
    }
}

/// Base tile layer drawn under the overlays
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TileLayerConfig {
    #[serde(default = "default_tile_url")]
    pub url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

/// Everything the map view needs besides the polygons themselves
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MapConfig {
    #[serde(default)]
    pub tiles: TileLayerConfig,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tiles: TileLayerConfig::default(),
            zoom: default_zoom(),
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(flatten)]
    pub map: MapConfig,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// Load the first readable config from the default search path.
    ///
    /// Files that exist but fail to parse are skipped; their errors are
    /// returned alongside so the caller can report them once logging is up.
    pub fn load() -> (Option<Self>, Vec<anyhow::Error>) {
        Self::load_from(&get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> (Option<Self>, Vec<anyhow::Error>) {
        let mut errors = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::from_path(path) {
                    Ok(config) => return (Some(config), errors),
                    Err(e) => {
                        errors.push(e.context(format!("Failed to load config file {:?}", path)))
                    }
                }
            }
        }
        (None, errors)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polymerge.toml"));
    paths.push(PathBuf::from(".polymerge.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polymerge").join("config.toml"));
        paths.push(config_dir.join("polymerge.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polymerge.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.map, MapConfig::default());
        assert!(!config.verbose);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_selected_style_is_heavier() {
        let palette = Palette::default();
        assert!(palette.selected.weight > palette.unselected.weight);
        assert!(palette.selected.fill_opacity > palette.unselected.fill_opacity);
        assert_eq!(palette.for_selection(true), &palette.selected);
    }

    #[test]
    fn test_partial_override() {
        let toml_str = r##"
zoom = 9
verbose = true

[tiles]
url = "https://tiles.example.org/{z}/{x}/{y}.png"

[palette.selected]
color = "#ff0000"
weight = 4.0
fill_opacity = 0.7
"##;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.map.zoom, 9);
        assert!(config.verbose);
        assert_eq!(config.map.tiles.url, "https://tiles.example.org/{z}/{x}/{y}.png");
        assert_eq!(config.map.tiles.attribution, default_attribution());
        assert_eq!(config.map.palette.selected.color, "#ff0000");
        assert_eq!(config.map.palette.selected.fill_color, styles::FILL_COLOR);
        assert_eq!(config.map.palette.unselected, PathStyle::unselected());
    }

    #[test]
    fn test_load_from_reports_broken_file() {
        let mut broken = NamedTempFile::new().unwrap();
        writeln!(broken, "zoom = \"not a number\"").unwrap();
        let mut valid = NamedTempFile::new().unwrap();
        writeln!(valid, "zoom = 7").unwrap();

        let paths = vec![
            PathBuf::from("does-not-exist/polymerge.toml"),
            broken.path().to_path_buf(),
            valid.path().to_path_buf(),
        ];
        let (config, errors) = FileConfig::load_from(&paths);

        assert_eq!(config.unwrap().map.zoom, 7);
        assert_eq!(errors.len(), 1);
        assert!(format!("{:#}", errors[0]).contains("Failed to load config file"));
    }

    #[test]
    fn test_load_from_nothing_found() {
        let (config, errors) = FileConfig::load_from(&[PathBuf::from("missing/polymerge.toml")]);
        assert!(config.is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "zoom = 5").unwrap();
        let config = FileConfig::from_path(file.path()).unwrap();
        assert_eq!(config.map.zoom, 5);
    }
}
