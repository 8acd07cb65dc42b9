use super::FeatureCollection;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a GeoJSON feature collection from disk
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = serde_json::from_reader(BufReader::new(file))?;
    Ok(collection)
}

/// Write a feature collection as pretty-printed GeoJSON
pub fn write_collection(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}
