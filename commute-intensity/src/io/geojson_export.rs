//! renders an [`IntensityMap`] as a ten-level GeoJSON load map.
//!
//! the output is a `FeatureCollection` with one `Feature` per load level, in level
//! order. each feature carries `{"load": <level>}` and a `GeometryCollection` of
//! the start→end `LineString`s of every edge at that level. levels without edges
//! still appear, with an empty collection.
use std::{
    io::{BufWriter, Write},
    path::Path,
};

use commute_core::util::geo_utils;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::{
    config::ExportConfiguration,
    model::{
        load_level::{self, N_LOAD_LEVELS},
        IntensityError, IntensityMap, LoadLevel,
    },
};

pub const LOAD_PROPERTY: &str = "load";

pub fn build_feature_collection(
    map: &IntensityMap,
    conf: &ExportConfiguration,
) -> FeatureCollection {
    let mut groups = vec![vec![]; N_LOAD_LEVELS as usize];
    for (edge, level) in load_level::load_levels(map, conf.binning_policy) {
        groups[level.index()].push(edge);
    }

    let features = LoadLevel::all()
        .zip(groups)
        .map(|(level, mut edges)| {
            edges.sort_by_key(|e| e.edge_id);
            let geometries = edges
                .iter()
                .map(|e| Geometry::new(Value::from(&e.line_string())))
                .collect::<Vec<_>>();
            log::debug!("load level {level} has {} edges", geometries.len());
            load_feature(level, geometries)
        })
        .collect::<Vec<_>>();

    let bbox = geo_utils::edges_bounding_rect(map.iter().map(|(e, _)| e))
        .map(|rect| geo_utils::rect_to_bbox(&rect).to_vec());

    FeatureCollection {
        bbox,
        features,
        foreign_members: None,
    }
}

fn load_feature(level: LoadLevel, geometries: Vec<Geometry>) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        String::from(LOAD_PROPERTY),
        JsonValue::from(level.value()),
    );
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::GeometryCollection(geometries))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// writes the load map of the intensity map to a writer.
pub fn write_geojson<W: Write>(
    map: &IntensityMap,
    writer: W,
    conf: &ExportConfiguration,
) -> Result<(), IntensityError> {
    let collection = build_feature_collection(map, conf);
    let mut writer = BufWriter::new(writer);
    if conf.pretty {
        serde_json::to_writer_pretty(&mut writer, &collection)?;
    } else {
        serde_json::to_writer(&mut writer, &collection)?;
    }
    writer.flush()?;
    Ok(())
}

/// writes the load map to a file, truncating any previous contents when
/// the configuration allows overwriting.
pub fn write_geojson_file<P: AsRef<Path>>(
    map: &IntensityMap,
    path: P,
    conf: &ExportConfiguration,
) -> Result<(), IntensityError> {
    let path = path.as_ref();
    let file = super::create_output_file(path, conf.overwrite)?;
    write_geojson(map, file, conf)?;
    log::info!(
        "wrote {} load levels for {} edges to {}",
        N_LOAD_LEVELS,
        map.len(),
        path.to_string_lossy()
    );
    Ok(())
}
