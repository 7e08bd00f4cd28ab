use clap::Subcommand;
use commute_core::{EdgeList, EdgeRegistry};
use kdam::tqdm;
use serde::{Deserialize, Serialize};

use super::TripRow;
use crate::{
    config::ExportConfiguration,
    io::{csv_codec, geojson_export},
    model::{IntensityError, IntensityMap},
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum IntensityOperation {
    /// aggregate routed trips into an intensity CSV file
    Ingest {
        #[arg(long, help = "edges CSV with edge_id,start_lon,start_lat,end_lon,end_lat,travel_time_ms")]
        edges_file: String,
        #[arg(long, help = "trips CSV with start_time,edge_ids columns")]
        trips_file: String,
        #[arg(long, help = "output path for the intensity CSV")]
        output_file: String,
        /// split ingestion across threads
        #[arg(long, default_value_t = false)]
        parallel: bool,
        #[arg(long, help = "path to file with export parameters")]
        configuration_file: Option<String>,
    },
    /// write a ten-level GeoJSON load map from an intensity CSV file
    Export {
        #[arg(long)]
        edges_file: String,
        #[arg(long)]
        intensity_file: String,
        #[arg(long, help = "output path for the GeoJSON load map")]
        output_file: String,
        #[arg(long, help = "path to file with export parameters")]
        configuration_file: Option<String>,
    },
    /// print the non-empty 5-minute buckets of every edge in an intensity CSV file
    Describe {
        #[arg(long)]
        edges_file: String,
        #[arg(long)]
        intensity_file: String,
    },
}

impl IntensityOperation {
    pub fn run(&self) -> Result<(), IntensityError> {
        match self {
            IntensityOperation::Ingest {
                edges_file,
                trips_file,
                output_file,
                parallel,
                configuration_file,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let edges = EdgeList::from_csv(edges_file)?;
                let map = ingest_trips(trips_file, &edges, *parallel)?;
                csv_codec::write_csv_file(&map, output_file, conf.overwrite)
            }
            IntensityOperation::Export {
                edges_file,
                intensity_file,
                output_file,
                configuration_file,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let edges = EdgeList::from_csv(edges_file)?;
                let map = csv_codec::read_csv_file(intensity_file, &edges)?;
                geojson_export::write_geojson_file(&map, output_file, &conf)
            }
            IntensityOperation::Describe {
                edges_file,
                intensity_file,
            } => {
                let edges = EdgeList::from_csv(edges_file)?;
                let map = csv_codec::read_csv_file(intensity_file, &edges)?;
                print!("{map}");
                Ok(())
            }
        }
    }
}

fn read_configuration(f: Option<&String>) -> Result<ExportConfiguration, IntensityError> {
    match f {
        None => Ok(ExportConfiguration::default()),
        Some(f) => {
            log::info!("reading export configuration from {f}");
            ExportConfiguration::try_from(f)
        }
    }
}

/// reads every trip, resolves its route and aggregates all trips into a new map.
fn ingest_trips(
    trips_file: &str,
    edges: &EdgeList,
    parallel: bool,
) -> Result<IntensityMap, IntensityError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(trips_file)?;
    let row_iter = tqdm!(reader.deserialize::<TripRow>(), desc = "read trips");
    let mut start_times = vec![];
    let mut routes = vec![];
    for (idx, row) in row_iter.enumerate() {
        let trip = row?;
        let route = trip.route(edges).map_err(|e| {
            IntensityError::InvalidTrip(format!("row {} of {trips_file}: {e}", idx + 1))
        })?;
        start_times.push(trip.start_time_ms());
        routes.push(route);
    }
    eprintln!();

    let mut map = IntensityMap::with_capacity(edges.n_edges());
    if parallel {
        map.ingest_batch_parallel(&start_times, &routes)?;
    } else {
        map.ingest_batch(&start_times, &routes)?;
    }
    let total_travel_ms = routes.iter().map(|r| r.travel_time_ms()).sum::<u64>();
    log::info!(
        "aggregated {} trips over {} edges, {} ms total travel time",
        routes.len(),
        map.len(),
        total_travel_ms
    );
    Ok(map)
}
