//! pipe-delimited flat file codec for an [`IntensityMap`].
//!
//! each line holds one edge: `edge_id|c0|c1|...|c287`, where `ci` is the count in
//! 5-minute bucket `i`. there is no header row.
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use commute_core::{EdgeId, EdgeRegistry};
use csv::StringRecord;

use crate::model::{time_ops::N_BUCKETS, IntensityError, IntensityMap, Timetable};

pub const DELIMITER: u8 = b'|';

/// fields in a well-formed row: the edge id plus one per bucket.
pub const N_FIELDS: usize = N_BUCKETS + 1;

/// writes one row per edge of the map, in map iteration order.
pub fn write_csv<W: Write>(map: &IntensityMap, writer: W) -> Result<(), IntensityError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for (edge, timetable) in map.iter() {
        let row = std::iter::once(edge.edge_id.to_string())
            .chain(timetable.counts().iter().map(|c| c.to_string()));
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// writes the map to a file, see [`write_csv`].
pub fn write_csv_file<P: AsRef<Path>>(
    map: &IntensityMap,
    path: P,
    overwrite: bool,
) -> Result<(), IntensityError> {
    let path = path.as_ref();
    let file = super::create_output_file(path, overwrite)?;
    write_csv(map, file)?;
    log::info!(
        "wrote intensity rows for {} edges to {}",
        map.len(),
        path.to_string_lossy()
    );
    Ok(())
}

/// reads an intensity file into a new map, resolving edge ids through the registry.
pub fn read_csv<R: Read, G: EdgeRegistry>(
    reader: R,
    registry: &G,
) -> Result<IntensityMap, IntensityError> {
    let mut map = IntensityMap::new();
    load_csv_into(&mut map, reader, registry)?;
    Ok(map)
}

/// reads an intensity file into a new map, see [`read_csv`].
pub fn read_csv_file<P: AsRef<Path>, G: EdgeRegistry>(
    path: P,
    registry: &G,
) -> Result<IntensityMap, IntensityError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let map = read_csv(file, registry)?;
    log::info!(
        "read intensity rows for {} edges from {}",
        map.len(),
        path.to_string_lossy()
    );
    Ok(map)
}

/// reads an intensity file into an existing map, replacing the timetable of any
/// edge already present.
///
/// the whole file is validated before the map is touched: a malformed row or an
/// edge id missing from the registry fails the load and leaves the map unchanged.
pub fn load_csv_into<R: Read, G: EdgeRegistry>(
    map: &mut IntensityMap,
    reader: R,
    registry: &G,
) -> Result<(), IntensityError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut staged = Vec::with_capacity(registry.n_edges().min(1 << 16));
    for (idx, row) in csv_reader.records().enumerate() {
        let record = row?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        let (edge_id, timetable) = parse_row(&record, line)?;
        let edge = registry
            .get_edge(edge_id)
            .ok_or(IntensityError::UnknownEdge { line, edge_id })?;
        staged.push((edge.clone(), timetable));
    }

    log::debug!("installing {} staged intensity rows", staged.len());
    for (edge, timetable) in staged {
        map.insert_timetable(edge, timetable);
    }
    Ok(())
}

/// parses a row into its edge id and timetable. rows ending in a trailing
/// delimiter (an empty final field) are accepted.
fn parse_row(record: &StringRecord, line: u64) -> Result<(EdgeId, Timetable), IntensityError> {
    let n_fields = match record.len() {
        N_FIELDS => N_FIELDS,
        n if n == N_FIELDS + 1 && record.get(N_FIELDS).is_some_and(|f| f.trim().is_empty()) => {
            N_FIELDS
        }
        n => {
            return Err(IntensityError::MalformedRow {
                line,
                message: format!("expected {N_FIELDS} fields, found {n}"),
            })
        }
    };
    let id_field = record.get(0).unwrap_or_default();
    let edge_id = id_field
        .parse::<EdgeId>()
        .map_err(|e| IntensityError::MalformedRow {
            line,
            message: format!("invalid edge id '{id_field}': {e}"),
        })?;
    let counts = record
        .iter()
        .take(n_fields)
        .skip(1)
        .enumerate()
        .map(|(bucket, field)| {
            field
                .trim()
                .parse::<u32>()
                .map_err(|e| IntensityError::MalformedRow {
                    line,
                    message: format!("invalid count '{field}' for bucket {bucket}: {e}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let timetable = Timetable::from_counts(&counts)?;
    Ok((edge_id, timetable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time_ops::MILLIS_PER_MINUTE;
    use commute_core::{Edge, EdgeList, Route};
    use geo::Point;

    fn edge(id: u64, travel_time_ms: u64) -> Edge {
        Edge::new(
            EdgeId(id),
            Point::new(30.3 + id as f64 * 0.001, 59.9),
            Point::new(30.301 + id as f64 * 0.001, 59.9),
            travel_time_ms,
        )
    }

    fn registry() -> EdgeList {
        EdgeList::new((1..=5).map(|i| edge(i, 60_000 * i))).unwrap()
    }

    fn zero_row(edge_id: &str) -> String {
        let mut fields = vec![edge_id];
        fields.extend(vec!["0"; N_BUCKETS]);
        fields.join("|")
    }

    #[test]
    fn test_write_scenario_row() {
        let e1 = edge(1, 300_000);
        let e2 = edge(2, 0);
        let mut map = IntensityMap::new();
        map.ingest(0, &Route::new(vec![e1.clone(), e2]).unwrap());
        map.ingest(5 * MILLIS_PER_MINUTE, &Route::new(vec![e1]).unwrap());

        let mut buffer = vec![];
        write_csv(&map, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with('\n'));
        assert!(!text.contains("\r"));

        let e1_line = lines.iter().find(|l| l.starts_with("1|")).unwrap();
        let fields = e1_line.split('|').collect::<Vec<_>>();
        assert_eq!(fields.len(), 289);
        assert_eq!(&fields[..3], &["1", "1", "1"]);
        assert!(fields[3..].iter().all(|f| *f == "0"));
        assert_eq!(fields[3..].len(), 286);
    }

    #[test]
    fn test_round_trip() {
        let registry = registry();
        let mut map = IntensityMap::new();
        let route = Route::from_edge_ids(&[EdgeId(1), EdgeId(2), EdgeId(3)], &registry).unwrap();
        for start in [0, 7 * 3_600_000, 7 * 3_600_000 + 60_000, 18 * 3_600_000] {
            map.ingest(start, &route);
        }
        let mut buffer = vec![];
        write_csv(&map, &mut buffer).unwrap();
        let restored = read_csv(buffer.as_slice(), &registry).unwrap();

        assert_eq!(restored.len(), map.len());
        for (edge, timetable) in map.iter() {
            assert_eq!(restored.timetable(edge), Some(timetable));
        }
    }

    #[test]
    fn test_single_bucket_round_trip() {
        let registry = registry();
        let mut counts = vec![0u32; N_BUCKETS];
        counts[100] = 2;
        let mut map = IntensityMap::new();
        map.insert_timetable(edge(4, 0), Timetable::from_counts(&counts).unwrap());

        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv_file(&map, file.path(), true).unwrap();
        let restored = read_csv_file(file.path(), &registry).unwrap();
        let timetable = restored.timetable(&edge(4, 0)).unwrap();
        assert_eq!(timetable.intensity_at_bucket(100), Some(2));
        assert_eq!(timetable.total(), 2);
    }

    #[test]
    fn test_refuses_overwrite() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = write_csv_file(&IntensityMap::new(), file.path(), false);
        assert!(matches!(result, Err(IntensityError::OutputExists(_))));
    }

    #[test]
    fn test_unknown_edge_aborts_load() {
        let registry = registry();
        let input = format!("{}\n{}\n", zero_row("1"), zero_row("99"));
        let mut map = IntensityMap::new();
        let result = load_csv_into(&mut map, input.as_bytes(), &registry);
        match result {
            Err(IntensityError::UnknownEdge { line, edge_id }) => {
                assert_eq!(line, 2);
                assert_eq!(edge_id, EdgeId(99));
            }
            other => panic!("expected unknown edge error, found {other:?}"),
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_malformed_rows() {
        let registry = registry();
        let short = "1|0|0|0\n".to_string();
        let not_a_number = zero_row("1").replacen("|0", "|x", 1);
        let bad_id = zero_row("E1");
        let negative = zero_row("1").replacen("|0", "|-3", 1);
        for input in [short, not_a_number, bad_id, negative] {
            let result = read_csv(input.as_bytes(), &registry);
            assert!(
                matches!(result, Err(IntensityError::MalformedRow { line: 1, .. })),
                "expected malformed row error for '{}', found {:?}",
                &input[..input.len().min(20)],
                result
            );
        }
    }

    #[test]
    fn test_quotes_are_not_escapes() {
        let registry = registry();
        let quoted = zero_row("1").replacen("|0", "|\"5\"", 1);
        let result = read_csv(quoted.as_bytes(), &registry);
        assert!(
            matches!(result, Err(IntensityError::MalformedRow { line: 1, .. })),
            "expected malformed row error, found {result:?}"
        );

        // an unbalanced quote fails its own row without consuming the next ones
        let stray = zero_row("1").replacen("|0", "|\"0", 1);
        let input = format!("{}\n{stray}\n{}\n", zero_row("2"), zero_row("3"));
        let mut map = IntensityMap::new();
        match load_csv_into(&mut map, input.as_bytes(), &registry) {
            Err(IntensityError::MalformedRow { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("bucket 0"), "unexpected message: {message}");
            }
            other => panic!("expected malformed row error, found {other:?}"),
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_trailing_delimiter_and_blank_lines() {
        let registry = registry();
        let mut counts_row = zero_row("2");
        counts_row.push('|');
        let input = format!("\n{counts_row}\n\n{}\n", zero_row("3"));
        let map = read_csv(input.as_bytes(), &registry).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_load_overwrites_existing_edge() {
        let registry = registry();
        let mut map = IntensityMap::new();
        map.ingest(0, &Route::from_edge_ids(&[EdgeId(1)], &registry).unwrap());
        map.ingest(0, &Route::from_edge_ids(&[EdgeId(2)], &registry).unwrap());
        let replacement = zero_row("1").replacen("|0", "|7", 1);
        load_csv_into(&mut map, replacement.as_bytes(), &registry).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.intensity_of(&edge(1, 0), 0), 7);
        assert_eq!(map.intensity_of(&edge(2, 0), 0), 1);
    }
}
