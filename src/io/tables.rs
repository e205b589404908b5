use std::path::Path;

use anyhow::Context;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data_structs::{
    SampleInfo,
    Segment,
    SiteSampleSummary,
    SiteSummary,
};

/// A record type stored as a delimited table with a header line.
///
/// The header is written even when the table has no rows, so empty results
/// stay readable downstream.
pub trait TableRow: Serialize + DeserializeOwned {
    /// Column names, in field order.
    const HEADER: &'static [&'static str];
    const DELIMITER: u8 = b'\t';
}

impl TableRow for SiteSampleSummary {
    const HEADER: &'static [&'static str] = &[
        "rname",
        "transcript_position",
        "sample_name",
        "read_count",
        "max_prob",
        "min_prob",
        "avg_probability_modified",
        "variance",
    ];
}

impl TableRow for SiteSummary {
    const HEADER: &'static [&'static str] =
        &["rname", "transcript_position", "read_count", "sample_count"];
}

impl TableRow for SampleInfo {
    const HEADER: &'static [&'static str] =
        &["sample_name", "group_name", "files", "raw_reads"];
}

impl TableRow for Segment {
    const DELIMITER: u8 = b',';
    const HEADER: &'static [&'static str] = &["start", "end"];
}

pub fn write_table<'a, T, P, I>(
    path: P,
    rows: I,
) -> anyhow::Result<()>
where
    T: TableRow + 'a,
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a T>, {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::default()
        .delimiter(T::DELIMITER)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Could not create {}", path.display()))?;

    writer.write_record(T::HEADER)?;
    let mut count = 0usize;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
        count += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote {} rows to {}", count, path.display());
    Ok(())
}

pub fn read_table<T, P>(path: P) -> anyhow::Result<Vec<T>>
where
    T: TableRow,
    P: AsRef<Path>, {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::default()
        .delimiter(T::DELIMITER)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Could not open {}", path.display()))?;

    let rows = reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed table {}", path.display()))?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table_keeps_null_variance() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("summary.tsv");
        let rows = vec![
            SiteSampleSummary {
                rname:       "tx1".into(),
                position:    4,
                sample_name: "s1".into(),
                read_count:  1,
                max_prob:    0.9,
                min_prob:    0.9,
                mean_prob:   0.9,
                variance:    None,
            },
            SiteSampleSummary {
                rname:       "tx1".into(),
                position:    4,
                sample_name: "s2".into(),
                read_count:  2,
                max_prob:    0.9,
                min_prob:    0.8,
                mean_prob:   0.85,
                variance:    Some(0.005),
            },
        ];
        write_table(&path, &rows)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.starts_with(
            "rname\ttranscript_position\tsample_name\tread_count\tmax_prob\tmin_prob\tavg_probability_modified\tvariance\n"
        ));
        assert!(content.contains("tx1\t4\ts1\t1\t0.9\t0.9\t0.9\t\n"));

        let read_back: Vec<SiteSampleSummary> = read_table(&path)?;
        assert_eq!(read_back, rows);
        Ok(())
    }

    #[test]
    fn test_empty_segments_keep_header() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("segments.csv");
        write_table::<Segment, _, _>(&path, &[])?;

        assert_eq!(std::fs::read_to_string(&path)?, "start,end\n");
        assert!(read_table::<Segment, _>(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_segments_are_comma_separated() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("segments.csv");
        let segments = vec![Segment::new(0, 2), Segment::new(3, 4)];
        write_table(&path, &segments)?;

        assert_eq!(std::fs::read_to_string(&path)?, "start,end\n0,2\n3,4\n");
        assert_eq!(read_table::<Segment, _>(&path)?, segments);
        Ok(())
    }
}
