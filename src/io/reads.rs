use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use itertools::Itertools;
use log::debug;
use polars::prelude::*;

use crate::utils::schema_from_arrays;

/// Layout of the per-read call files.
///
/// Files are tab-separated with a header line. Only the reference name,
/// reference position and modification probability columns are read, any
/// other column is skipped.
pub struct ReadCallsSchema;

impl ReadCallsSchema {
    pub const RNAME_COL: &'static str = "chrom";
    pub const POSITION_COL: &'static str = "ref_position";
    pub const PROBABILITY_COL: &'static str = "mod_qual";

    /// Returns column names of the projected columns.
    pub const fn col_names() -> &'static [&'static str] {
        &[Self::RNAME_COL, Self::POSITION_COL, Self::PROBABILITY_COL]
    }

    /// Returns data types for each projected column.
    pub const fn col_types() -> &'static [DataType] {
        &[
            DataType::String,  // chrom
            DataType::Int64,   // ref_position
            DataType::Float64, // mod_qual
        ]
    }

    pub fn schema() -> Schema {
        schema_from_arrays(Self::col_names(), Self::col_types())
    }

    /// Creates CSV read options for call files.
    pub fn read_options() -> CsvReadOptions {
        let columns: Arc<[PlSmallStr]> = Self::col_names()
            .iter()
            .map(|name| PlSmallStr::from(*name))
            .collect_vec()
            .into();

        CsvReadOptions::default()
            .with_has_header(true)
            .with_columns(Some(columns))
            .with_schema_overwrite(Some(Arc::new(Self::schema())))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(b'\t')
                    .with_try_parse_dates(false),
            )
    }
}

/// Reads a call file into a DataFrame with the projected columns.
///
/// Values that do not parse as the column type (e.g. a fractional position)
/// fail the whole file.
pub fn read_calls<P: AsRef<Path>>(path: P) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let df = ReadCallsSchema::read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("Malformed read calls file {}", path.display()))?;
    debug!("Read {} calls from {}", df.height(), path.display());
    Ok(df)
}

/// Iterates over `(rname, position, probability)` of every row.
pub fn iter_calls(
    df: &DataFrame
) -> anyhow::Result<impl Iterator<Item = (Option<&str>, Option<i64>, Option<f64>)> + '_>
{
    let rnames = df.column(ReadCallsSchema::RNAME_COL)?.str()?;
    let positions = df.column(ReadCallsSchema::POSITION_COL)?.i64()?;
    let probabilities = df.column(ReadCallsSchema::PROBABILITY_COL)?.f64()?;

    Ok(rnames
        .into_iter()
        .zip(positions.into_iter())
        .zip(probabilities.into_iter())
        .map(|((rname, position), probability)| (rname, position, probability)))
}
