use std::path::Path;

use anyhow::{
    bail,
    ensure,
    Context,
};
use itertools::Itertools;
use log::{
    debug,
    info,
};
use polars::prelude::*;

use crate::io::read_pvalue_table;
use crate::tools::config::FdrConfig;

pub const TRANSCRIPT_ID_COL: &str = "transcript_id";
pub const TRANSCRIPT_POSITION_COL: &str = "transcript_position";
pub const P_VALUE_COL: &str = "p_value";
pub const BH_CORRECTED_COL: &str = "bh_corrected_p_value";

/// Benjamini-Hochberg adjusted p-values.
///
/// Missing (and NaN) p-values are left out of the population and stay
/// missing. The adjustment runs on the remaining values only and the results
/// are scattered back to their rows.
pub fn benjamini_hochberg(p_values: &[Option<f64>]) -> Vec<Option<f64>> {
    let (indices, population): (Vec<usize>, Vec<f64>) = p_values
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| p.filter(|v| !v.is_nan()).map(|v| (idx, v)))
        .unzip();

    let mut adjusted = vec![None; p_values.len()];
    if population.is_empty() {
        return adjusted;
    }
    let padj = adjustp::adjust(&population, adjustp::Procedure::BenjaminiHochberg);
    for (idx, q) in indices.into_iter().zip(padj) {
        adjusted[idx] = Some(q);
    }
    adjusted
}

/// Merges per-segment p-value tables and adds the Benjamini-Hochberg
/// corrected p-value column.
///
/// Correction needs the complete population, so any missing or
/// inconsistent table fails the whole merge.
#[derive(Debug, Clone, Default)]
pub struct FdrCorrector {
    config:          FdrConfig,
    expected_tables: Option<usize>,
}

impl FdrCorrector {
    pub fn new(config: FdrConfig) -> Self {
        Self {
            config,
            expected_tables: None,
        }
    }

    /// Requires exactly `n` tables, one per segment.
    pub fn with_expected_tables(
        mut self,
        n: usize,
    ) -> Self {
        self.expected_tables = Some(n);
        self
    }

    pub fn config(&self) -> &FdrConfig {
        &self.config
    }

    /// Reads the tables and corrects them.
    pub fn correct_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> anyhow::Result<DataFrame> {
        self.check_table_count(paths.len())?;
        let tables = paths
            .iter()
            .map(|path| {
                read_pvalue_table(path).map(|df| (path.as_ref().display().to_string(), df))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        self.correct(tables)
    }

    fn check_table_count(
        &self,
        n_tables: usize,
    ) -> anyhow::Result<()> {
        ensure!(n_tables > 0, "No p-value tables supplied");
        if let Some(expected) = self.expected_tables {
            ensure!(
                n_tables == expected,
                "Expected {} p-value tables (one per segment), got {}",
                expected,
                n_tables
            );
        }
        Ok(())
    }

    /// Merges labelled tables, sorts them by `(transcript_id,
    /// transcript_position)` and appends the corrected column.
    ///
    /// The result does not depend on how rows are distributed over the
    /// tables or on the order of the tables.
    pub fn correct(
        &self,
        tables: Vec<(String, DataFrame)>,
    ) -> anyhow::Result<DataFrame> {
        self.check_table_count(tables.len())?;
        info!("Merging {} p-value tables", tables.len());
        let mut tables = tables.into_iter();
        let (first_label, mut merged) = tables
            .next()
            .context("No p-value tables supplied")?;
        check_columns(&first_label, &merged)?;

        for (label, df) in tables {
            ensure_same_schema(&first_label, &merged, &label, &df)?;
            merged
                .vstack_mut(&df)
                .with_context(|| format!("Failed to merge {}", label))?;
        }

        let mut merged = merged.sort(
            [TRANSCRIPT_ID_COL, TRANSCRIPT_POSITION_COL],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )?;

        let p_values = p_value_vec(&merged)?;
        let population = p_values.iter().flatten().count();
        info!(
            "Correcting {} p-values ({} rows, {} without p-value)",
            population,
            p_values.len(),
            p_values.len() - population
        );

        let adjusted = benjamini_hochberg(&p_values);
        let n_significant = adjusted
            .iter()
            .flatten()
            .filter(|q| **q <= *self.config.alpha())
            .count();
        info!(
            "{} sites with BH-corrected p-value <= {}",
            n_significant,
            self.config.alpha()
        );

        merged.with_column(Series::new(BH_CORRECTED_COL.into(), adjusted))?;
        Ok(merged)
    }
}

fn check_columns(
    label: &str,
    df: &DataFrame,
) -> anyhow::Result<()> {
    for name in [TRANSCRIPT_ID_COL, TRANSCRIPT_POSITION_COL, P_VALUE_COL] {
        ensure!(
            df.get_column_index(name).is_some(),
            "P-value table {} has no '{}' column",
            label,
            name
        );
    }
    ensure!(
        df.get_column_index(BH_CORRECTED_COL).is_none(),
        "P-value table {} already has a '{}' column",
        label,
        BH_CORRECTED_COL
    );
    Ok(())
}

fn describe_schema(df: &DataFrame) -> String {
    df.get_column_names()
        .into_iter()
        .zip(df.dtypes())
        .map(|(name, dtype)| format!("{}: {}", name, dtype))
        .join(", ")
}

fn ensure_same_schema(
    expected_label: &str,
    expected: &DataFrame,
    label: &str,
    df: &DataFrame,
) -> anyhow::Result<()> {
    let same = expected.get_column_names() == df.get_column_names()
        && expected.dtypes() == df.dtypes();
    if !same {
        bail!(
            "Schema of {} ({}) does not match schema of {} ({})",
            label,
            describe_schema(df),
            expected_label,
            describe_schema(expected)
        )
    }
    debug!("Schema of {} matches", label);
    Ok(())
}

/// Extracts the p-values as `f64`, NaN mapped to missing. Fails on
/// non-numeric columns and on values outside `[0, 1]`.
fn p_value_vec(df: &DataFrame) -> anyhow::Result<Vec<Option<f64>>> {
    let column = df.column(P_VALUE_COL)?;
    match column.dtype() {
        DataType::Float64
        | DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::UInt64
        | DataType::UInt32
        | DataType::Null => {},
        other => bail!("Column '{}' has non-numeric type {}", P_VALUE_COL, other),
    }

    let values = column
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|p| p.filter(|v| !v.is_nan()))
        .collect_vec();

    if let Some((row, value)) = values
        .iter()
        .enumerate()
        .find_map(|(row, p)| p.filter(|v| !(0.0..=1.0).contains(v)).map(|v| (row, v)))
    {
        bail!(
            "P-value {} in merged row {} is outside [0, 1]",
            value,
            row
        )
    }
    Ok(values)
}
