use std::fmt::Display;
use std::fs::File;
use std::path::Path;

use anyhow::{
    bail,
    Context,
};
use log::{
    debug,
    info,
};
use polars::prelude::*;

/// Columnar formats accepted for per-segment p-value tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PValueTableFormat {
    Parquet,
    Ipc,
}

impl PValueTableFormat {
    /// Detects the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("parquet") | Some("pq") => Ok(Self::Parquet),
            Some("arrow") | Some("ipc") | Some("feather") => Ok(Self::Ipc),
            _ => {
                bail!(
                    "Cannot infer p-value table format of {} (expected .parquet, \
                     .arrow, .ipc or .feather)",
                    path.display()
                )
            },
        }
    }
}

impl Display for PValueTableFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let str = match self {
            Self::Parquet => "parquet",
            Self::Ipc => "ipc",
        };
        write!(f, "{}", str)
    }
}

/// Reads one per-segment p-value table.
pub fn read_pvalue_table<P: AsRef<Path>>(path: P) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let format = PValueTableFormat::from_path(path)?;
    let file = File::open(path)
        .with_context(|| format!("Could not open p-value table {}", path.display()))?;

    let df = match format {
        PValueTableFormat::Parquet => ParquetReader::new(file).finish(),
        PValueTableFormat::Ipc => IpcReader::new(file).finish(),
    }
    .with_context(|| format!("Failed to read {} table {}", format, path.display()))?;

    debug!(
        "Read p-value table {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Writes the corrected table as tab-separated text. Nulls become empty
/// fields.
pub fn write_corrected<P: AsRef<Path>>(
    path: P,
    df: &mut DataFrame,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .with_separator(b'\t')
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} corrected rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("batch_0.parquet", Some(PValueTableFormat::Parquet))]
    #[case("batch_0.PQ", Some(PValueTableFormat::Parquet))]
    #[case("batch_0.arrow", Some(PValueTableFormat::Ipc))]
    #[case("batch_0.feather", Some(PValueTableFormat::Ipc))]
    #[case("batch_0.tsv", None)]
    #[case("batch_0", None)]
    fn test_format_from_path(
        #[case] path: &str,
        #[case] expected: Option<PValueTableFormat>,
    ) {
        assert_eq!(PValueTableFormat::from_path(path).ok(), expected);
    }

    #[test]
    fn test_parquet_table_is_read_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("batch_0.parquet");
        let mut df = df!(
            "transcript_id" => ["tx1", "tx2"],
            "transcript_position" => [10i64, 4],
            "p_value" => [Some(0.01), None::<f64>],
        )?;
        ParquetWriter::new(File::create(&path)?).finish(&mut df)?;

        let read = read_pvalue_table(&path)?;
        assert!(read.equals_missing(&df));
        Ok(())
    }
}
