use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    bail,
    Context,
};
use hashbrown::HashMap;
use log::info;
use serde::{
    Deserialize,
    Serialize,
};

/// One row of the sample sheet: a read call file and the sample it belongs
/// to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub sample_name: String,
    #[serde(rename = "group")]
    pub group_name:  String,
    pub file_path:   PathBuf,
}

impl SampleEntry {
    pub fn new(
        sample_name: impl Into<String>,
        group_name: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sample_name: sample_name.into(),
            group_name:  group_name.into(),
            file_path:   file_path.into(),
        }
    }
}

/// Reads a comma-separated sample sheet with the header columns
/// `sample_name`, `group` and `file_path`.
///
/// Columns may come in any order and extra columns are ignored. Relative file
/// paths are resolved against the directory of the sheet. A sample listed
/// several times must always carry the same group.
pub fn read_sample_sheet<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<SampleEntry>> {
    let path = path.as_ref();
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut reader = csv::ReaderBuilder::default()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Could not open sample sheet {}", path.display()))?;

    let mut entries = reader
        .deserialize::<SampleEntry>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed sample sheet {}", path.display()))?;

    if entries.is_empty() {
        bail!("Sample sheet {} lists no files", path.display())
    }

    let n_samples = {
        let mut groups: HashMap<&str, &str> = HashMap::new();
        for entry in entries.iter() {
            let group = groups
                .entry(entry.sample_name.as_str())
                .or_insert(entry.group_name.as_str());
            if *group != entry.group_name {
                bail!(
                    "Sample '{}' is assigned to both group '{}' and group '{}' in {}",
                    entry.sample_name,
                    group,
                    entry.group_name,
                    path.display()
                )
            }
        }
        groups.len()
    };
    info!(
        "Sample sheet {}: {} files, {} samples",
        path.display(),
        entries.len(),
        n_samples
    );

    for entry in entries.iter_mut() {
        if entry.file_path.is_relative() {
            entry.file_path = base_dir.join(&entry.file_path);
        }
    }
    Ok(entries)
}
