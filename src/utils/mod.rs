//! Helpers shared by the rest of the crate: the ingestion thread pool, polars
//! schema construction and the struct accessor macros.

use itertools::Itertools;
use log::warn;
use once_cell::sync::Lazy;
use polars::prelude::*;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var("DIFFMOD_NUM_THREADS")
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

/// Creates a schema from separate arrays of names and data types.
pub(crate) fn schema_from_arrays(
    names: &[&str],
    dtypes: &[DataType],
) -> Schema {
    if names.len() != dtypes.len() {
        warn!(
            "Mismatch between names and dtypes array lengths: {} vs {}",
            names.len(),
            dtypes.len()
        );
    }
    Schema::from_iter(
        names
            .iter()
            .map(|name| PlSmallStr::from(*name))
            .zip(dtypes.iter().cloned())
            .collect_vec(),
    )
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
pub use with_field_fn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_arrays() {
        let schema = schema_from_arrays(
            &["chrom", "ref_position"],
            &[DataType::String, DataType::Int64],
        );
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("ref_position"), Some(&DataType::Int64));
    }

    #[test]
    fn test_thread_pool_has_threads() {
        assert!(n_threads() >= 1);
    }
}
