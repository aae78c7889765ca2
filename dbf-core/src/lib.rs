#![forbid(unsafe_code)]

pub mod error;

pub mod container {
    pub mod descriptor;
    pub mod header;
}

pub mod read {
    pub mod records;
    pub mod table;
}

pub mod write {
    pub mod tabular;
}

pub mod convert;
pub mod info;
pub mod merge;
pub mod source;
pub mod source_factory;
pub mod source_fs;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports: stable API surface
pub use container::descriptor::{FieldDescriptor, FieldType};
pub use container::header::{Dialect, TableHeader};
pub use convert::{ConvertOptions, convert_dir, convert_file, info_file, merge_dir, plan_dir};
pub use info::TableInfo;
pub use merge::{MergeOptions, MergePlan, MergeSummary, SOURCE_COLUMN, merge};
pub use read::records::{Record, Records};
pub use read::table::Table;
pub use write::tabular::TabularWriter;
