//! `entitykit-batch`: the bulk-loader column protocol.
//!
//! An external batch-import collaborator hands records (column name to raw
//! cell) to a [`loader::RecordLoader`], which binds one [`column::ColumnAdapter`]
//! per column. Each adapter applies its property's mutator; adapters whose
//! work depends on several columns defer an action into the post-update
//! queue, drained once the whole record is processed. The same adapters
//! drive export through `emit`.

pub mod cell;
pub mod column;
pub mod loader;

pub use cell::CellValue;
pub use column::{
    ColumnAdapter, ColumnError, NameColumn, NumberColumn, PostUpdateQueue, StateColumn,
    TargetDateColumn,
};
pub use loader::{ColumnFailure, ExportReport, LoadReport, RecordLoader};
