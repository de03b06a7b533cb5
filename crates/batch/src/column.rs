//! Column adapters: one property mutator per imported column.

use std::sync::Arc;

use thiserror::Error;

use entitykit_core::{ChoiceDomain, DomainError, DomainResult};
use entitykit_properties::{Lifecycle, Named, NumberRegistry, Numbered, TargetDate};

use crate::cell::CellValue;

/// Per-column failure during load or emit.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// The raw value could not be interpreted for this column.
    #[error("malformed cell: {0}")]
    Malformed(#[from] anyhow::Error),

    /// The property mutator rejected the value.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Deferred actions to run once the whole record has been loaded.
///
/// Adapters whose effect depends on several columns defer here instead of
/// mutating immediately; the record loader drains the queue at the end.
pub struct PostUpdateQueue<E> {
    actions: Vec<(String, Box<dyn FnOnce(&mut E) -> DomainResult<()>>)>,
}

impl<E> PostUpdateQueue<E> {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn defer(
        &mut self,
        label: impl Into<String>,
        action: impl FnOnce(&mut E) -> DomainResult<()> + 'static,
    ) {
        self.actions.push((label.into(), Box::new(action)));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub(crate) fn drain(self) -> Vec<(String, Box<dyn FnOnce(&mut E) -> DomainResult<()>>)> {
        self.actions
    }
}

impl<E> Default for PostUpdateQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for PostUpdateQueue<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostUpdateQueue")
            .field("pending", &self.actions.len())
            .finish()
    }
}

/// Binds one import/export column to one property mutator.
pub trait ColumnAdapter<E> {
    /// Consume a raw cell, applying it through the property's mutator.
    ///
    /// Returns `true` when a deferred action was enqueued and must run
    /// after the whole record is processed. An empty cell leaves the
    /// entity untouched.
    fn load(
        &self,
        entity: &mut E,
        raw: &CellValue,
        queue: &mut PostUpdateQueue<E>,
    ) -> Result<bool, ColumnError>;

    /// Produce the export cell. `Some` means a non-empty value was
    /// written.
    fn emit(&self, entity: &E) -> Result<Option<CellValue>, ColumnError>;
}

/// Column for the `Named` capability.
///
/// Bulk import stages transient entities, so the name is written straight
/// to the field; the subsequent (batch) insert persists it.
#[derive(Debug, Default)]
pub struct NameColumn;

impl<E: Named> ColumnAdapter<E> for NameColumn {
    fn load(
        &self,
        entity: &mut E,
        raw: &CellValue,
        _queue: &mut PostUpdateQueue<E>,
    ) -> Result<bool, ColumnError> {
        if let Some(name) = raw.to_text() {
            entity.store_name(name);
        }
        Ok(false)
    }

    fn emit(&self, entity: &E) -> Result<Option<CellValue>, ColumnError> {
        let name = entity.name();
        if name.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CellValue::Text(name.to_string())))
        }
    }
}

/// Column for the `Numbered` capability.
///
/// Setting a number claims uniqueness synchronously and persists through
/// the property itself, so `load` never defers: it always returns `false`.
pub struct NumberColumn {
    registry: Arc<dyn NumberRegistry>,
}

impl NumberColumn {
    pub fn new(registry: Arc<dyn NumberRegistry>) -> Self {
        Self { registry }
    }
}

impl core::fmt::Debug for NumberColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NumberColumn").finish_non_exhaustive()
    }
}

impl<E: Numbered> ColumnAdapter<E> for NumberColumn {
    fn load(
        &self,
        entity: &mut E,
        raw: &CellValue,
        _queue: &mut PostUpdateQueue<E>,
    ) -> Result<bool, ColumnError> {
        if let Some(number) = raw.to_text() {
            entity.set_number(self.registry.as_ref(), &number)?;
        }
        Ok(false)
    }

    fn emit(&self, entity: &E) -> Result<Option<CellValue>, ColumnError> {
        Ok(entity
            .number()
            .map(|n| CellValue::Text(n.to_string())))
    }
}

/// Column for the `TargetDate` capability.
#[derive(Debug, Default)]
pub struct TargetDateColumn;

impl<E: TargetDate> ColumnAdapter<E> for TargetDateColumn {
    fn load(
        &self,
        entity: &mut E,
        raw: &CellValue,
        _queue: &mut PostUpdateQueue<E>,
    ) -> Result<bool, ColumnError> {
        if let Some(date) = raw.to_timestamp()? {
            entity.store_target_date(Some(date));
        }
        Ok(false)
    }

    fn emit(&self, entity: &E) -> Result<Option<CellValue>, ColumnError> {
        Ok(entity.target_date().map(CellValue::Timestamp))
    }
}

/// Column for the `Lifecycle` state.
///
/// The landed state may depend on other columns of the same record (the
/// discriminator, dates, ...), so the write is deferred to the post-update
/// queue and `load` returns `true` for non-empty cells.
#[derive(Debug, Default)]
pub struct StateColumn;

impl<E: Lifecycle> ColumnAdapter<E> for StateColumn {
    fn load(
        &self,
        _entity: &mut E,
        raw: &CellValue,
        queue: &mut PostUpdateQueue<E>,
    ) -> Result<bool, ColumnError> {
        let Some(code) = raw.to_text() else {
            return Ok(false);
        };
        let state = E::State::from_code(&code).ok_or_else(|| {
            anyhow::anyhow!("'{code}' is not a value of domain '{}'", E::State::DOMAIN)
        })?;
        queue.defer("lifecycle state", move |e: &mut E| {
            e.store_state(state);
            Ok(())
        });
        Ok(true)
    }

    fn emit(&self, entity: &E) -> Result<Option<CellValue>, ColumnError> {
        Ok(Some(CellValue::Text(entity.state().code().to_string())))
    }
}
