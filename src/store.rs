//! State container for one saved view: the last-fetched record plus a
//! buffer of uncommitted filter edits.

use tracing::debug;
use uuid::Uuid;

use crate::errors::ViewServiceError;
use crate::filters::{
    AppliedFilters, merge_display_filters, merge_display_properties, merge_filters,
    reconcile_display_patch,
};
use crate::model::{
    DisplayFilterPatch, DisplayPropertyPatch, FilterPatch, ViewPatch, ViewRecord,
};
use crate::query::applied_query_params;
use crate::service::{ViewContext, ViewService};

/// Where the edit buffer stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Edits are buffered locally and have not been sent.
    Unsaved,
    /// A save is in flight.
    Saving,
}

/// Uncommitted edits, one partial overlay per filter category. Each
/// category is replaced wholesale by the latest edit; overlays are never
/// merged key-by-key with prior pending edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEdits {
    pub filters: FilterPatch,
    pub display_filters: DisplayFilterPatch,
    pub display_properties: DisplayPropertyPatch,
}

impl PendingEdits {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self.display_filters.is_empty()
            && self.display_properties.is_empty()
    }
}

/// One view's filter state.
///
/// Holds the saved record and the pending edit buffer, derives the
/// effective configuration on demand, and pushes accepted edits through a
/// [`ViewService`]. All remote calls take the service and a
/// [`ViewContext`] explicitly; a missing workspace slug or a record
/// without an id makes every remote call a silent no-op.
///
/// Mutation goes through `&mut self`, so two saves can never be in flight
/// on the same store at once.
pub struct ViewFilterState {
    record: ViewRecord,
    pending: PendingEdits,
    save_state: Option<SaveState>,
}

impl ViewFilterState {
    pub fn new(record: ViewRecord) -> Self {
        Self {
            record,
            pending: PendingEdits::default(),
            save_state: None,
        }
    }

    /// The saved record as last confirmed by the server.
    pub fn record(&self) -> &ViewRecord {
        &self.record
    }

    pub fn pending(&self) -> &PendingEdits {
        &self.pending
    }

    pub fn save_state(&self) -> Option<SaveState> {
        self.save_state
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.save_state == Some(SaveState::Unsaved)
    }

    /// The effective configuration: saved categories with pending edits
    /// overlaid. Recomputed on every call, never cached. A category the
    /// saved record does not have stays `None` regardless of pending
    /// edits.
    pub fn applied_filters(&self) -> AppliedFilters {
        AppliedFilters {
            filters: self
                .record
                .filters
                .as_ref()
                .map(|saved| merge_filters(saved, &self.pending.filters)),
            display_filters: self
                .record
                .display_filters
                .as_ref()
                .map(|saved| merge_display_filters(saved, &self.pending.display_filters)),
            display_properties: self
                .record
                .display_properties
                .as_ref()
                .map(|saved| merge_display_properties(saved, &self.pending.display_properties)),
        }
    }

    /// Query-string form of the applied filters, `None` when there is
    /// nothing to send.
    pub fn applied_filters_query_params(&self) -> Option<String> {
        applied_query_params(&self.applied_filters())
    }

    /// Buffer a filter edit. Replaces any prior pending filter edit
    /// wholesale; nothing is sent until [`save_filter_changes`].
    ///
    /// [`save_filter_changes`]: Self::save_filter_changes
    pub fn update_filters(&mut self, patch: FilterPatch) {
        self.pending.filters = patch;
        self.save_state = Some(SaveState::Unsaved);
    }

    /// Buffer a display-filter edit, after reconciling it against the
    /// currently applied display filters (saved state plus edits already
    /// pending, not the raw input).
    pub fn update_display_filters(&mut self, mut patch: DisplayFilterPatch) {
        let applied = self.applied_filters();
        reconcile_display_patch(applied.display_filters.as_ref(), &mut patch);
        self.pending.display_filters = patch;
        self.save_state = Some(SaveState::Unsaved);
    }

    /// Buffer a display-property edit verbatim.
    pub fn update_display_properties(&mut self, patch: DisplayPropertyPatch) {
        self.pending.display_properties = patch;
        self.save_state = Some(SaveState::Unsaved);
    }

    /// Throw away all pending edits. No network call; the applied
    /// configuration falls back to exactly the saved record.
    pub fn reset_filter_changes(&mut self) {
        self.pending = PendingEdits::default();
        self.save_state = None;
    }

    /// Persist the applied configuration.
    ///
    /// The saving marker is cleared whether the call succeeds or fails;
    /// errors still propagate. Pending edits are cleared only once the
    /// server acknowledges, so a failed save leaves the buffer intact for
    /// a retry or reset. An entirely empty applied configuration skips
    /// the network call.
    pub async fn save_filter_changes(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
    ) -> Result<(), ViewServiceError> {
        self.save_state = Some(SaveState::Saving);
        let applied = self.applied_filters();
        let result = if applied.is_empty() {
            Ok(false)
        } else {
            self.update(service, ctx, applied.into()).await
        };
        self.save_state = None;
        if result.as_ref().is_ok_and(|acknowledged| *acknowledged) {
            self.pending = PendingEdits::default();
        }
        result.map(|_| ())
    }

    /// Send a partial view to the remote update endpoint. On a confirmed
    /// response the saved record is replaced with a new snapshot merged
    /// from the previous one and the sent patch. Returns whether the
    /// server acknowledged the change.
    pub async fn update(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
        patch: ViewPatch,
    ) -> Result<bool, ViewServiceError> {
        let Some((slug, id)) = self.remote_target(ctx) else {
            return Ok(false);
        };
        let confirmed = service.update(&slug, id, &patch, ctx.project_id).await?;
        if confirmed.is_none() {
            return Ok(false);
        }
        self.record = self.record.merged_with(&patch);
        Ok(true)
    }

    /// Lock the view against edits by other members. The server's lock
    /// flag is taken as the source of truth.
    pub async fn lock_view(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
    ) -> Result<(), ViewServiceError> {
        let Some((slug, id)) = self.remote_target(ctx) else {
            return Ok(());
        };
        if let Some(view) = service.lock(&slug, id, ctx.project_id).await? {
            self.record.is_locked = view.is_locked;
        }
        Ok(())
    }

    pub async fn unlock_view(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
    ) -> Result<(), ViewServiceError> {
        let Some((slug, id)) = self.remote_target(ctx) else {
            return Ok(());
        };
        if let Some(view) = service.unlock(&slug, id, ctx.project_id).await? {
            self.record.is_locked = view.is_locked;
        }
        Ok(())
    }

    pub async fn make_favorite(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
    ) -> Result<(), ViewServiceError> {
        let Some((slug, id)) = self.remote_target(ctx) else {
            return Ok(());
        };
        if let Some(view) = service.make_favorite(&slug, id, ctx.project_id).await? {
            self.record.is_favorite = view.is_favorite;
        }
        Ok(())
    }

    pub async fn remove_favorite(
        &mut self,
        service: &dyn ViewService,
        ctx: &ViewContext,
    ) -> Result<(), ViewServiceError> {
        let Some((slug, id)) = self.remote_target(ctx) else {
            return Ok(());
        };
        if let Some(view) = service.remove_favorite(&slug, id, ctx.project_id).await? {
            self.record.is_favorite = view.is_favorite;
        }
        Ok(())
    }

    /// Addressing precondition shared by every remote call.
    fn remote_target(&self, ctx: &ViewContext) -> Option<(String, Uuid)> {
        match (ctx.workspace_slug.clone(), self.record.id) {
            (Some(slug), Some(id)) => Some((slug, id)),
            _ => {
                debug!(
                    view = %self.record.name,
                    "skipping remote call, workspace slug or view id missing"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayFilters, FilterSet, GroupField, Layout, Priority};

    fn store_with_filters() -> ViewFilterState {
        ViewFilterState::new(ViewRecord {
            name: "Open work".to_owned(),
            filters: Some(FilterSet {
                priority: vec![Priority::High],
                ..Default::default()
            }),
            display_filters: Some(DisplayFilters::default()),
            ..Default::default()
        })
    }

    #[test]
    fn test_update_filters_marks_unsaved_and_overlays() {
        let mut store = store_with_filters();
        store.update_filters(FilterPatch {
            priority: Some(vec![Priority::Urgent]),
            ..Default::default()
        });

        assert!(store.has_unsaved_changes());
        let applied = store.applied_filters();
        assert_eq!(applied.filters.unwrap().priority, vec![Priority::Urgent]);
    }

    #[test]
    fn test_update_filters_replaces_prior_pending_wholesale() {
        let mut store = store_with_filters();
        store.update_filters(FilterPatch {
            state: Some(vec![uuid::Uuid::new_v4()]),
            ..Default::default()
        });
        store.update_filters(FilterPatch {
            priority: Some(vec![Priority::Low]),
            ..Default::default()
        });

        // The second edit dropped the first's state overlay entirely.
        let applied = store.applied_filters().filters.unwrap();
        assert!(applied.state.is_empty());
        assert_eq!(applied.priority, vec![Priority::Low]);
    }

    #[test]
    fn test_reset_restores_saved_configuration_exactly() {
        let mut store = store_with_filters();
        store.update_filters(FilterPatch {
            priority: Some(vec![]),
            ..Default::default()
        });
        store.update_display_properties(DisplayPropertyPatch {
            labels: Some(false),
            ..Default::default()
        });

        store.reset_filter_changes();

        assert!(!store.has_unsaved_changes());
        assert!(store.save_state().is_none());
        let applied = store.applied_filters();
        assert_eq!(applied.filters, store.record().filters);
        assert_eq!(applied.display_filters, store.record().display_filters);
    }

    #[test]
    fn test_applied_cannot_synthesize_missing_category() {
        let mut store = ViewFilterState::new(ViewRecord::default());
        store.update_filters(FilterPatch {
            priority: Some(vec![Priority::Urgent]),
            ..Default::default()
        });
        assert!(store.applied_filters().filters.is_none());
        assert!(store.applied_filters_query_params().is_none());
    }

    #[test]
    fn test_display_filter_edit_reconciles_against_pending_state() {
        let mut store = ViewFilterState::new(ViewRecord {
            display_filters: Some(DisplayFilters {
                layout: Layout::List,
                group_by: None,
                ..Default::default()
            }),
            ..Default::default()
        });
        // First edit switches to kanban; it lands in the pending buffer.
        store.update_display_filters(DisplayFilterPatch {
            layout: Some(Layout::Kanban),
            ..Default::default()
        });
        // The second edit sees the kanban layout through the applied
        // state and gets the ungrouped default applied.
        store.update_display_filters(DisplayFilterPatch {
            layout: Some(Layout::Kanban),
            order_by: Some(crate::model::OrderBy::Priority),
            ..Default::default()
        });

        let applied = store.applied_filters().display_filters.unwrap();
        assert_eq!(applied.group_by, Some(GroupField::State));
        assert_eq!(applied.layout, Layout::Kanban);
    }

    #[test]
    fn test_query_params_reflect_pending_edits() {
        let mut store = store_with_filters();
        assert_eq!(
            store.applied_filters_query_params().as_deref(),
            Some("priority=high")
        );
        store.update_filters(FilterPatch {
            priority: Some(vec![Priority::Urgent, Priority::High]),
            ..Default::default()
        });
        assert_eq!(
            store.applied_filters_query_params().as_deref(),
            Some("priority=urgent,high")
        );
    }
}
