//! Pure derivation of the applied (effective) view configuration.
//!
//! Saved state and pending edits never touch each other directly: every
//! read of the effective configuration goes through the merge functions
//! here, so there is no cached applied state to go stale.

use crate::model::{
    DisplayFilterPatch, DisplayFilters, DisplayProperties, DisplayPropertyPatch, FilterPatch,
    FilterSet, GroupField, Layout, ViewPatch,
};

/// The effective configuration after overlaying pending edits on saved
/// state. A category is `None` when the saved record never had it; an
/// overlay alone cannot synthesize a category from nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedFilters {
    pub filters: Option<FilterSet>,
    pub display_filters: Option<DisplayFilters>,
    pub display_properties: Option<DisplayProperties>,
}

impl AppliedFilters {
    pub fn is_empty(&self) -> bool {
        self.filters.is_none() && self.display_filters.is_none() && self.display_properties.is_none()
    }
}

impl From<AppliedFilters> for ViewPatch {
    fn from(applied: AppliedFilters) -> Self {
        ViewPatch {
            filters: applied.filters,
            display_filters: applied.display_filters,
            display_properties: applied.display_properties,
            ..Default::default()
        }
    }
}

/// Right-biased field-wise merge: a facet present in the patch replaces
/// the saved facet, present-but-empty included.
pub fn merge_filters(saved: &FilterSet, patch: &FilterPatch) -> FilterSet {
    FilterSet {
        priority: patch.priority.clone().unwrap_or_else(|| saved.priority.clone()),
        state: patch.state.clone().unwrap_or_else(|| saved.state.clone()),
        assignees: patch
            .assignees
            .clone()
            .unwrap_or_else(|| saved.assignees.clone()),
        mentions: patch
            .mentions
            .clone()
            .unwrap_or_else(|| saved.mentions.clone()),
        created_by: patch
            .created_by
            .clone()
            .unwrap_or_else(|| saved.created_by.clone()),
        labels: patch.labels.clone().unwrap_or_else(|| saved.labels.clone()),
        start_date: patch
            .start_date
            .clone()
            .unwrap_or_else(|| saved.start_date.clone()),
        target_date: patch
            .target_date
            .clone()
            .unwrap_or_else(|| saved.target_date.clone()),
    }
}

pub fn merge_display_filters(saved: &DisplayFilters, patch: &DisplayFilterPatch) -> DisplayFilters {
    DisplayFilters {
        layout: patch.layout.unwrap_or(saved.layout),
        group_by: patch.group_by.unwrap_or(saved.group_by),
        sub_group_by: patch.sub_group_by.unwrap_or(saved.sub_group_by),
        order_by: patch.order_by.unwrap_or(saved.order_by),
        sub_issue: patch.sub_issue.unwrap_or(saved.sub_issue),
        show_empty_groups: patch.show_empty_groups.unwrap_or(saved.show_empty_groups),
    }
}

pub fn merge_display_properties(
    saved: &DisplayProperties,
    patch: &DisplayPropertyPatch,
) -> DisplayProperties {
    DisplayProperties {
        key: patch.key.unwrap_or(saved.key),
        state: patch.state.unwrap_or(saved.state),
        priority: patch.priority.unwrap_or(saved.priority),
        assignee: patch.assignee.unwrap_or(saved.assignee),
        labels: patch.labels.unwrap_or(saved.labels),
        start_date: patch.start_date.unwrap_or(saved.start_date),
        due_date: patch.due_date.unwrap_or(saved.due_date),
        estimate: patch.estimate.unwrap_or(saved.estimate),
        sub_issue_count: patch.sub_issue_count.unwrap_or(saved.sub_issue_count),
        attachment_count: patch.attachment_count.unwrap_or(saved.attachment_count),
        link: patch.link.unwrap_or(saved.link),
        created_on: patch.created_on.unwrap_or(saved.created_on),
        updated_on: patch.updated_on.unwrap_or(saved.updated_on),
    }
}

/// Cross-field consistency corrections for an incoming display-filter
/// edit, computed against the *currently applied* display filters (saved
/// state plus any edits already pending, not the raw input).
///
/// Rules, in order (a later rule may override an earlier one's field):
/// 1. No applied display-filter category at all: sub-grouping is
///    meaningless, drop it from the edit.
/// 2. Kanban layout: a sub-grouping equal to the grouping would collapse
///    columns into themselves, so drop the edit's grouping; an explicitly
///    ungrouped kanban is not renderable, so default the grouping to
///    `state`.
/// 3. Spreadsheet layout with inline sub-issues currently on: force the
///    toggle off, spreadsheets render a flat row set.
pub fn reconcile_display_patch(applied: Option<&DisplayFilters>, patch: &mut DisplayFilterPatch) {
    let Some(current) = applied else {
        patch.sub_group_by = None;
        return;
    };
    if current.layout == Layout::Kanban {
        if current.sub_group_by == current.group_by {
            patch.group_by = None;
        }
        if current.group_by.is_none() {
            patch.group_by = Some(Some(GroupField::State));
        }
    }
    if current.layout == Layout::Spreadsheet && current.sub_issue {
        patch.sub_issue = Some(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderBy, Priority};
    use uuid::Uuid;

    fn kanban(group_by: Option<GroupField>, sub_group_by: Option<GroupField>) -> DisplayFilters {
        DisplayFilters {
            layout: Layout::Kanban,
            group_by,
            sub_group_by,
            order_by: OrderBy::SortOrder,
            sub_issue: true,
            show_empty_groups: true,
        }
    }

    #[test]
    fn test_merge_filters_patch_facet_wins() {
        let saved = FilterSet {
            priority: vec![Priority::Low],
            labels: vec![Uuid::new_v4()],
            ..Default::default()
        };
        let patch = FilterPatch {
            priority: Some(vec![Priority::Urgent, Priority::High]),
            ..Default::default()
        };
        let merged = merge_filters(&saved, &patch);
        assert_eq!(merged.priority, vec![Priority::Urgent, Priority::High]);
        assert_eq!(merged.labels, saved.labels);
    }

    #[test]
    fn test_merge_filters_empty_patch_facet_clears() {
        let saved = FilterSet {
            state: vec![Uuid::new_v4(), Uuid::new_v4()],
            ..Default::default()
        };
        let patch = FilterPatch {
            state: Some(vec![]),
            ..Default::default()
        };
        assert!(merge_filters(&saved, &patch).state.is_empty());
    }

    #[test]
    fn test_merge_display_filters_explicit_ungroup_wins() {
        let saved = kanban(Some(GroupField::Priority), None);
        let patch = DisplayFilterPatch {
            group_by: Some(None),
            ..Default::default()
        };
        assert_eq!(merge_display_filters(&saved, &patch).group_by, None);
    }

    #[test]
    fn test_merge_display_properties_partial_toggle() {
        let saved = DisplayProperties::default();
        let patch = DisplayPropertyPatch {
            labels: Some(false),
            ..Default::default()
        };
        let merged = merge_display_properties(&saved, &patch);
        assert!(!merged.labels);
        assert!(merged.key);
        assert!(merged.due_date);
    }

    #[test]
    fn test_reconcile_without_applied_category_drops_sub_grouping() {
        let mut patch = DisplayFilterPatch {
            sub_group_by: Some(Some(GroupField::Priority)),
            layout: Some(Layout::Kanban),
            ..Default::default()
        };
        reconcile_display_patch(None, &mut patch);
        assert!(patch.sub_group_by.is_none());
        // Layout edits pass through untouched.
        assert_eq!(patch.layout, Some(Layout::Kanban));
    }

    #[test]
    fn test_reconcile_kanban_grouping_collision_drops_grouping_edit() {
        let applied = kanban(Some(GroupField::State), Some(GroupField::State));
        let mut patch = DisplayFilterPatch {
            group_by: Some(Some(GroupField::State)),
            sub_group_by: Some(Some(GroupField::State)),
            ..Default::default()
        };
        reconcile_display_patch(Some(&applied), &mut patch);
        assert!(patch.group_by.is_none());
        assert_eq!(patch.sub_group_by, Some(Some(GroupField::State)));
    }

    #[test]
    fn test_reconcile_kanban_ungrouped_defaults_to_state() {
        let applied = kanban(None, None);
        let mut patch = DisplayFilterPatch::default();
        reconcile_display_patch(Some(&applied), &mut patch);
        // Both kanban rules fire: None == None drops the grouping edit,
        // then the ungrouped default reinstates it as `state`.
        assert_eq!(patch.group_by, Some(Some(GroupField::State)));
    }

    #[test]
    fn test_reconcile_spreadsheet_forces_sub_issue_off() {
        let applied = DisplayFilters {
            layout: Layout::Spreadsheet,
            sub_issue: true,
            ..Default::default()
        };
        let mut patch = DisplayFilterPatch::default();
        reconcile_display_patch(Some(&applied), &mut patch);
        assert_eq!(patch.sub_issue, Some(false));
    }

    #[test]
    fn test_reconcile_spreadsheet_sub_issue_already_off_is_untouched() {
        let applied = DisplayFilters {
            layout: Layout::Spreadsheet,
            sub_issue: false,
            ..Default::default()
        };
        let mut patch = DisplayFilterPatch::default();
        reconcile_display_patch(Some(&applied), &mut patch);
        assert!(patch.sub_issue.is_none());
    }

    #[test]
    fn test_reconcile_list_layout_leaves_patch_alone() {
        let applied = DisplayFilters::default();
        let mut patch = DisplayFilterPatch {
            group_by: Some(Some(GroupField::Labels)),
            sub_issue: Some(true),
            ..Default::default()
        };
        let before = patch.clone();
        reconcile_display_patch(Some(&applied), &mut patch);
        assert_eq!(patch, before);
    }
}
