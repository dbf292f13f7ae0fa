use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Board layout for rendering a view's work items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    List,
    Kanban,
    Calendar,
    Spreadsheet,
    Gantt,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Kanban => "kanban",
            Self::Calendar => "calendar",
            Self::Spreadsheet => "spreadsheet",
            Self::Gantt => "gantt",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "kanban" => Ok(Self::Kanban),
            "calendar" => Ok(Self::Calendar),
            "spreadsheet" => Ok(Self::Spreadsheet),
            "gantt" => Ok(Self::Gantt),
            _ => Err(format!("Invalid layout: {}", s)),
        }
    }
}

/// Work-item attribute used to bucket items into columns or sections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    State,
    Priority,
    Labels,
    Assignees,
    CreatedBy,
    Project,
}

impl GroupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Priority => "priority",
            Self::Labels => "labels",
            Self::Assignees => "assignees",
            Self::CreatedBy => "created_by",
            Self::Project => "project",
        }
    }
}

impl FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(Self::State),
            "priority" => Ok(Self::Priority),
            "labels" => Ok(Self::Labels),
            "assignees" => Ok(Self::Assignees),
            "created_by" => Ok(Self::CreatedBy),
            "project" => Ok(Self::Project),
            _ => Err(format!("Invalid group field: {}", s)),
        }
    }
}

/// Sort key applied to the item list within each group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    SortOrder,
    CreatedAt,
    UpdatedAt,
    Priority,
    StartDate,
    TargetDate,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SortOrder => "sort_order",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Priority => "priority",
            Self::StartDate => "start_date",
            Self::TargetDate => "target_date",
        }
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sort_order" => Ok(Self::SortOrder),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "priority" => Ok(Self::Priority),
            "start_date" => Ok(Self::StartDate),
            "target_date" => Ok(Self::TargetDate),
            _ => Err(format!("Invalid order key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// Visibility of a saved view within its workspace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewAccess {
    Private,
    Public,
}

/// Multi-select filter facets. Each facet holds the selected identifiers
/// (or literal values for priority and dates); an empty facet means
/// "no constraint on this field".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Uuid>,
    /// ISO dates, optionally prefixed with a comparator (e.g. `2024-01-01;after`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start_date: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_date: Vec<String>,
}

impl FilterSet {
    /// Facets in wire order with their values rendered as strings.
    /// The order here is the canonical order for query-param output.
    pub fn facets(&self) -> Vec<(&'static str, Vec<String>)> {
        vec![
            (
                "priority",
                self.priority.iter().map(|p| p.as_str().to_owned()).collect(),
            ),
            ("state", self.state.iter().map(Uuid::to_string).collect()),
            (
                "assignees",
                self.assignees.iter().map(Uuid::to_string).collect(),
            ),
            (
                "mentions",
                self.mentions.iter().map(Uuid::to_string).collect(),
            ),
            (
                "created_by",
                self.created_by.iter().map(Uuid::to_string).collect(),
            ),
            ("labels", self.labels.iter().map(Uuid::to_string).collect()),
            ("start_date", self.start_date.clone()),
            ("target_date", self.target_date.clone()),
        ]
    }
}

/// Partial overlay for `FilterSet`. A present field replaces the saved
/// facet outright, even when the replacement is empty (clearing a facet).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub priority: Option<Vec<Priority>>,
    pub state: Option<Vec<Uuid>>,
    pub assignees: Option<Vec<Uuid>>,
    pub mentions: Option<Vec<Uuid>>,
    pub created_by: Option<Vec<Uuid>>,
    pub labels: Option<Vec<Uuid>>,
    pub start_date: Option<Vec<String>>,
    pub target_date: Option<Vec<String>>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.state.is_none()
            && self.assignees.is_none()
            && self.mentions.is_none()
            && self.created_by.is_none()
            && self.labels.is_none()
            && self.start_date.is_none()
            && self.target_date.is_none()
    }
}

fn default_true() -> bool {
    true
}

/// Display options controlling how the applied item set is arranged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayFilters {
    pub layout: Layout,
    /// `None` renders a flat, ungrouped list.
    #[serde(default)]
    pub group_by: Option<GroupField>,
    #[serde(default)]
    pub sub_group_by: Option<GroupField>,
    pub order_by: OrderBy,
    /// Whether sub-issues are shown inline under their parent.
    #[serde(default = "default_true")]
    pub sub_issue: bool,
    #[serde(default = "default_true")]
    pub show_empty_groups: bool,
}

impl Default for DisplayFilters {
    fn default() -> Self {
        Self {
            layout: Layout::List,
            group_by: None,
            sub_group_by: None,
            order_by: OrderBy::SortOrder,
            sub_issue: true,
            show_empty_groups: true,
        }
    }
}

/// Partial overlay for `DisplayFilters`.
///
/// Grouping fields are doubly optional: the outer `Option` is "does this
/// edit touch the field at all", the inner one distinguishes an explicit
/// "ungrouped" from a concrete grouping field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayFilterPatch {
    pub layout: Option<Layout>,
    pub group_by: Option<Option<GroupField>>,
    pub sub_group_by: Option<Option<GroupField>>,
    pub order_by: Option<OrderBy>,
    pub sub_issue: Option<bool>,
    pub show_empty_groups: Option<bool>,
}

impl DisplayFilterPatch {
    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
            && self.group_by.is_none()
            && self.sub_group_by.is_none()
            && self.order_by.is_none()
            && self.sub_issue.is_none()
            && self.show_empty_groups.is_none()
    }
}

/// Boolean toggles controlling which optional item fields render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayProperties {
    pub key: bool,
    pub state: bool,
    pub priority: bool,
    pub assignee: bool,
    pub labels: bool,
    pub start_date: bool,
    pub due_date: bool,
    pub estimate: bool,
    pub sub_issue_count: bool,
    pub attachment_count: bool,
    pub link: bool,
    pub created_on: bool,
    pub updated_on: bool,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        Self {
            key: true,
            state: true,
            priority: true,
            assignee: true,
            labels: true,
            start_date: true,
            due_date: true,
            estimate: true,
            sub_issue_count: true,
            attachment_count: true,
            link: true,
            created_on: true,
            updated_on: true,
        }
    }
}

/// Partial overlay for `DisplayProperties`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayPropertyPatch {
    pub key: Option<bool>,
    pub state: Option<bool>,
    pub priority: Option<bool>,
    pub assignee: Option<bool>,
    pub labels: Option<bool>,
    pub start_date: Option<bool>,
    pub due_date: Option<bool>,
    pub estimate: Option<bool>,
    pub sub_issue_count: Option<bool>,
    pub attachment_count: Option<bool>,
    pub link: Option<bool>,
    pub created_on: Option<bool>,
    pub updated_on: Option<bool>,
}

impl DisplayPropertyPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A saved view: a named filter/display configuration over a list of
/// work items, fetched from and persisted to the remote tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewRecord {
    /// Absent on drafts that have never been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_filters: Option<DisplayFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_properties: Option<DisplayProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<ViewAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ViewRecord {
    /// Build a new snapshot with every field the patch provides
    /// overwritten. Fields the patch omits carry over unchanged.
    pub fn merged_with(&self, patch: &ViewPatch) -> ViewRecord {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(query) = &patch.query {
            next.query = Some(query.clone());
        }
        if let Some(filters) = &patch.filters {
            next.filters = Some(filters.clone());
        }
        if let Some(display_filters) = &patch.display_filters {
            next.display_filters = Some(display_filters.clone());
        }
        if let Some(display_properties) = &patch.display_properties {
            next.display_properties = Some(display_properties.clone());
        }
        if let Some(access) = patch.access {
            next.access = Some(access);
        }
        if let Some(sort_order) = patch.sort_order {
            next.sort_order = Some(sort_order);
        }
        next
    }
}

/// Partial view sent to the remote update endpoint. Only the fields a
/// caller may change travel here; absent fields are left out of the
/// request body entirely.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ViewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_filters: Option<DisplayFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_properties: Option<DisplayProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<ViewAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

impl ViewPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
