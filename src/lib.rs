//! Client-side state management for saved work-item views.
//!
//! A saved view is a named filter/display configuration over a list of
//! work items. This crate owns the typed view record, a state container
//! buffering uncommitted filter edits ([`ViewFilterState`]), pure
//! derivation of the effective configuration, query-string serialization,
//! and an async persistence contract ([`ViewService`]) with an HTTP
//! binding ([`HttpViewService`]).
//!
//! The crate is deliberately inert: no reactivity, no ambient context.
//! Callers pass addressing ([`ViewContext`]) and the service into each
//! remote call and own re-render triggering themselves.

pub mod errors;
pub mod filters;
pub mod http;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use errors::ViewServiceError;
pub use filters::AppliedFilters;
pub use http::HttpViewService;
pub use model::{
    DisplayFilterPatch, DisplayFilters, DisplayProperties, DisplayPropertyPatch, FilterPatch,
    FilterSet, GroupField, Layout, OrderBy, Priority, ViewAccess, ViewPatch, ViewRecord,
};
pub use service::{ViewContext, ViewService};
pub use store::{PendingEdits, SaveState, ViewFilterState};
