use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ViewServiceError;
use crate::model::{ViewPatch, ViewRecord};

/// Caller-supplied addressing for remote calls: which workspace the view
/// lives in and, for project-scoped views, which project. Callers resolve
/// this from their own routing state and pass it explicitly; the store
/// never reads ambient context.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub workspace_slug: Option<String>,
    pub project_id: Option<Uuid>,
}

impl ViewContext {
    pub fn workspace(slug: impl Into<String>) -> Self {
        Self {
            workspace_slug: Some(slug.into()),
            project_id: None,
        }
    }

    pub fn project(slug: impl Into<String>, project_id: Uuid) -> Self {
        Self {
            workspace_slug: Some(slug.into()),
            project_id: Some(project_id),
        }
    }
}

/// Abstraction over view persistence for testability.
/// Real implementation: `HttpViewService`. Test double: any in-memory mock.
///
/// Every method resolves to `Ok(Some(record))` when the server applied the
/// change, `Ok(None)` when it had nothing to say (empty response, or the
/// operation is not supported by this binding), and `Err` on transport or
/// server failure. Lock and favorite operations default to `Ok(None)` so a
/// minimal binding only has to implement `update`.
#[async_trait]
pub trait ViewService: Send + Sync {
    async fn update(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        patch: &ViewPatch,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError>;

    async fn lock(
        &self,
        _workspace_slug: &str,
        _view_id: Uuid,
        _project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        Ok(None)
    }

    async fn unlock(
        &self,
        _workspace_slug: &str,
        _view_id: Uuid,
        _project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        Ok(None)
    }

    async fn make_favorite(
        &self,
        _workspace_slug: &str,
        _view_id: Uuid,
        _project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        Ok(None)
    }

    async fn remove_favorite(
        &self,
        _workspace_slug: &str,
        _view_id: Uuid,
        _project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        Ok(None)
    }
}
