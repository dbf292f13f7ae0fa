//! HTTP binding of [`ViewService`] against the tracker's REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::errors::ViewServiceError;
use crate::model::{ViewPatch, ViewRecord};
use crate::service::ViewService;

const API_KEY_HEADER: &str = "X-API-Key";

/// `ViewService` over the tracker's REST endpoints.
///
/// Views live at `/api/workspaces/{slug}/views/{id}/`, or under
/// `/projects/{project}/` for project-scoped views. Lock and favorite are
/// sub-resources toggled with POST/DELETE.
pub struct HttpViewService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpViewService {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Use a caller-configured client (timeouts, proxies, extra headers).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn view_url(&self, slug: &str, view_id: Uuid, project_id: Option<Uuid>) -> String {
        match project_id {
            Some(project) => format!(
                "{}/api/workspaces/{}/projects/{}/views/{}/",
                self.base_url, slug, project, view_id
            ),
            None => format!(
                "{}/api/workspaces/{}/views/{}/",
                self.base_url, slug, view_id
            ),
        }
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ViewServiceError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }
        let body = response.text().await?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(ViewServiceError::Decode)
    }
}

#[async_trait]
impl ViewService for HttpViewService {
    async fn update(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        patch: &ViewPatch,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let url = self.view_url(workspace_slug, view_id, project_id);
        self.execute(self.client.patch(&url).json(patch), &url).await
    }

    async fn lock(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let url = format!(
            "{}lock/",
            self.view_url(workspace_slug, view_id, project_id)
        );
        self.execute(self.client.post(&url), &url).await
    }

    async fn unlock(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let url = format!(
            "{}lock/",
            self.view_url(workspace_slug, view_id, project_id)
        );
        self.execute(self.client.delete(&url), &url).await
    }

    async fn make_favorite(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let url = format!(
            "{}favorite/",
            self.view_url(workspace_slug, view_id, project_id)
        );
        self.execute(self.client.post(&url), &url).await
    }

    async fn remove_favorite(
        &self,
        workspace_slug: &str,
        view_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Option<ViewRecord>, ViewServiceError> {
        let url = format!(
            "{}favorite/",
            self.view_url(workspace_slug, view_id, project_id)
        );
        self.execute(self.client.delete(&url), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_view_url() {
        let service = HttpViewService::new("https://tracker.example.com/", "key");
        let id = Uuid::nil();
        assert_eq!(
            service.view_url("acme", id, None),
            format!("https://tracker.example.com/api/workspaces/acme/views/{}/", id)
        );
    }

    #[test]
    fn test_project_view_url() {
        let service = HttpViewService::new("https://tracker.example.com", "key");
        let view = Uuid::nil();
        let project = Uuid::max();
        assert_eq!(
            service.view_url("acme", view, Some(project)),
            format!(
                "https://tracker.example.com/api/workspaces/acme/projects/{}/views/{}/",
                project, view
            )
        );
    }
}
