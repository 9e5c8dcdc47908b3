use async_trait::async_trait;
use tracing::debug;

use super::{xml, Tracker};
use crate::config::Config;
use crate::error::TrackerError;
use crate::model::filter::StoryFilter;
use crate::model::story::{ProjectRef, StoryRecord};

const TOKEN_HEADER: &str = "X-TrackerToken";

pub struct PivotalTracker {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl PivotalTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/projects", self.base_url)
    }

    fn project_url(&self, project_id: &str) -> String {
        format!("{}/projects/{project_id}", self.base_url)
    }

    fn stories_url(&self, project_id: &str, filter: &StoryFilter) -> String {
        format!(
            "{}/projects/{project_id}/stories?filter={}",
            self.base_url,
            filter.encoded()
        )
    }

    /// One GET, no retry. Any transport failure or non-2xx status is fatal.
    async fn get(&self, url: &str) -> Result<String, TrackerError> {
        let transport = |source: reqwest::Error| TrackerError::Transport {
            url: url.to_string(),
            source,
        };

        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(transport)?;
        debug!(url, status = %resp.status(), "response");

        resp.error_for_status()
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)
    }
}

#[async_trait]
impl Tracker for PivotalTracker {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, TrackerError> {
        let body = self.get(&self.projects_url()).await?;
        let projects = xml::parse_project_list(&body)?;
        debug!(count = projects.len(), "projects loaded");
        Ok(projects)
    }

    async fn fetch_project(&self, project_id: &str) -> Result<ProjectRef, TrackerError> {
        let body = self.get(&self.project_url(project_id)).await?;
        xml::parse_project_meta(&body)
    }

    async fn fetch_stories(
        &self,
        project_id: &str,
        filter: &StoryFilter,
    ) -> Result<Vec<StoryRecord>, TrackerError> {
        let body = self.get(&self.stories_url(project_id, filter)).await?;
        let stories = xml::parse_story_list(&body)?;
        debug!(project_id, %filter, count = stories.len(), "stories loaded");
        Ok(stories)
    }
}
