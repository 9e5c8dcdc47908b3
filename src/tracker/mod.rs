pub mod pivotal;
pub mod xml;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::model::filter::StoryFilter;
use crate::model::story::{ProjectRef, StoryRecord};

#[async_trait]
pub trait Tracker: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, TrackerError>;
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectRef, TrackerError>;
    async fn fetch_stories(
        &self,
        project_id: &str,
        filter: &StoryFilter,
    ) -> Result<Vec<StoryRecord>, TrackerError>;
}
