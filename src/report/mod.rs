pub mod format;

use tracing::info;

use crate::error::TrackerError;
use crate::model::filter::{StoryFilter, StoryType};
use crate::model::story::StoryRecord;
use crate::tracker::Tracker;
use crate::util::text::underline;

use self::format::{format_long, format_short};

const FEATURES_HEADER: &str = "New Features";
const BUGS_HEADER: &str = "Bugs Fixed";

fn heading(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
    out.push_str(&underline(text, '='));
    out.push('\n');
}

/// Features first, then bugs. Either failure aborts the report.
async fn fetch_groups(
    tracker: &dyn Tracker,
    project_id: &str,
) -> Result<(Vec<StoryRecord>, Vec<StoryRecord>), TrackerError> {
    let features = tracker
        .fetch_stories(project_id, &StoryFilter::delivered(StoryType::Feature))
        .await?;
    let bugs = tracker
        .fetch_stories(project_id, &StoryFilter::delivered(StoryType::Bug))
        .await?;
    info!(
        project_id,
        features = features.len(),
        bugs = bugs.len(),
        "stories fetched"
    );
    Ok((features, bugs))
}

pub async fn build_readme(tracker: &dyn Tracker, project_id: &str) -> Result<String, TrackerError> {
    let project = tracker.fetch_project(project_id).await?;
    let (features, bugs) = fetch_groups(tracker, project_id).await?;

    let mut out = String::new();
    heading(&mut out, &format!("README {}", project.name));
    out.push('\n');
    heading(&mut out, FEATURES_HEADER);
    out.push('\n');
    out.push_str(&format_long(&features));
    heading(&mut out, BUGS_HEADER);
    out.push('\n');
    out.push_str(&format_long(&bugs));
    Ok(out)
}

pub async fn build_changelog(
    tracker: &dyn Tracker,
    project_id: &str,
) -> Result<String, TrackerError> {
    let project = tracker.fetch_project(project_id).await?;
    let (features, bugs) = fetch_groups(tracker, project_id).await?;

    let mut out = String::new();
    heading(&mut out, &format!("Changes {}", project.name));
    out.push('\n');
    heading(&mut out, FEATURES_HEADER);
    out.push_str(&format_short(&features));
    out.push('\n');
    heading(&mut out, BUGS_HEADER);
    out.push_str(&format_short(&bugs));
    Ok(out)
}
