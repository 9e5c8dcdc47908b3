use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::error::TrackerError;
use crate::model::story::ProjectRef;
use crate::tracker::Tracker;

pub const MAX_PROMPT_ATTEMPTS: usize = 5;

/// Map a 1-based index, as shown in the picker, to a project.
pub fn resolve_index<'a>(
    projects: &'a [ProjectRef],
    raw: &str,
) -> Result<&'a ProjectRef, TrackerError> {
    let raw = raw.trim();
    let index: usize = raw.parse().map_err(|_| {
        TrackerError::InvalidSelection(format!("'{raw}' is not a project number"))
    })?;
    index
        .checked_sub(1)
        .and_then(|i| projects.get(i))
        .ok_or_else(|| {
            TrackerError::InvalidSelection(format!(
                "{index} is out of range (1-{})",
                projects.len()
            ))
        })
}

pub fn write_project_list<W: Write>(
    projects: &[ProjectRef],
    out: &mut W,
) -> std::io::Result<()> {
    for (i, project) in projects.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, project.name)?;
    }
    Ok(())
}

async fn load_projects(tracker: &dyn Tracker) -> Result<Vec<ProjectRef>> {
    let projects = tracker.list_projects().await?;
    if projects.is_empty() {
        return Err(
            TrackerError::InvalidSelection("this token has no projects".into()).into(),
        );
    }
    Ok(projects)
}

/// Non-interactive `--project-index` lookup. A bad index is fatal.
pub async fn project_by_index(tracker: &dyn Tracker, raw: &str) -> Result<String> {
    let projects = load_projects(tracker).await?;
    let project = resolve_index(&projects, raw)?;
    debug!(id = %project.id, name = %project.name, "project selected by index");
    Ok(project.id.clone())
}

fn is_cancel(line: &str) -> bool {
    matches!(line, "" | "q" | "quit")
}

/// Bounded picker loop over an already fetched project list.
pub fn prompt_project<R: BufRead, W: Write>(
    projects: &[ProjectRef],
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    for _ in 0..MAX_PROMPT_ATTEMPTS {
        writeln!(output, "Select a Project:")?;
        write_project_list(projects, output)?;
        write!(output, ">> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(
                TrackerError::InvalidSelection("no project selected".into()).into(),
            );
        }
        let line = line.trim();
        if is_cancel(line) {
            return Err(
                TrackerError::InvalidSelection("selection cancelled".into()).into(),
            );
        }

        match resolve_index(projects, line) {
            Ok(project) => return Ok(project.id.clone()),
            Err(err) => {
                debug!(%err, "retrying project prompt");
                writeln!(output, "Hmmm, that did not work -- try again?")?;
            }
        }
    }
    Err(TrackerError::InvalidSelection(format!(
        "gave up after {MAX_PROMPT_ATTEMPTS} attempts"
    ))
    .into())
}

pub async fn pick_project<R: BufRead, W: Write>(
    tracker: &dyn Tracker,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    let projects = load_projects(tracker).await?;
    prompt_project(&projects, input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn projects() -> Vec<ProjectRef> {
        vec![
            ProjectRef {
                id: "101".into(),
                name: "Alpha".into(),
            },
            ProjectRef {
                id: "202".into(),
                name: "Beta".into(),
            },
        ]
    }

    fn is_invalid_selection(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::InvalidSelection(_))
        )
    }

    #[test]
    fn index_is_one_based() {
        let list = projects();
        assert_eq!(resolve_index(&list, "1").unwrap().id, "101");
        assert_eq!(resolve_index(&list, " 2\n").unwrap().id, "202");
    }

    #[test]
    fn bad_indexes_are_rejected() {
        let list = projects();
        for raw in ["0", "3", "-1", "two", ""] {
            assert!(
                matches!(
                    resolve_index(&list, raw),
                    Err(TrackerError::InvalidSelection(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn list_is_numbered() {
        let mut out = Vec::new();
        write_project_list(&projects(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[1] Alpha\n[2] Beta\n");
    }

    #[test]
    fn prompt_accepts_first_valid_answer() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let id = prompt_project(&projects(), &mut input, &mut output).unwrap();
        assert_eq!(id, "202");

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown, "Select a Project:\n[1] Alpha\n[2] Beta\n>> ");
    }

    #[test]
    fn prompt_retries_after_invalid_answer() {
        let mut input = Cursor::new("9\nabc\n1\n");
        let mut output = Vec::new();
        let id = prompt_project(&projects(), &mut input, &mut output).unwrap();
        assert_eq!(id, "101");

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("try again?").count(), 2);
        assert_eq!(shown.matches("Select a Project:").count(), 3);
    }

    #[test]
    fn prompt_gives_up_after_max_attempts() {
        let answers = "x\n".repeat(MAX_PROMPT_ATTEMPTS + 2);
        let mut input = Cursor::new(answers);
        let mut output = Vec::new();
        let err = prompt_project(&projects(), &mut input, &mut output).unwrap_err();
        assert!(is_invalid_selection(&err));

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches(">> ").count(), MAX_PROMPT_ATTEMPTS);
    }

    #[test]
    fn prompt_cancels_on_quit_blank_or_eof() {
        for answers in ["q\n", "\n", ""] {
            let mut input = Cursor::new(answers);
            let mut output = Vec::new();
            let err = prompt_project(&projects(), &mut input, &mut output).unwrap_err();
            assert!(is_invalid_selection(&err), "{answers:?}");
        }
    }
}
