use crate::model::story::StoryRecord;
use crate::util::text::{truncate_chars, underline};

pub const MAX_TITLE_CHARS: usize = 140;
pub const CHANGELOG_ID_WIDTH: usize = 14;

fn long_title(story: &StoryRecord) -> String {
    let title = format!("[{}] {}", story.id, story.name);
    truncate_chars(&title, MAX_TITLE_CHARS).to_string()
}

/// README style: title, dashed underline, description, blank line.
pub fn format_long(stories: &[StoryRecord]) -> String {
    let mut out = String::new();
    for story in stories {
        let title = long_title(story);
        out.push_str(&title);
        out.push('\n');
        out.push_str(&underline(&title, '-'));
        out.push('\n');
        out.push_str(story.description.text());
        out.push_str("\n\n");
    }
    out
}

/// Changelog style: one `* [id]` bullet per story.
pub fn format_short(stories: &[StoryRecord]) -> String {
    stories
        .iter()
        .map(|story| {
            let id = format!("[{}]", story.id);
            format!("* {id:<width$} {}\n", story.name, width = CHANGELOG_ID_WIDTH)
        })
        .collect()
}
