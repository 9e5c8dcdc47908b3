pub const NO_DESCRIPTION: &str = "No Description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Optional text field of a story. Empty text counts as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    Present(String),
    Absent,
}

impl Description {
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(t) if !t.trim().is_empty() => Description::Present(t.to_string()),
            _ => Description::Absent,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Description::Present(t) => t,
            Description::Absent => NO_DESCRIPTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRecord {
    pub id: String,
    pub name: String,
    pub description: Description,
}
