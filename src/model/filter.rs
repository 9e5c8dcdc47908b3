use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryState {
    Finished,
    Delivered,
}

impl StoryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryState::Finished => "finished",
            StoryState::Delivered => "delivered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryType {
    Feature,
    Bug,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Feature => "feature",
            StoryType::Bug => "bug",
        }
    }
}

/// A `state:` / `type:` filter expression understood by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryFilter {
    pub states: Vec<StoryState>,
    pub types: Vec<StoryType>,
}

impl StoryFilter {
    pub fn new(states: Vec<StoryState>, types: Vec<StoryType>) -> Self {
        Self { states, types }
    }

    /// Stories that are done but not yet accepted.
    pub fn delivered(story_type: StoryType) -> Self {
        Self::new(
            vec![StoryState::Delivered, StoryState::Finished],
            vec![story_type],
        )
    }

    /// The filter expression with every reserved character percent-encoded.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

fn join<T>(items: &[T], name: fn(&T) -> &'static str) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(",")
}

impl fmt::Display for StoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if !self.states.is_empty() {
            clauses.push(format!("state:{}", join(&self.states, StoryState::as_str)));
        }
        if !self.types.is_empty() {
            clauses.push(format!("type:{}", join(&self.types, StoryType::as_str)));
        }
        f.write_str(&clauses.join(" "))
    }
}
