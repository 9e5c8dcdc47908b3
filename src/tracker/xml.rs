use roxmltree::{Document, Node, ParsingOptions};

use crate::error::TrackerError;
use crate::model::story::{Description, ProjectRef, StoryRecord};

/// Responses may carry a `<!DOCTYPE>`; it is accepted and otherwise ignored.
fn parse(body: &str) -> Result<Document<'_>, TrackerError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(body, options)?)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn required_text(node: Node, field: &str) -> Result<String, TrackerError> {
    child(node, field)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .ok_or_else(|| {
            TrackerError::MalformedResponse(format!(
                "<{}> is missing <{field}>",
                node.tag_name().name()
            ))
        })
}

fn root_named<'a, 'input>(
    doc: &'a Document<'input>,
    name: &str,
) -> Result<Node<'a, 'input>, TrackerError> {
    let root = doc.root_element();
    if root.tag_name().name() != name {
        return Err(TrackerError::MalformedResponse(format!(
            "expected <{name}> but found <{}>",
            root.tag_name().name()
        )));
    }
    Ok(root)
}

fn records<'a, 'input>(
    container: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    container
        .children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn project_from(node: Node) -> Result<ProjectRef, TrackerError> {
    Ok(ProjectRef {
        id: required_text(node, "id")?,
        name: required_text(node, "name")?,
    })
}

/// Parse a single `<project>` document.
pub fn parse_project_meta(body: &str) -> Result<ProjectRef, TrackerError> {
    let doc = parse(body)?;
    project_from(root_named(&doc, "project")?)
}

/// Parse a `<projects>` list, keeping service order.
pub fn parse_project_list(body: &str) -> Result<Vec<ProjectRef>, TrackerError> {
    let doc = parse(body)?;
    let root = root_named(&doc, "projects")?;
    records(root, "project").map(project_from).collect()
}

/// Parse a `<stories>` list in document order. Duplicates are kept.
pub fn parse_story_list(body: &str) -> Result<Vec<StoryRecord>, TrackerError> {
    let doc = parse(body)?;
    let root = root_named(&doc, "stories")?;
    records(root, "story")
        .map(|node| {
            Ok(StoryRecord {
                id: required_text(node, "id")?,
                name: required_text(node, "name")?,
                description: Description::from_text(
                    child(node, "description").and_then(|d| d.text()),
                ),
            })
        })
        .collect()
}
