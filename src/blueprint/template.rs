//! Blueprint template import
//!
//! Templates are fragments cut from Liftoff track files:
//!
//! ```text
//! <blueprints xmlns:xsi="..." xmlns:xsd="...">
//!   <TrackBlueprint xsi:type="TrackBlueprintFlag">
//!     <itemID>...</itemID>
//!     <instanceID>...</instanceID>
//!     <position><x>...</x><y>...</y><z>...</z></position>
//!     <rotation><x>...</x><y>...</y><z>...</z></rotation>
//!     <purpose>Functional</purpose>
//!   </TrackBlueprint>
//! </blueprints>
//! ```
//!
//! Only the handful of elements above are read, so this is a tag scanner
//! rather than a general XML parser.

use std::path::Path;
use crate::math::{Euler, Vec3};
use super::blueprint::Blueprint;
use super::item::Item;

/// Element holding one track item
pub const ITEM_ELEMENT: &str = "TrackBlueprint";

/// Error type for template loading
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("item {index}: missing <{tag}>")]
    MissingElement { index: usize, tag: &'static str },
    #[error("item {index}: invalid <{tag}> value '{value}'")]
    InvalidNumber {
        index: usize,
        tag: &'static str,
        value: String,
    },
    #[error("no <TrackBlueprint> elements found")]
    Empty,
}

/// Load a template file; the blueprint is named after the file stem
pub fn load_template(path: &Path) -> Result<Blueprint, TemplateError> {
    let contents = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    parse_template(&name, &contents)
}

/// Parse template contents into a blueprint
pub fn parse_template(name: &str, contents: &str) -> Result<Blueprint, TemplateError> {
    let mut blueprint = Blueprint::new(name);

    for (index, body) in find_elements(contents, ITEM_ELEMENT).into_iter().enumerate() {
        blueprint.add(parse_item(index, body)?);
    }

    if blueprint.is_empty() {
        return Err(TemplateError::Empty);
    }
    Ok(blueprint)
}

fn parse_item(index: usize, body: &str) -> Result<Item, TemplateError> {
    let item_id = required(index, body, "itemID")?;

    let raw_instance = required(index, body, "instanceID")?;
    let instance_id = raw_instance
        .parse::<u64>()
        .map_err(|_| TemplateError::InvalidNumber {
            index,
            tag: "instanceID",
            value: raw_instance.to_string(),
        })?;

    let position = required(index, body, "position")?;
    let rotation = required(index, body, "rotation")?;

    let position = Vec3::new(
        required_float(index, position, "x")?,
        required_float(index, position, "y")?,
        required_float(index, position, "z")?,
    );
    let rotation = Euler::new(
        required_float(index, rotation, "x")?,
        required_float(index, rotation, "y")?,
        required_float(index, rotation, "z")?,
    );

    Ok(Item::new(item_id, instance_id, position, rotation))
}

fn required<'a>(index: usize, body: &'a str, tag: &'static str) -> Result<&'a str, TemplateError> {
    find_elements(body, tag)
        .first()
        .map(|s| s.trim())
        .ok_or(TemplateError::MissingElement { index, tag })
}

fn required_float(index: usize, body: &str, tag: &'static str) -> Result<f64, TemplateError> {
    let raw = required(index, body, tag)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TemplateError::InvalidNumber {
            index,
            tag,
            value: raw.to_string(),
        })
}

/// Inner text of every `<tag ...>...</tag>` in `src`, in document order.
///
/// Elements of the same name must not nest.
fn find_elements<'a>(src: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut found = Vec::new();
    let mut rest = src;

    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];

        // Whole tag name only: `<x>` must not match `<xsi:...>`
        if !matches!(after.chars().next(), Some('>') | Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
            rest = after;
            continue;
        }

        let Some(gt) = after.find('>') else { break };
        let body = &after[gt + 1..];
        let Some(end) = body.find(&close) else { break };

        found.push(&body[..end]);
        rest = &body[end + close.len()..];
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<blueprints xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <TrackBlueprint xsi:type="TrackBlueprintFlag">
    <itemID>GateSquare01</itemID>
    <instanceID>12</instanceID>
    <position>
      <x>1.5</x>
      <y>0</y>
      <z>-2.25</z>
    </position>
    <rotation>
      <x>0</x>
      <y>90</y>
      <z>0</z>
    </rotation>
    <purpose>Functional</purpose>
  </TrackBlueprint>
  <TrackBlueprint xsi:type="TrackBlueprintFlag">
    <itemID>FlagPole</itemID>
    <instanceID>13</instanceID>
    <position><x>0</x><y>3</y><z>0</z></position>
    <rotation><x>10</x><y>20</y><z>30</z></rotation>
    <purpose>Functional</purpose>
  </TrackBlueprint>
</blueprints>"#;

    #[test]
    fn test_parse_sample() {
        let bp = parse_template("Chicane", SAMPLE).unwrap();
        assert_eq!(bp.name, "Chicane");
        assert_eq!(bp.len(), 2);

        let first = &bp.items()[0];
        assert_eq!(first.item_id, "GateSquare01");
        assert_eq!(first.instance_id, 12);
        assert_eq!(first.position(), Vec3::new(1.5, 0.0, -2.25));
        assert_eq!(first.rotation(), Euler::new(0.0, 90.0, 0.0));

        let second = &bp.items()[1];
        assert_eq!(second.item_id, "FlagPole");
        assert_eq!(second.rotation(), Euler::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_missing_element() {
        let src = "<TrackBlueprint><itemID>A</itemID><instanceID>1</instanceID>\
                   <position><x>0</x><y>0</y></position>\
                   <rotation><x>0</x><y>0</y><z>0</z></rotation></TrackBlueprint>";
        let err = parse_template("Broken", src).unwrap_err();
        assert!(matches!(err, TemplateError::MissingElement { index: 0, tag: "z" }));
    }

    #[test]
    fn test_invalid_number() {
        let src = "<TrackBlueprint><itemID>A</itemID><instanceID>1</instanceID>\
                   <position><x>0</x><y>up</y><z>0</z></position>\
                   <rotation><x>0</x><y>0</y><z>0</z></rotation></TrackBlueprint>";
        let err = parse_template("Broken", src).unwrap_err();
        match err {
            TemplateError::InvalidNumber { tag, value, .. } => {
                assert_eq!(tag, "y");
                assert_eq!(value, "up");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_template() {
        let err = parse_template("Nothing", "<blueprints></blueprints>").unwrap_err();
        assert!(matches!(err, TemplateError::Empty));
    }

    #[test]
    fn test_tag_prefix_is_not_a_match() {
        let found = find_elements("<xsi:thing>1</xsi:thing><x>2</x>", "x");
        assert_eq!(found, vec!["2"]);
    }

    #[test]
    fn test_load_template_uses_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Chicane.xml");
        std::fs::write(&path, SAMPLE).unwrap();

        let bp = load_template(&path).unwrap();
        assert_eq!(bp.name, "Chicane");
        assert_eq!(bp.len(), 2);
    }
}
