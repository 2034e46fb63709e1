//! Workflow/pipeline definition files.
//!
//! A definition is externally produced XML; the builder needs exactly two
//! things from it: the root element's source text (re-embedded verbatim in
//! the output) and the `parameters` section. Parameter name and value are
//! the first and second element children, by position — a hard contract with
//! the upstream definition formats, not a convention this crate may relax.

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::debug;

use hopxml_shared::{HopXmlError, Result};

/// Where a definition keeps its `parameters` section.
///
/// Workflows keep it directly under the root; pipelines nest it under the
/// root's first element child. The two formats genuinely differ here, so the
/// locator keeps the asymmetry explicit instead of unifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametersLocation {
    /// `parameters` is a direct child of the definition root.
    Direct,
    /// `parameters` lives under the root's first element child.
    NestedOneLevel,
}

/// A `(name, value)` parameter entry, read by position.
///
/// Either side may be an empty element in the source, in which case its text
/// is absent (distinct from an empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// The pieces of a definition file the builder consumes.
#[derive(Debug, Clone)]
pub(crate) struct ParsedDefinition {
    /// The root element exactly as it appears in the source file.
    pub root_xml: String,
    /// Parameter entries in document order.
    pub parameters: Vec<Parameter>,
}

/// Parse a definition file and extract the verbatim root plus its parameters.
pub(crate) fn parse_definition(
    path: &Path,
    location: ParametersLocation,
) -> Result<ParsedDefinition> {
    let source = std::fs::read_to_string(path).map_err(|e| HopXmlError::io(path, e))?;
    let doc = Document::parse(&source).map_err(|e| HopXmlError::xml(path, e.to_string()))?;

    let root = doc.root_element();
    // Slicing the source keeps the embedded definition byte-identical, and
    // skips any XML declaration or prolog before the root element.
    let root_xml = source[root.range()].to_string();
    let parameters = extract_parameters(root, location, path)?;

    debug!(
        path = %path.display(),
        root = root.tag_name().name(),
        parameters = parameters.len(),
        "parsed definition"
    );

    Ok(ParsedDefinition {
        root_xml,
        parameters,
    })
}

fn extract_parameters(
    root: Node<'_, '_>,
    location: ParametersLocation,
    path: &Path,
) -> Result<Vec<Parameter>> {
    let scope = match location {
        ParametersLocation::Direct => root,
        ParametersLocation::NestedOneLevel => element_children(root).next().ok_or_else(|| {
            HopXmlError::schema(format!(
                "{}: definition root has no element children",
                path.display()
            ))
        })?,
    };

    let section = element_children(scope)
        .find(|n| n.has_tag_name("parameters"))
        .ok_or_else(|| {
            HopXmlError::schema(format!(
                "{}: no `parameters` section found",
                path.display()
            ))
        })?;

    let mut parameters = Vec::new();
    for entry in element_children(section) {
        let mut fields = element_children(entry);
        let name = fields.next().ok_or_else(|| {
            HopXmlError::schema(format!(
                "{}: parameter entry has no name child",
                path.display()
            ))
        })?;
        let value = fields.next().ok_or_else(|| {
            HopXmlError::schema(format!(
                "{}: parameter `{}` has no value child",
                path.display(),
                name.text().unwrap_or_default()
            ))
        })?;

        parameters.push(Parameter {
            name: name.text().map(str::to_string),
            value: value.text().map(str::to_string),
        });
    }

    Ok(parameters)
}

fn element_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}
