//! The document builder.
//!
//! Wraps a workflow or pipeline definition, its execution parameters, the
//! merged variable set, and the metastore payload into one
//! execution-configuration XML document for the execution service.

use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, instrument};

use hopxml_shared::{
    HopXmlError, Result, Variable, load_environment_variables, load_hop_variables,
    load_pipeline_variables, load_project_variables,
};

use crate::definition::{Parameter, ParametersLocation, parse_definition};
use crate::metastore::encode_metastore;

/// Fixed run configuration requested from the execution service.
const RUN_CONFIGURATION: &str = "local";

/// Sentinel variable appended after every merged variable set.
const SENTINEL_VARIABLE: (&str, &str) = ("jdk.debug", "release");

/// Which definition format a document wraps.
///
/// The two formats differ in the output tags and in where the definition
/// keeps its `parameters` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Workflow,
    Pipeline,
}

impl DocumentKind {
    fn configuration_tag(self) -> &'static str {
        match self {
            DocumentKind::Workflow => "workflow_configuration",
            DocumentKind::Pipeline => "pipeline_configuration",
        }
    }

    fn execution_tag(self) -> &'static str {
        match self {
            DocumentKind::Workflow => "workflow_execution_configuration",
            DocumentKind::Pipeline => "pipeline_execution_configuration",
        }
    }

    fn parameters_location(self) -> ParametersLocation {
        match self {
            DocumentKind::Workflow => ParametersLocation::Direct,
            DocumentKind::Pipeline => ParametersLocation::NestedOneLevel,
        }
    }
}

/// Builds execution-configuration XML documents.
///
/// A builder is a plain value over four constructor-supplied paths. Every
/// build call re-reads its inputs and produces a fresh document, so calls are
/// independent and reentrant; nothing is cached or mutated between calls.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    metastore_path: PathBuf,
    hop_config_path: PathBuf,
    project_config_path: PathBuf,
    environment_config_path: Option<PathBuf>,
}

impl DocumentBuilder {
    /// Create a builder over the given input files.
    ///
    /// The metastore, hop config, and project config are mandatory; the
    /// environment config may be omitted, in which case no environment
    /// variables are layered into the output.
    pub fn new(
        metastore_path: impl Into<PathBuf>,
        hop_config_path: impl Into<PathBuf>,
        project_config_path: impl Into<PathBuf>,
        environment_config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            metastore_path: metastore_path.into(),
            hop_config_path: hop_config_path.into(),
            project_config_path: project_config_path.into(),
            environment_config_path,
        }
    }

    /// Build a `workflow_configuration` document around a workflow definition.
    #[instrument(skip_all, fields(workflow = %workflow_path.as_ref().display()))]
    pub fn build_workflow_document(&self, workflow_path: impl AsRef<Path>) -> Result<String> {
        self.build_document(DocumentKind::Workflow, workflow_path.as_ref(), None)
    }

    /// Build a `pipeline_configuration` document around a pipeline definition.
    ///
    /// The pipeline run configuration contributes an extra variable layer
    /// between the hop and project sources.
    #[instrument(skip_all, fields(pipeline = %pipeline_path.as_ref().display()))]
    pub fn build_pipeline_document(
        &self,
        pipeline_path: impl AsRef<Path>,
        pipeline_config_path: impl AsRef<Path>,
    ) -> Result<String> {
        self.build_document(
            DocumentKind::Pipeline,
            pipeline_path.as_ref(),
            Some(pipeline_config_path.as_ref()),
        )
    }

    fn build_document(
        &self,
        kind: DocumentKind,
        definition_path: &Path,
        pipeline_config_path: Option<&Path>,
    ) -> Result<String> {
        let definition = parse_definition(definition_path, kind.parameters_location())?;
        let variables = self.merged_variables(pipeline_config_path)?;
        let metastore = encode_metastore(&self.metastore_path)?;

        let mut out = XmlOut::new();
        out.start(kind.configuration_tag())?;

        // The definition root goes in exactly as it appears in its source file.
        out.raw(&definition.root_xml)?;

        write_execution_configuration(&mut out, kind, &definition.parameters, &variables)?;
        out.leaf("metastore_json", Some(&metastore))?;

        out.end(kind.configuration_tag())?;
        let xml = out.finish()?;

        debug!(
            kind = ?kind,
            parameters = definition.parameters.len(),
            variables = variables.len(),
            bytes = xml.len(),
            "built document"
        );

        Ok(xml)
    }

    /// Concatenate the variable sources in precedence order.
    ///
    /// Duplicate names are kept as-is; what duplicates mean is the consumer's
    /// business, not this builder's.
    fn merged_variables(&self, pipeline_config_path: Option<&Path>) -> Result<Vec<Variable>> {
        let mut variables = load_hop_variables(&self.hop_config_path)?;

        if let Some(path) = pipeline_config_path {
            variables.extend(load_pipeline_variables(path)?);
        }

        variables.extend(load_project_variables(&self.project_config_path)?);

        if let Some(path) = &self.environment_config_path {
            variables.extend(load_environment_variables(path)?);
        }

        variables.push(Variable::new(SENTINEL_VARIABLE.0, SENTINEL_VARIABLE.1));
        Ok(variables)
    }
}

fn write_execution_configuration(
    out: &mut XmlOut,
    kind: DocumentKind,
    parameters: &[Parameter],
    variables: &[Variable],
) -> Result<()> {
    out.start(kind.execution_tag())?;

    out.start("parameters")?;
    for parameter in parameters {
        out.start("parameter")?;
        out.leaf("name", parameter.name.as_deref())?;
        out.leaf("value", parameter.value.as_deref())?;
        out.end("parameter")?;
    }
    out.end("parameters")?;

    out.start("variables")?;
    for variable in variables {
        out.start("variable")?;
        out.leaf("name", Some(&variable.name))?;
        out.leaf("value", Some(&variable.value))?;
        out.end("variable")?;
    }
    out.end("variables")?;

    out.leaf("run_configuration", Some(RUN_CONFIGURATION))?;
    out.end(kind.execution_tag())
}

/// Thin wrapper over a quick-xml writer with the crate's error mapping.
///
/// No declaration and no indentation: the output is a bare document fragment
/// serialized on one line.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn start(&mut self, tag: &str) -> Result<()> {
        self.emit(Event::Start(BytesStart::new(tag)))
    }

    fn end(&mut self, tag: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    /// Write a leaf element. Absent text yields an empty element, which is
    /// distinct from an element containing the empty string.
    fn leaf(&mut self, tag: &str, text: Option<&str>) -> Result<()> {
        match text {
            None => self.emit(Event::Empty(BytesStart::new(tag))),
            Some(text) => {
                self.emit(Event::Start(BytesStart::new(tag)))?;
                self.emit(Event::Text(BytesText::new(text)))?;
                self.emit(Event::End(BytesEnd::new(tag)))
            }
        }
    }

    /// Splice pre-serialized XML into the output unchanged.
    fn raw(&mut self, xml: &str) -> Result<()> {
        self.writer
            .get_mut()
            .write_all(xml.as_bytes())
            .map_err(|e| HopXmlError::Serialize(e.to_string()))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| HopXmlError::Serialize(e.to_string()))
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| HopXmlError::Serialize(e.to_string()))
    }
}
