// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Turns a loaded values file into template data and renders it as Markdown.

#[cfg(test)]
mod tests;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use hashlink::LinkedHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, info, warn};

use crate::{
    annotation::Description,
    ast::{NodeKind, ScalarTag, ValuesFile},
    error::{format_location, DocsError},
    sorter::{sort_value_rows, SortOrder},
    walker::{create_value_rows, ValueRow},
};

const VALUES_HEADER_TEMPLATE_NAME: &str = "values_header.md";
const VALUES_TABLE_TEMPLATE_NAME: &str = "values_table.md";
const DEFAULT_TEMPLATE_NAME: &str = "README.md";

const VALUES_HEADER_TEMPLATE: &str = "## Values\n";

const VALUES_TABLE_TEMPLATE: &str = "\
| Key | Type | Default | Description |
|-----|------|---------|-------------|
{% for value in values -%}
| {{ value.key }} | {{ value.type }} | {{ value.default }} | {{ value.description }} |
{% endfor -%}
";

const DEFAULT_TEMPLATE: &str = "{% include \"values_header.md\" %}\n{% include \"values_table.md\" %}";

static TRAILING_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" \n").unwrap());
static BLANK_LINES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Clone, Debug, Serialize)]
pub struct TemplateData {
    pub yaml_docs_version: String,
    pub values: Vec<ValueRow>,
    // Descriptions of keyed comments (`# some.key -- text`), by key.
    pub keyed_descriptions: LinkedHashMap<String, Description>,
}

pub fn get_template_data(
    file: &ValuesFile,
    keyed_descriptions: LinkedHashMap<String, Description>,
    sort_order: SortOrder,
    yaml_docs_version: &str,
) -> Result<TemplateData, DocsError> {
    let values = get_sorted_value_rows(file, sort_order)?;
    let data = TemplateData {
        yaml_docs_version: yaml_docs_version.to_string(),
        values,
        keyed_descriptions,
    };
    Ok(data)
}

fn get_sorted_value_rows(file: &ValuesFile, sort_order: SortOrder) -> Result<Vec<ValueRow>, DocsError> {
    // Handle empty values file.
    let Some(doc) = file.docs.first() else {
        return Ok(Vec::new());
    };

    if file.docs.len() > 1 {
        debug!(
            "{}: ignoring {} documents after the first one",
            file.filename,
            file.docs.len() - 1
        );
    }

    let root = doc.root.resolve();
    match &root.kind {
        NodeKind::Mapping(_) => {}
        NodeKind::Scalar(scalar) if scalar.tag == ScalarTag::Null => return Ok(Vec::new()),
        _ => {
            return Err(DocsError::Structural {
                location: format_location(&file.filename, &root.src_loc),
                message: format!("values file must resolve to a map, not a {}", root.kind_name()),
            })
        }
    }

    let mut rows = create_value_rows(&file.filename, root)?;
    sort_value_rows(&mut rows, sort_order);
    Ok(rows)
}

pub struct DocumentationTemplate {
    tera: Tera,
    entry_name: String,
}

impl DocumentationTemplate {
    // Template files that don't exist are skipped. Without any usable template file, the built-in template is used.
    pub fn new(template_files: &[PathBuf]) -> Result<DocumentationTemplate, DocsError> {
        let mut templates = vec![
            (VALUES_HEADER_TEMPLATE_NAME.to_string(), VALUES_HEADER_TEMPLATE.to_string()),
            (VALUES_TABLE_TEMPLATE_NAME.to_string(), VALUES_TABLE_TEMPLATE.to_string()),
        ];

        let mut entry_name = None;
        for path in template_files {
            let Some(content) = read_template_file(path)? else {
                warn!("Did not find template file {}, skipping", path.display());
                continue;
            };

            let name = template_name(path);
            info!("Using template file {}", path.display());
            entry_name.get_or_insert_with(|| name.clone());
            templates.push((name, content));
        }

        let entry_name = match entry_name {
            Some(entry_name) => entry_name,
            None => {
                debug!("No template files found, using the default template");
                templates.push((DEFAULT_TEMPLATE_NAME.to_string(), DEFAULT_TEMPLATE.to_string()));
                DEFAULT_TEMPLATE_NAME.to_string()
            }
        };

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates(templates).map_err(|err| DocsError::Template {
            name: entry_name.clone(),
            source: err,
        })?;

        Ok(DocumentationTemplate { tera, entry_name })
    }

    pub fn render(&self, data: &TemplateData) -> Result<String, DocsError> {
        let template_error = |err| DocsError::Template {
            name: self.entry_name.clone(),
            source: err,
        };

        let context = Context::from_serialize(data).map_err(template_error)?;
        let output = self.tera.render(&self.entry_name, &context).map_err(template_error)?;
        Ok(apply_markdown_format(&output))
    }
}

fn read_template_file(path: &Path) -> Result<Option<String>, DocsError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.replace("\r\n", "\n"))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(DocsError::ReadTemplate {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

fn template_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

pub fn apply_markdown_format(output: &str) -> String {
    let output = TRAILING_SPACE_REGEX.replace_all(output, "\n");
    let output = BLANK_LINES_REGEX.replace_all(&output, "\n\n");
    output.into_owned()
}
