// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// One documentation pipeline: read a values file, extract its rows and render them.


use std::{
    collections::HashMap,
    fs, io,
    io::Write,
    path::{Path, PathBuf},
    thread,
};

use anyhow::{anyhow, Context, Error};
use tracing::{info, warn};

use crate::{
    annotation::parse_keyed_comments,
    document::{get_template_data, DocumentationTemplate},
    error::DocsError,
    parser::parse_values_str,
    sorter::SortOrder,
};

pub const YAML_DOCS_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    pub values_file: PathBuf,
    pub output: OutputTarget,
}

// In a dry run, every pipeline prints to stdout. Otherwise two values files may not share an output file.
pub fn plan_pipelines(values_files: &[PathBuf], output_file: &Path, dry_run: bool) -> Result<Vec<Pipeline>, Error> {
    let mut outputs: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut pipelines = Vec::new();
    for values_file in values_files {
        let output = if dry_run {
            OutputTarget::Stdout
        } else {
            let path = output_path(values_file, output_file);
            if let Some(other) = outputs.insert(path.clone(), values_file) {
                return Err(anyhow!(
                    "values files {} and {} would both be documented in {}",
                    other.display(),
                    values_file.display(),
                    path.display()
                ));
            }
            OutputTarget::File(path)
        };

        let pipeline = Pipeline {
            values_file: values_file.clone(),
            output,
        };
        pipelines.push(pipeline);
    }

    Ok(pipelines)
}

// Runs every pipeline to completion and returns how many failed. Dry runs are serial so that their output
// doesn't interleave.
pub fn run_pipelines(
    pipelines: &[Pipeline],
    template_files: &[PathBuf],
    sort_order: SortOrder,
    dry_run: bool,
) -> usize {
    if dry_run {
        return pipelines
            .iter()
            .filter(|pipeline| !run_pipeline(pipeline, template_files, sort_order))
            .count();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = pipelines
            .iter()
            .map(|pipeline| scope.spawn(move || run_pipeline(pipeline, template_files, sort_order)))
            .collect();

        let mut failed = 0;
        for (pipeline, handle) in pipelines.iter().zip(handles) {
            match handle.join() {
                Ok(true) => {}
                Ok(false) => failed += 1,
                Err(_) => {
                    warn!("Documentation of {} panicked", pipeline.values_file.display());
                    failed += 1;
                }
            }
        }
        failed
    })
}

fn run_pipeline(pipeline: &Pipeline, template_files: &[PathBuf], sort_order: SortOrder) -> bool {
    match process_values_file(&pipeline.values_file, &pipeline.output, template_files, sort_order) {
        Ok(()) => true,
        Err(err) => {
            warn!("Error generating documentation for {}: {:#}", pipeline.values_file.display(), err);
            false
        }
    }
}

pub fn process_values_str(
    filename: &str,
    source: &str,
    template: &DocumentationTemplate,
    sort_order: SortOrder,
) -> Result<String, DocsError> {
    let file = parse_values_str(filename, source)?;
    let keyed_descriptions = parse_keyed_comments(source);

    let data = get_template_data(&file, keyed_descriptions, sort_order, YAML_DOCS_VERSION)?;
    template.render(&data)
}

pub fn process_values_file(
    values_file: &Path,
    output: &OutputTarget,
    template_files: &[PathBuf],
    sort_order: SortOrder,
) -> Result<(), Error> {
    info!("Generating documentation for {}", values_file.display());

    let source = read_values_file(values_file)?;
    let template = DocumentationTemplate::new(template_files)?;

    let filename = values_file.to_string_lossy();
    let output_str = process_values_str(&filename, &source, &template, sort_order)?;

    match output {
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output_str.as_bytes())?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            fs::write(path, output_str).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}

pub fn read_values_file(path: &Path) -> Result<String, DocsError> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(source.replace("\r\n", "\n")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(DocsError::MissingSource {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(DocsError::ReadSource {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

// The output file name is relative to the directory of the values file it documents.
pub fn output_path(values_file: &Path, output_file: &Path) -> PathBuf {
    match values_file.parent() {
        Some(dir) => dir.join(output_file),
        None => output_file.to_path_buf(),
    }
}
