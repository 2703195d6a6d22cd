// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod annotation;
mod ast;
mod document;
mod error;
mod key_path;
mod logging;
mod parser;
mod process_values;
mod settings;
mod sorter;
mod value;
mod value_type;
mod walker;

use anyhow::Error;
use tracing::info;

use crate::{
    logging::init_logging,
    process_values::{plan_pipelines, run_pipelines},
    settings::{command, Settings},
};

fn main() -> Result<(), Error> {
    let matches = command().get_matches();
    let settings = Settings::from_matches(&matches);
    init_logging(&settings.log_level);

    let pipelines = plan_pipelines(&settings.values_files, &settings.output_file, settings.dry_run)?;
    let failed = run_pipelines(&pipelines, &settings.template_files, settings.sort_order, settings.dry_run);

    info!(
        "Documented {} of {} values files",
        pipelines.len() - failed,
        pipelines.len()
    );
    Ok(())
}
