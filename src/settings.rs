// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{ffi::OsString, path::PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::sorter::{SortOrder, ALPHANUM_SORT_ORDER};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub values_files: Vec<PathBuf>,
    pub template_files: Vec<PathBuf>,
    pub output_file: PathBuf,
    pub sort_order: SortOrder,
    pub dry_run: bool,
    pub log_level: String,
}

pub fn command() -> Command {
    Command::new("yaml-docs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates markdown documentation from the comments of YAML values files")
        .arg(
            Arg::new("values-file")
                .short('f')
                .long("values-file")
                .env("YAML_DOCS_VALUES_FILE")
                .help("Values file to document; may be given more than once")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .default_value("values.yaml"),
        )
        .arg(
            Arg::new("template-files")
                .short('t')
                .long("template-files")
                .env("YAML_DOCS_TEMPLATE_FILES")
                .help("Template file to render; the first one found is used, the others may be included from it")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .env("YAML_DOCS_OUTPUT_FILE")
                .help("Markdown file written next to each values file")
                .value_parser(value_parser!(PathBuf))
                .default_value("README.md"),
        )
        .arg(
            Arg::new("sort-values-order")
                .short('s')
                .long("sort-values-order")
                .env("YAML_DOCS_SORT_VALUES_ORDER")
                .help("Order of the documented values: alphanum or file")
                .default_value(ALPHANUM_SORT_ORDER),
        )
        .arg(
            Arg::new("dry-run")
                .short('d')
                .long("dry-run")
                .env("YAML_DOCS_DRY_RUN")
                .help("Print the documentation to stdout instead of writing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .env("YAML_DOCS_LOG_LEVEL")
                .help("Level of the log messages written to stderr")
                .value_parser(LOG_LEVELS)
                .default_value("warn"),
        )
}

pub fn settings_from_args<I, T>(args: I) -> Result<Settings, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    Ok(Settings::from_matches(&matches))
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> Settings {
        let paths = |id: &str| -> Vec<PathBuf> {
            matches
                .get_many::<PathBuf>(id)
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default()
        };

        let sort_order = matches
            .get_one::<String>("sort-values-order")
            .map(|order| SortOrder::from_setting(order))
            .unwrap_or_default();

        Settings {
            values_files: paths("values-file"),
            template_files: paths("template-files"),
            output_file: matches
                .get_one::<PathBuf>("output-file")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("README.md")),
            sort_order,
            dry_run: matches.get_flag("dry-run"),
            log_level: matches
                .get_one::<String>("log-level")
                .cloned()
                .unwrap_or_else(|| "warn".to_string()),
        }
    }
}
