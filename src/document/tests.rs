use std::fs;

use super::*;
use crate::{annotation::parse_keyed_comments, parser::parse_values_str};

fn template_data(input: &str, sort_order: SortOrder) -> Result<TemplateData, DocsError> {
    let file = parse_values_str("values.yaml", input)?;
    get_template_data(&file, parse_keyed_comments(input), sort_order, "1.2.3")
}

fn keys(data: &TemplateData) -> Vec<&str> {
    data.values.iter().map(|row| row.key.as_str()).collect()
}

#[test]
fn empty_values_file() {
    assert!(template_data("", SortOrder::AlphaNum).unwrap().values.is_empty());
    assert!(template_data("# only a comment\n", SortOrder::AlphaNum).unwrap().values.is_empty());
    assert!(template_data("---\n", SortOrder::AlphaNum).unwrap().values.is_empty());
    assert!(template_data("{}\n", SortOrder::AlphaNum).unwrap().values.is_empty());
}

#[test]
fn root_must_be_a_map() {
    let err = template_data("- a\n- b\n", SortOrder::AlphaNum).unwrap_err();
    assert_eq!(err.to_string(), "values.yaml:1:1 values file must resolve to a map, not a sequence");

    let err = template_data("just text\n", SortOrder::AlphaNum).unwrap_err();
    assert!(matches!(err, DocsError::Structural { .. }));
}

#[test]
fn rows_are_sorted() {
    let input = "b: 1\na:\n  c: 2\n  d: 3\n";
    let data = template_data(input, SortOrder::AlphaNum).unwrap();
    assert_eq!(keys(&data), vec!["a.c", "a.d", "b"]);

    let data = template_data(input, SortOrder::File).unwrap();
    assert_eq!(keys(&data), vec!["b", "a.c", "a.d"]);
    assert_eq!(data.yaml_docs_version, "1.2.3");
}

#[test]
fn only_the_first_document_is_documented() {
    let data = template_data("a: 1\n---\nb: 2\n", SortOrder::AlphaNum).unwrap();
    assert_eq!(keys(&data), vec!["a"]);
}

#[test]
fn keyed_descriptions_are_kept_apart_from_rows() {
    let input = "# animals.cats -- all the cats\nanimals:\n  cats: 1\n";
    let data = template_data(input, SortOrder::AlphaNum).unwrap();
    assert_eq!(data.values.len(), 1);
    assert_eq!(data.values[0].description, "");
    assert_eq!(data.keyed_descriptions.get("animals.cats").unwrap().description, "all the cats");
}

#[test]
fn default_template() {
    let template = DocumentationTemplate::new(&[]).unwrap();
    let data = template_data("# -- is she friendly?\nfoxtrot: true\ncats: [echo]\n", SortOrder::AlphaNum).unwrap();
    let output = template.render(&data).unwrap();

    let expected = "\
## Values

| Key | Type | Default | Description |
|-----|------|---------|-------------|
| cats[0] | string | `\"echo\"` |  |
| foxtrot | bool | `true` | is she friendly? |
";
    assert_eq!(output, expected);
}

#[test]
fn user_template_can_include_partials() {
    let dir = tempfile::tempdir().unwrap();
    let template_file = dir.path().join("README.md.gotmpl");
    fs::write(
        &template_file,
        "# My values (v{{ yaml_docs_version }})   \n\n\n\n{% include \"values_table.md\" %}\
{% for key, desc in keyed_descriptions %}{{ key }}: {{ desc.description }}\n{% endfor %}",
    )
    .unwrap();

    let missing = dir.path().join("missing.md");
    let template = DocumentationTemplate::new(&[missing, template_file]).unwrap();

    let data = template_data("# extra.key -- keyed\na: 1\n", SortOrder::AlphaNum).unwrap();
    let output = template.render(&data).unwrap();

    let expected = "\
# My values (v1.2.3)  

| Key | Type | Default | Description |
|-----|------|---------|-------------|
| a | int | `1` |  |
extra.key: keyed
";
    assert_eq!(output, expected);
}

#[test]
fn broken_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let template_file = dir.path().join("broken.md");
    fs::write(&template_file, "{% for %}").unwrap();

    let result = DocumentationTemplate::new(&[template_file]);
    assert!(matches!(result, Err(DocsError::Template { ref name, .. }) if name == "broken.md"));
}

#[test]
fn markdown_format() {
    assert_eq!(apply_markdown_format("a \nb\n\n\n\nc\n"), "a\nb\n\nc\n");
    assert_eq!(apply_markdown_format("a  \n"), "a \n");
}
