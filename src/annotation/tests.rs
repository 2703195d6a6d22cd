use super::*;

fn description(text: &str) -> Description {
    Description {
        description: text.to_string(),
        ..Default::default()
    }
}

#[test]
fn simple_description() {
    let (key, desc) = parse_comment(&["# -- is she friendly?"]);
    assert_eq!(key, None);
    assert_eq!(desc, description("is she friendly?"));
}

#[test]
fn indented_description() {
    let (key, desc) = parse_comment(&["    #   -- the friendly animals of the house"]);
    assert_eq!(key, None);
    assert_eq!(desc.description, "the friendly animals of the house");
}

#[test]
fn description_with_default() {
    let (_, desc) = parse_comment(&["# -- echo", "# @default -- some"]);
    assert_eq!(desc.description, "echo");
    assert_eq!(desc.default.as_deref(), Some("some"));
}

#[test]
fn multiline_description() {
    let lines = [
        "  # -- The best kind of animal probably, allow me to list their many varied benefits.",
        "  # Cats are very funny, and quite friendly, in almost all cases",
        "  # @default -- The list of cats that _I_ own",
    ];
    let (_, desc) = parse_comment(&lines);
    assert_eq!(
        desc.description,
        "The best kind of animal probably, allow me to list their many varied benefits. Cats are very funny, and quite friendly, in almost all cases"
    );
    assert_eq!(desc.default.as_deref(), Some("The list of cats that _I_ own"));
}

#[test]
fn plain_comment_is_inert() {
    let (key, desc) = parse_comment(&["# doesn't show up", "# nor does this"]);
    assert_eq!(key, None);
    assert_eq!(desc, Description::default());
    assert!(!desc.has_description());
}

#[test]
fn last_description_group_wins() {
    let lines = ["# -- old description", "# old continuation", "# some remark", "# -- new description"];
    let (_, desc) = parse_comment(&lines);
    assert_eq!(desc.description, "new description");
}

#[test]
fn unspaced_lines_do_not_continue() {
    let (_, desc) = parse_comment(&["# -- first", "#second", "# third"]);
    assert_eq!(desc.description, "first third");
}

#[test]
fn empty_default_is_ignored() {
    let (_, desc) = parse_comment(&["# -- first", "# @default --"]);
    assert_eq!(desc.default, None);
}

#[test]
fn type_override_is_recorded() {
    let (_, desc) = parse_comment(&["# -- (list) the list of birds we have"]);
    assert_eq!(desc.type_override.as_deref(), Some("list"));
    assert_eq!(desc.description, "(list) the list of birds we have");
}

#[test]
fn keyed_comment() {
    let (key, desc) = parse_comment(&["# animals.cats -- all the cats", "# @default -- none"]);
    assert_eq!(key.as_deref(), Some("animals.cats"));
    assert_eq!(desc.description, "all the cats");
    assert_eq!(desc.default.as_deref(), Some("none"));
}

#[test]
fn keyed_comment_is_not_structural() {
    assert_eq!(structural_description(&["# animals.cats -- all the cats"]), Description::default());
    assert_eq!(structural_description(&["# -- all the cats"]), description("all the cats"));
    assert_eq!(structural_description::<&str>(&[]), Description::default());
}

#[test]
fn keyed_comments_in_source() {
    let source = "\
# animals.cats -- all the cats
# they are very funny
# @default -- none
animals:
  # -- not keyed
  cats: []
  # fullNames.\"John Norwood\" -- who am I
  # @default -- me
  # plain remark
  dogs: []
# trailing.key -- at the end";

    let descriptions = parse_keyed_comments(source);
    let keys: Vec<&str> = descriptions.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["animals.cats", r#"fullNames."John Norwood""#, "trailing.key"]);

    let cats = descriptions.get("animals.cats").unwrap();
    assert_eq!(cats.description, "all the cats they are very funny");
    assert_eq!(cats.default.as_deref(), Some("none"));

    let me = descriptions.get(r#"fullNames."John Norwood""#).unwrap();
    assert_eq!(me.description, "who am I plain remark");
    assert_eq!(me.default.as_deref(), Some("me"));

    assert_eq!(descriptions.get("trailing.key").unwrap().description, "at the end");
}

#[test]
fn keyed_comment_keys_are_normalized() {
    let descriptions = parse_keyed_comments("# some remark -- with dashes\n# a.b[0] -- first b\nkey: 1\n");
    let keys: Vec<&str> = descriptions.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["some remark", "a.b[0]"]);
}
