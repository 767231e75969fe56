//! Pipelines built from several expressions, applied the way file names see them.

use batch_rename::transform::{ParseError, Pipeline};

#[test]
fn substitution_count_and_global() {
    assert_eq!(Pipeline::compile("s/foo/bar/").unwrap().apply("foofoo"), "barfoo");
    assert_eq!(Pipeline::compile("s/foo/bar/g").unwrap().apply("foofoo"), "barbar");
}

#[test]
fn complement_delete_keeps_search_set() {
    let p = Pipeline::compile("y/a-z//cd").unwrap();
    assert_eq!(p.apply("ab1c "), "abc");
}

#[test]
fn operations_run_left_to_right() {
    let p = Pipeline::compile("s/IMG_/trip /; y/A-Z/a-z/ tr/ /_/").unwrap();
    assert_eq!(p.len(), 3);
    assert_eq!(p.apply("IMG_Beach"), "trip_beach");
}

#[test]
fn extend_appends_and_keeps_pipeline_on_error() {
    let mut p = Pipeline::compile("s/a/b/").unwrap();
    p.extend("s/b/c/").unwrap();
    assert_eq!(p.apply("a"), "c");

    assert!(p.extend("s/ok/fine/; s/(/x/").is_err());
    assert_eq!(p.len(), 2);
}

#[test]
fn alternate_delimiters() {
    assert_eq!(Pipeline::compile("s#/#-#g").unwrap().apply("a/b/c"), "a-b-c");
    assert_eq!(Pipeline::compile("y|ab|AB|").unwrap().apply("abc"), "ABc");
    assert_eq!(Pipeline::compile(r"s\a\b\").unwrap().apply("aa"), "ba");
}

#[test]
fn parse_errors() {
    assert!(matches!(
        Pipeline::compile("x/a/b/"),
        Err(ParseError::UnrecognizedOperation(_))
    ));
    assert!(matches!(Pipeline::compile("s/a/b"), Err(ParseError::Unterminated(_))));
    assert!(matches!(Pipeline::compile("sxaxbx"), Err(ParseError::InvalidDelimiter(_))));
    assert!(matches!(
        Pipeline::compile("s/a/b/q"),
        Err(ParseError::InvalidFlag { flag: 'q', .. })
    ));
    assert!(matches!(Pipeline::compile("y/z-a/x/"), Err(ParseError::InvalidRange(_))));
    assert!(matches!(Pipeline::compile("s/[/x/"), Err(ParseError::Regex(_))));
}

#[test]
fn empty_text_is_identity() {
    let p: Pipeline = "".parse().unwrap();
    assert!(p.is_empty());
    assert_eq!(p.apply("same.txt"), "same.txt");
}

#[test]
fn operations_are_exposed_in_order() {
    use batch_rename::transform::Operation;

    let p = Pipeline::compile(r"s/a\Z/b/3; y/x/y/").unwrap();
    match p.operations() {
        [Operation::Substitute(s), Operation::Transliterate(_)] => {
            assert_eq!(s.pattern(), r"a\z");
            assert_eq!(s.limit(), 3);
        }
        other => panic!("unexpected operations: {other:?}"),
    }
}
