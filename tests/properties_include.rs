//! Integration tests for file loading, includes and default containers.
//!
//! Every test builds its property files inside a fresh temporary directory
//! through `common::PropertiesFixture`.

mod common;

use collection_kit::error::Error;
use collection_kit::properties::ExtendedProperties;
use common::PropertiesFixture;

#[test]
fn test_from_file_sets_base_path() {
    let fixture = PropertiesFixture::new().with_file("app.properties", "name=demo\n");
    let props = fixture.load("app.properties");

    assert_eq!(props.get_string("name").as_deref(), Some("demo"));
    let base = props.base_path().expect("base path is set");
    assert_eq!(base, fixture.root().canonicalize().unwrap());
}

#[test]
fn test_relative_include_is_merged() {
    let fixture = PropertiesFixture::new()
        .with_file(
            "app.properties",
            "first=1\ninclude=conf/db.properties\nlast=3\n",
        )
        .with_file("conf/db.properties", "db.url=jdbc:hsqldb\nfirst=again\n");

    let props = fixture.load("app.properties");
    assert_eq!(
        props.keys().collect::<Vec<_>>(),
        vec!["first", "db.url", "last"]
    );
    assert_eq!(props.get_string_array("first"), vec!["1", "again"]);
    assert!(!props.contains_key("include"));
}

#[test]
fn test_dot_slash_and_absolute_includes() {
    let fixture = PropertiesFixture::new().with_file("b.properties", "b=2\n");
    let absolute = fixture.write("abs/c.properties", "c=3\n");
    fixture.write(
        "a.properties",
        &format!(
            "a=1\ninclude=./b.properties\ninclude={}\n",
            absolute.display()
        ),
    );

    let props = fixture.load("a.properties");
    assert_eq!(props.get_int("a").unwrap(), 1);
    assert_eq!(props.get_int("b").unwrap(), 2);
    assert_eq!(props.get_int("c").unwrap(), 3);
}

#[test]
fn test_include_key_is_case_insensitive_and_configurable() {
    let fixture = PropertiesFixture::new()
        .with_file("main.properties", "IMPORT=extra.properties\ninclude=kept\n")
        .with_file("extra.properties", "extra=yes\n");

    let mut props = ExtendedProperties::new();
    props.set_include(Some("import"));
    props.load_file(fixture.path("main.properties")).unwrap();

    assert!(props.get_bool("extra").unwrap());
    assert_eq!(props.get_string("include").as_deref(), Some("kept"));
}

#[test]
fn test_missing_include_is_skipped() {
    let fixture = PropertiesFixture::new().with_file(
        "app.properties",
        "before=1\ninclude=nowhere.properties\nafter=2\n",
    );

    let props = fixture.load("app.properties");
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["before", "after"]);
}

#[test]
fn test_nested_includes_resolve_against_top_level_base() {
    let fixture = PropertiesFixture::new()
        .with_file("top.properties", "include=mid/mid.properties\n")
        .with_file("mid/mid.properties", "mid=1\ninclude=leaf.properties\n")
        .with_file("leaf.properties", "leaf=1\n");

    let props = fixture.load("top.properties");
    assert!(props.contains_key("mid"));
    assert!(props.contains_key("leaf"));
}

#[test]
fn test_include_cycle_is_an_error() {
    let fixture = PropertiesFixture::new()
        .with_file("a.properties", "a=1\ninclude=b.properties\n")
        .with_file("b.properties", "b=1\ninclude=a.properties\n");

    let err = ExtendedProperties::from_file(fixture.path("a.properties")).unwrap_err();
    match err {
        Error::IncludeCycle { cycle } => {
            assert!(cycle.contains("a.properties"));
            assert!(cycle.contains("b.properties"));
        }
        other => panic!("expected IncludeCycle, got {:?}", other),
    }
}

#[test]
fn test_self_include_is_an_error() {
    let fixture = PropertiesFixture::new().with_file("loop.properties", "include=loop.properties\n");

    let mut props = ExtendedProperties::new();
    props.set_base_path(fixture.root());
    let err = props
        .load("include=loop.properties\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, Error::IncludeCycle { .. }));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let fixture = PropertiesFixture::new();
    let err = ExtendedProperties::from_file(fixture.path("absent.properties")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_from_file_with_defaults() {
    let fixture = PropertiesFixture::new()
        .with_file("site.properties", "port=9090\n")
        .with_file("defaults.properties", "port=8080\nhost=localhost\n");

    let props = ExtendedProperties::from_file_with_defaults(
        fixture.path("site.properties"),
        fixture.path("defaults.properties"),
    )
    .unwrap();

    assert_eq!(props.get_int("port").unwrap(), 9090);
    assert_eq!(props.get_string("host").as_deref(), Some("localhost"));
    assert_eq!(props.len(), 1);
    assert_eq!(props.defaults().map(ExtendedProperties::len), Some(2));
}

#[test]
fn test_file_round_trip() {
    let fixture = PropertiesFixture::new().with_file("in.properties", common::snippets::MIXED);
    let original = fixture.load("in.properties");

    let out = std::fs::File::create(fixture.path("out.properties")).unwrap();
    original.save(out, Some("copied")).unwrap();

    let reloaded = fixture.load("out.properties");
    for key in original.keys() {
        assert_eq!(reloaded.get_vector(key), original.get_vector(key), "key {}", key);
    }
}
