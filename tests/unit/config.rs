use super::*;

#[test]
fn defaults_match_the_classic_layout() {
    let opts = GeneratorOptions::default();
    assert_eq!(opts.prefix, "DC");
    assert_eq!(opts.separator, "_");
    opts.validate().unwrap();
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let opts = GeneratorOptions::from_json_str(r#"{"prefix":"BOARD"}"#).unwrap();
    assert_eq!(opts.prefix, "BOARD");
    assert_eq!(opts.separator, "_");
    assert_eq!(
        GeneratorOptions::from_json_str("{}").unwrap(),
        GeneratorOptions::default()
    );
}

#[test]
fn invalid_options_are_rejected() {
    for json in [
        r#"{"prefix":""}"#,
        r#"{"prefix":"1DC"}"#,
        r#"{"prefix":"D-C"}"#,
        r#"{"separator":"::"}"#,
        r#"{"prefix":"DC","extra":1}"#,
        "not json",
    ] {
        let err = GeneratorOptions::from_json_str(json).unwrap_err();
        assert!(matches!(err, DevconfError::Config(_)), "{json}: {err}");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GeneratorOptions::from_json_file("/nonexistent/devconf.json").unwrap_err();
    assert!(matches!(err, DevconfError::Io { .. }));
}
