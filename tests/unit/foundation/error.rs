use super::*;

fn pos() -> SourcePosition {
    SourcePosition::new("board.dc", 12, 7)
}

#[test]
fn compile_errors_render_with_location() {
    let err = ErrorKind::ConstAssignment.at(&pos());
    assert_eq!(
        err.to_string(),
        "Error: board.dc, line 12.7 : Constants can be assigned to only once."
    );
}

#[test]
fn incompatible_types_names_both_types() {
    let msg = ErrorKind::incompatible("int", "string").at(&pos()).to_string();
    assert!(msg.contains("Type \"string\" is incompatible with type \"int\"."));
}

#[test]
fn duplicate_description_names_kind_and_nodes() {
    let kind = ErrorKind::DuplicateDescription {
        kind: DescriptionKind::Allow,
        first: "allow {1}".to_string(),
        second: "allow {2}".to_string(),
    };
    assert_eq!(
        kind.to_string(),
        "Multiple allow filters in description set: First: allow {1}; Second: allow {2}."
    );
}

#[test]
fn result_ext_attaches_position() {
    let r: Result<(), ErrorKind> = Err(ErrorKind::NoActiveScope);
    let err = r.at(&pos()).unwrap_err();
    assert_eq!(err.pos, pos());
    assert_eq!(err.kind, ErrorKind::NoActiveScope);
}

#[test]
fn relocate_keeps_kind() {
    let err = ErrorKind::Unnamed.at(&pos());
    let moved = err.relocate(&SourcePosition::new("other.dc", 1, 2));
    assert_eq!(moved.kind, ErrorKind::Unnamed);
    assert_eq!(moved.pos.line, 1);
}

#[test]
fn compile_error_passes_through_devconf_error() {
    let err: DevconfError = ErrorKind::UndefinedName("x".into()).at(&pos()).into();
    assert!(err.to_string().starts_with("Error: board.dc, line 12.7 :"));
}

#[test]
fn io_error_names_path() {
    let err = DevconfError::io("missing.dc", std::io::Error::other("boom"));
    let msg = err.to_string();
    assert!(msg.contains("missing.dc"));
    assert!(msg.contains("boom"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DevconfError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
