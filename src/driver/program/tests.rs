use super::{program_name, ProgramBundle, PARAMETER_FILE, PROGRAM_FILE};
use crate::driver::TableError;
use std::{fs, path::Path};

#[test]
fn name_from_last_component() {
    assert_eq!(program_name(Path::new("/a/b/MyProg")), "MYPROG");
    assert_eq!(program_name(Path::new("/a/b/MyProg/")), "MYPROG");
    assert_eq!(program_name(Path::new("relative")), "RELATIVE");
}

#[test]
fn name_splits_on_backslash() {
    assert_eq!(program_name(Path::new("C:\\progs\\scan")), "SCAN");
    assert_eq!(program_name(Path::new("C:\\progs\\scan\\")), "SCAN");
    assert_eq!(program_name(Path::new("/data/win\\Mixed")), "MIXED");
}

#[test]
fn name_default() {
    assert_eq!(program_name(Path::new("")), "DATA");
    assert_eq!(program_name(Path::new("/")), "DATA");
    assert_eq!(program_name(Path::new("\\")), "DATA");
}

#[test]
fn line_endings() {
    let b = ProgramBundle::new("P", "MOVE P,P1\nMOVE P,P2\r\nHALT", "P1= 1 2\n");
    assert_eq!(
        b.program_payload(),
        "NAME=P\r\nMOVE P,P1\r\nMOVE P,P2\r\nHALT\r\n"
    );
    assert_eq!(b.parameter_payload(), "P1= 1 2\r\n");
}

#[test]
fn load() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("MyProg");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join(PROGRAM_FILE), "MOVE P,P1\nHALT\n").unwrap();
    fs::write(dir.join(PARAMETER_FILE), "P1= 100.0 50.0 0 0 0 0\n").unwrap();

    let b = ProgramBundle::load(&dir).unwrap();

    assert_eq!(b.name(), "MYPROG");
    assert!(b.program_payload().starts_with("NAME=MYPROG\r\n"));
    assert_eq!(b.program_payload(), "NAME=MYPROG\r\nMOVE P,P1\r\nHALT\r\n");
    assert_eq!(b.parameter_payload(), "P1= 100.0 50.0 0 0 0 0\r\n");
}

#[test]
fn load_missing_parameters() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join(PROGRAM_FILE), "HALT\n").unwrap();

    let r = ProgramBundle::load(root.path());

    match r {
        Err(TableError::ProgramFile { path, .. }) => {
            assert_eq!(path, root.path().join(PARAMETER_FILE))
        }
        other => panic!("expected ProgramFile error, got {:?}", other),
    }
}

#[test]
fn load_missing_directory() {
    let root = tempfile::tempdir().unwrap();
    let r = ProgramBundle::load(root.path().join("nope"));
    assert!(matches!(r, Err(TableError::ProgramFile { .. })));
}
