use std::io;
use std::path::Path;

use batch_rename::RenameError;
use batch_rename::fs_ops::io_error_with_help;

#[test]
fn notfound_hint_includes_op_and_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("stage", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("stage"));
    assert!(msg.contains("/nonexistent/path/for/test"));
    assert!(msg.contains("path not found"));
    assert_eq!(err.kind(), "io");
    assert!(err.io_error().is_some());
}

#[cfg(unix)]
#[test]
fn exdev_hint_present() {
    let err = io_error_with_help("commit", Path::new("/mnt/x"))(io::Error::from_raw_os_error(libc::EXDEV));
    assert!(err.to_string().contains("cross-filesystem"), "msg was: {err}");
    assert!(err.to_string().contains(&format!("[os code: {}]", libc::EXDEV)), "msg was: {err}");
}

#[cfg(unix)]
#[test]
fn eexist_hint_suggests_force() {
    let err = io_error_with_help("commit", Path::new("/tmp/t"))(io::Error::from_raw_os_error(libc::EEXIST));
    assert!(err.to_string().contains("--force"), "msg was: {err}");
}

#[test]
fn per_file_errors_have_stable_kinds() {
    assert_eq!(RenameError::TargetExists("/x".into()).kind(), "target_exists");
    assert_eq!(RenameError::Displaced("a".into()).to_string(), "reverted to make room for `a`");
    assert_eq!(RenameError::NoInput.to_string(), "no input");
    assert_eq!(RenameError::Interrupted.kind(), "interrupted");
    assert!(RenameError::EmptyLine.io_error().is_none());
}
