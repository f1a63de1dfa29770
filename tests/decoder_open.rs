use std::fs;

use anyhow::Result;
use fst_activity::FstDecoder;

#[test]
fn missing_file_is_a_readable_open_failure() {
    let err = FstDecoder::open("/nonexistent/never.fst").unwrap_err();
    assert_eq!(err.code(), 7777);
    let message = err.to_string();
    assert!(message.contains("never.fst"), "message was: {message}");
}

#[test]
fn non_fst_bytes_are_a_readable_open_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("garbage.fst");
    fs::write(&path, b"this is not an FST container")?;

    let err = FstDecoder::open(&path).unwrap_err();
    assert_eq!(err.code(), 7777);
    Ok(())
}
