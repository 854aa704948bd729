use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

#[allow(clippy::expect_used)]
pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock error")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("atlas-slicer-{prefix}-{nanos}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
