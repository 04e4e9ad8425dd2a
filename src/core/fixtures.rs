//! Recording helper for persisting FinMind responses as test fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use url::{Host, Url};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("FM_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Loopback responses come from mock servers and are never recorded.
pub(crate) fn is_recordable(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(d)) => d != "localhost",
        Some(Host::Ipv4(ip)) => !ip.is_loopback(),
        Some(Host::Ipv6(ip)) => !ip.is_loopback(),
        None => false,
    }
}

pub(crate) fn record_fixture(
    endpoint: &str,
    stock_id: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{endpoint}_{stock_id}.{ext}"));
    fs::write(&path, body)?;
    tracing::debug!(path = %path.display(), "FM_RECORD: wrote fixture");
    Ok(())
}
