#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `FM_RECORD=1`, a body served by a remote host is saved as a fixture.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _stock_id: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    #[cfg(feature = "test-mode")]
    let recordable = crate::core::fixtures::is_recordable(resp.url());

    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if recordable
            && env::var("FM_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _stock_id, _ext, &text)
        {
            tracing::warn!(stock_id = _stock_id, error = %e, "FM_RECORD: failed to write fixture");
        }
    }

    Ok(text)
}
