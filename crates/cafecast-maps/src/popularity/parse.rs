//! Unpacking of the map-search response.
//!
//! The body is not JSON. It looks like
//!
//! ```text
//! {"c":0,"d":")]}'\n[[...payload...]]", ...}/*""*/
//! ```
//!
//! so it is cut at the `/*""*/` marker and at the last `}`, parsed, and the
//! string under `"d"` is parsed again after dropping its anti-XSSI prefix.
//!
//! The offsets below were found by inspecting live responses. They are not
//! documented anywhere and will silently point at the wrong data if the
//! upstream layout shifts.

use serde_json::Value;

use crate::error::MapsError;
use crate::json_path::try_index;

/// Everything after this marker is trailing script, not payload.
pub(crate) const TERMINATION_MARKER: &str = "/*\"\"*/";

/// Width of the `)]}'` guard in front of the inner JSON string.
pub(crate) const INNER_PREFIX_LEN: usize = 4;

/// Position of the first result's place-info block inside the inner payload.
pub(crate) const PLACE_INFO_PATH: [usize; 4] = [0, 1, 0, 14];

/// Position of the live popularity percentage inside the place-info block.
pub(crate) const CURRENT_POPULARITY_PATH: [usize; 3] = [84, 7, 1];

/// Peels the wrapper off a raw response body and returns the inner payload.
///
/// # Errors
///
/// Returns [`MapsError::MalformedPayload`] when either JSON layer fails to
/// parse or the `"d"` string is missing or shorter than the prefix.
pub(crate) fn extract_payload(body: &str) -> Result<Value, MapsError> {
    let head = body.split(TERMINATION_MARKER).next().unwrap_or_default();
    let head = head.rfind('}').map_or(head, |end| &head[..=end]);

    let outer: Value = serde_json::from_str(head)
        .map_err(|e| MapsError::MalformedPayload(format!("outer wrapper: {e}")))?;

    let inner = outer
        .get("d")
        .and_then(Value::as_str)
        .ok_or_else(|| MapsError::MalformedPayload("missing \"d\" string".to_string()))?;

    let inner = inner.get(INNER_PREFIX_LEN..).ok_or_else(|| {
        MapsError::MalformedPayload(format!(
            "\"d\" shorter than its {INNER_PREFIX_LEN}-character prefix"
        ))
    })?;

    serde_json::from_str(inner)
        .map_err(|e| MapsError::MalformedPayload(format!("inner payload: {e}")))
}

/// Reads the current popularity out of an unpacked payload.
///
/// Any missing or mistyped step yields `None`, as does a number outside
/// 0-100.
pub(crate) fn current_popularity(payload: &Value) -> Option<u8> {
    let info = try_index(payload, &PLACE_INFO_PATH)?;
    let raw = try_index(info, &CURRENT_POPULARITY_PATH)?.as_u64()?;
    u8::try_from(raw).ok().filter(|p| *p <= 100)
}
