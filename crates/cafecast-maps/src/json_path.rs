//! Fault-tolerant indexing into loosely structured JSON.
//!
//! Upstream payloads (the map-search blob in particular) are deeply nested
//! arrays whose shape is not guaranteed. [`try_path`] walks a sequence of
//! array indices and object keys and gives up with `None` at the first step
//! that does not fit.

use serde_json::Value;

/// One step of a path: an array position or an object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
    Index(usize),
    Key(&'a str),
}

impl From<usize> for PathStep<'_> {
    fn from(i: usize) -> Self {
        PathStep::Index(i)
    }
}

impl<'a> From<&'a str> for PathStep<'a> {
    fn from(k: &'a str) -> Self {
        PathStep::Key(k)
    }
}

/// Returns the value at `path` below `root`, or `None` if any step is
/// invalid: indexing a non-array, keying a non-object, an out-of-range
/// index, or a missing key.
///
/// An explicit `null` reached at the end of the path is returned as
/// `Some(&Value::Null)`; callers decide whether that counts as absent.
#[must_use]
pub fn try_path<'v>(root: &'v Value, path: &[PathStep<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(root, |current, step| match (step, current) {
        (PathStep::Index(i), Value::Array(items)) => items.get(*i),
        (PathStep::Key(k), Value::Object(map)) => map.get(*k),
        _ => None,
    })
}

/// Convenience wrapper for purely positional paths.
#[must_use]
pub fn try_index<'v>(root: &'v Value, indices: &[usize]) -> Option<&'v Value> {
    let path: Vec<PathStep<'_>> = indices.iter().copied().map(PathStep::Index).collect();
    try_path(root, &path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// `[[null, [[0, 1, ..., 13, "target"]]]]`: `"target"` sits at `[0, 1, 0, 14]`.
    fn nested() -> Value {
        let mut leaf: Vec<Value> = (0..14).map(|n| json!(n)).collect();
        leaf.push(json!("target"));
        json!([[null, [leaf]]])
    }

    #[test]
    fn valid_path_returns_value() {
        let root = nested();
        assert_eq!(try_index(&root, &[0, 1, 0, 14]), Some(&json!("target")));
    }

    #[test]
    fn empty_path_returns_root() {
        let root = json!({"a": 1});
        assert_eq!(try_path(&root, &[]), Some(&root));
    }

    #[test]
    fn fails_at_depth_zero_when_root_is_not_an_array() {
        let root = json!({"0": "not an array"});
        assert_eq!(try_index(&root, &[0, 1, 0, 14]), None);
    }

    #[test]
    fn fails_at_depth_one_when_index_out_of_range() {
        let root = json!([[null]]);
        assert_eq!(try_index(&root, &[0, 1, 0, 14]), None);
    }

    #[test]
    fn fails_at_depth_two_when_step_hits_a_scalar() {
        let root = json!([[null, 42]]);
        assert_eq!(try_index(&root, &[0, 1, 0, 14]), None);
    }

    #[test]
    fn fails_at_depth_three_when_leaf_array_too_short() {
        let root = json!([[null, [[0, 1, 2]]]]);
        assert_eq!(try_index(&root, &[0, 1, 0, 14]), None);
    }

    #[test]
    fn null_intermediate_is_treated_as_invalid() {
        let root = json!([[null, null]]);
        assert_eq!(try_index(&root, &[0, 1, 0]), None);
    }

    #[test]
    fn mixed_keys_and_indices() {
        let root = json!({
            "rows": [{"elements": [{"duration": {"text": "15 mins", "value": 900}}]}]
        });
        let path = [
            PathStep::from("rows"),
            PathStep::Index(0),
            "elements".into(),
            PathStep::Index(0),
            "duration".into(),
            "text".into(),
        ];
        assert_eq!(
            try_path(&root, &path).and_then(Value::as_str),
            Some("15 mins")
        );
    }

    #[test]
    fn missing_key_returns_none() {
        let root = json!({"rows": []});
        let path = [PathStep::from("rows"), PathStep::Index(0), "elements".into()];
        assert_eq!(try_path(&root, &path), None);
    }

    #[test]
    fn key_step_on_array_returns_none() {
        let root = json!([1, 2, 3]);
        assert_eq!(try_path(&root, &[PathStep::Key("0")]), None);
    }
}
