use std::collections::HashMap;

use super::*;

fn params(pairs: &[(&str, &str)]) -> CallbackParams {
    let query: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    callback_params(|key| query.get(key).cloned())
}

#[test]
fn reads_code_and_state() {
    let parsed = params(&[("code", "c1"), ("state", "s1")]);
    assert_eq!(parsed.code.as_deref(), Some("c1"));
    assert_eq!(parsed.state.as_deref(), Some("s1"));
    assert!(parsed.error.is_none());
}

#[test]
fn provider_error_is_kept() {
    let parsed = params(&[("error", "access_denied")]);
    assert_eq!(parsed.error.as_deref(), Some("access_denied"));
    assert!(parsed.code.is_none());
}

#[test]
fn blank_values_are_missing() {
    let parsed = params(&[("code", ""), ("state", "  ")]);
    assert_eq!(parsed, CallbackParams::default());
}
