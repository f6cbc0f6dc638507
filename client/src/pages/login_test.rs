use super::*;

#[test]
fn known_callback_codes_have_specific_messages() {
    assert_eq!(login_error_message("oauth_error"), "Google sign-in was cancelled or refused.");
    assert_eq!(
        login_error_message("invalid_callback"),
        "The sign-in response was incomplete. Please try again."
    );
    assert_eq!(login_error_message("callback_failed"), "We could not complete sign-in. Please try again.");
}

#[test]
fn unknown_code_falls_back_to_generic_message() {
    assert_eq!(login_error_message("teapot"), "Sign-in failed. Please try again.");
    assert_eq!(login_error_message(""), "Sign-in failed. Please try again.");
}
