use session::Navigator;
use session::routes;

/// Terminal stand-in for browser navigation.
///
/// Soft navigation has no terminal meaning and is only logged. A hard
/// redirect to an external URL is printed for the user to open; a hard
/// redirect to the login route means the session was torn down.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigate");
    }

    fn hard_redirect(&self, target: &str) {
        if is_external(target) {
            println!("Open this URL in your browser to sign in:\n{target}");
        } else if target == routes::LOGIN {
            eprintln!("Signed out. Run `surfer login` to sign in again.");
        } else {
            tracing::debug!(target, "hard redirect");
        }
    }
}

fn is_external(target: &str) -> bool {
    target.starts_with("https://") || target.starts_with("http://")
}
