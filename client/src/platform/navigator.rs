//! Router-aware navigator.
//!
//! Soft navigation goes through the Leptos router once `attach` has been
//! called from inside `<Router>`; before that it falls back to a full page
//! load. Hard redirects always assign `window.location`.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::cell::RefCell;
use std::rc::Rc;

use session::Navigator;

type SoftNavigate = Rc<dyn Fn(&str)>;

#[derive(Default)]
pub struct BrowserNavigator {
    router: RefCell<Option<SoftNavigate>>,
}

impl std::fmt::Debug for BrowserNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserNavigator").field("attached", &self.router.borrow().is_some()).finish()
    }
}

impl BrowserNavigator {
    pub fn attach(&self, navigate: impl Fn(&str) + 'static) {
        *self.router.borrow_mut() = Some(Rc::new(navigate));
    }

    pub fn is_attached(&self) -> bool {
        self.router.borrow().is_some()
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        // Released before the call: the router may re-enter through an effect.
        let router = self.router.borrow().clone();
        match router {
            Some(navigate) => navigate(path),
            None => assign_location(path),
        }
    }

    fn hard_redirect(&self, target: &str) {
        assign_location(target);
    }
}

fn assign_location(target: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(window) = web_sys::window() else {
            log::error!("navigator: no window for redirect to {target}");
            return;
        };
        if window.location().set_href(target).is_err() {
            log::error!("navigator: redirect to {target} rejected");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("navigator: skipping page load to {target} outside the browser");
    }
}
