//! Coral Estrada portfolio - client-side fragment router
//!
//! This provides the SPA shell for the portfolio site in wasm: hash-based
//! navigation, cancellable fragment loading and handler rebinding. The
//! routing core is target-agnostic so it can be tested natively; the
//! browser glue lives in the [`dom`] module.

pub mod bindings;
pub mod cancel;
pub mod error;
pub mod page;
pub mod router;

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[allow(unused_imports)]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    /// JavaScript console.log binding for debug output
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Platform-agnostic println! alternative that works in both native and WASM targets
///
/// This macro will use console.log() in WASM targets and regular println! in native targets,
/// allowing for consistent debug output across platforms.
///
/// # Examples
///
/// ```
/// use coral_portfolio::sprintln;
///
/// // Works the same as println!
/// sprintln!("Hello, world!");
/// sprintln!("Value: {}", 42);
/// ```
#[macro_export]
macro_rules! sprintln {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        $crate::log(format!($($arg)*).as_str());
        #[cfg(not(target_arch = "wasm32"))]
        println!($($arg)*);
    }};
}

/// Main entry point for starting the WASM application in a browser
///
/// This function should be called from JavaScript once the shell page has
/// loaded. It wires the router to the document, subscribes to location
/// changes and performs the initial route.
///
/// # Returns
///
/// Result indicating success or failure
///
/// # Example (JavaScript)
///
/// ```javascript
/// import init, {start} from './pkg/coral_portfolio.js';
///
/// async function run() {
///     await init();
///     start();
/// }
///
/// run();
/// ```
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::boot()
}
