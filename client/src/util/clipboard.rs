//! Copy a rendered container's contents to the system clipboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The album table hands its `<tbody>` element to this module when the user
//! clicks Copy. The export selects the element as a text range, runs the
//! platform copy command against that selection, and always releases the
//! selection afterwards.
//!
//! ERROR HANDLING
//! ==============
//! Copy failures are logged through the `log` facade and reported as a plain
//! `bool`; callers never see a panic or a propagated error.
//!
//! TRADE-OFFS
//! ==========
//! `document.execCommand("copy")` is deprecated but copies the rendered
//! selection (table cells become tab-separated text), which the async
//! Clipboard API cannot do without rebuilding the text manually.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("no browser window or document available")]
    NoWindow,
    #[error("document selection unavailable")]
    NoSelection,
    #[error("could not select container contents: {0}")]
    RangeFailed(String),
    #[error("copy command rejected by the browser")]
    CommandRejected,
    #[error("copy command failed: {0}")]
    CommandFailed(String),
}

/// Platform operations needed to copy a container through the selection.
pub trait SelectionHost {
    /// Make the container's full contents the only active selection range.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection or range APIs are unavailable.
    fn select_contents(&mut self) -> Result<(), ClipboardError>;

    /// Run the platform copy command against the active selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is unsupported, denied, or throws.
    fn exec_copy(&mut self) -> Result<(), ClipboardError>;

    /// Remove every range from the active selection.
    fn clear_selection(&mut self);
}

/// Clears the host selection when dropped, on success and error paths alike.
struct SelectionGuard<'a, H: SelectionHost + ?Sized> {
    host: &'a mut H,
}

impl<H: SelectionHost + ?Sized> Drop for SelectionGuard<'_, H> {
    fn drop(&mut self) {
        self.host.clear_selection();
    }
}

/// Select the container, copy it, and release the selection.
///
/// # Errors
///
/// Returns the first [`ClipboardError`] raised while selecting or copying.
/// The selection is cleared before this function returns either way.
pub fn copy_contents<H: SelectionHost + ?Sized>(host: &mut H) -> Result<(), ClipboardError> {
    let mut guard = SelectionGuard { host };
    guard.host.select_contents()?;
    guard.host.exec_copy()
}

/// Copy the container to the clipboard, logging any failure.
///
/// Returns `true` when the copy command succeeded.
pub fn export_to_clipboard<H: SelectionHost + ?Sized>(host: &mut H) -> bool {
    match copy_contents(host) {
        Ok(()) => {
            log::debug!("copied table contents to clipboard");
            true
        }
        Err(e) => {
            log::error!("clipboard export failed: {e}");
            false
        }
    }
}

// =============================================================================
// BROWSER HOST
// =============================================================================

/// [`SelectionHost`] backed by the DOM selection of the current document.
#[cfg(feature = "hydrate")]
pub struct DomSelectionHost {
    root: web_sys::Element,
}

#[cfg(feature = "hydrate")]
impl DomSelectionHost {
    #[must_use]
    pub fn new(root: web_sys::Element) -> Self {
        Self { root }
    }
}

#[cfg(feature = "hydrate")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(feature = "hydrate")]
fn window_selection() -> Result<web_sys::Selection, ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::NoWindow)?;
    window
        .get_selection()
        .map_err(|e| ClipboardError::RangeFailed(js_message(&e)))?
        .ok_or(ClipboardError::NoSelection)
}

#[cfg(feature = "hydrate")]
impl SelectionHost for DomSelectionHost {
    fn select_contents(&mut self) -> Result<(), ClipboardError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ClipboardError::NoWindow)?;
        let selection = window_selection()?;

        // A range left over from the click on the copy button makes
        // `addRange` silently keep the old selection.
        selection
            .remove_all_ranges()
            .map_err(|e| ClipboardError::RangeFailed(js_message(&e)))?;

        let range = document
            .create_range()
            .map_err(|e| ClipboardError::RangeFailed(js_message(&e)))?;
        range
            .select_node(&self.root)
            .map_err(|e| ClipboardError::RangeFailed(js_message(&e)))?;
        selection
            .add_range(&range)
            .map_err(|e| ClipboardError::RangeFailed(js_message(&e)))?;

        if selection.range_count() == 0 {
            return Err(ClipboardError::NoSelection);
        }
        Ok(())
    }

    fn exec_copy(&mut self) -> Result<(), ClipboardError> {
        use wasm_bindgen::JsCast as _;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ClipboardError::NoWindow)?;
        let html = document
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| ClipboardError::CommandFailed("document is not an HTML document".to_owned()))?;
        match html.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::CommandRejected),
            Err(e) => Err(ClipboardError::CommandFailed(js_message(&e))),
        }
    }

    fn clear_selection(&mut self) {
        if let Ok(selection) = window_selection() {
            let _ = selection.remove_all_ranges();
        }
    }
}
