//! Browser implementation of the selection platform.
//!
//! Reads the first range of `window.getSelection()` and reports it relative
//! to an optional container element.

use excerpt_core::{
    AnchorPosition, PlatformError, Rect, SelectionPlatform, SelectionSnapshot, SelectionState,
};
use wasm_bindgen::JsCast;

/// DOM selection source, scoped to a container element (or the whole document).
#[derive(Clone, Debug, Default)]
pub struct DomSelection {
    container: Option<web_sys::Element>,
}

impl DomSelection {
    /// Track selections inside `container`, or anywhere in the document if `None`.
    pub fn new(container: Option<web_sys::Element>) -> Self {
        Self { container }
    }

    /// Track selections anywhere in the document.
    pub fn document() -> Self {
        Self::default()
    }

    pub fn container(&self) -> Option<&web_sys::Element> {
        self.container.as_ref()
    }

    /// Viewport rect of the container, if one is tracked.
    pub fn container_rect(&self) -> Option<Rect> {
        self.container
            .as_ref()
            .map(|container| rect_from_dom(&container.get_bounding_client_rect()))
    }

    /// Position for the "add excerpt" affordance inside the container.
    pub fn anchor_for(&self, state: &SelectionState) -> Option<AnchorPosition> {
        let container = self.container.as_ref()?;
        let container_rect = rect_from_dom(&container.get_bounding_client_rect());
        state.anchor(&container_rect, container.scroll_top() as f64)
    }

    fn contains(&self, node: &web_sys::Node) -> bool {
        self.container
            .as_ref()
            .map(|container| container.contains(Some(node)))
            .unwrap_or(true)
    }
}

impl SelectionPlatform for DomSelection {
    fn selection_snapshot(&self) -> Result<Option<SelectionSnapshot>, PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        let Some(selection) = window
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
        else {
            return Ok(None);
        };

        if selection.range_count() == 0 {
            return Ok(None);
        }

        let range = selection
            .get_range_at(0)
            .map_err(|e| format!("get_range_at failed: {:?}", e))?;
        let ancestor = range
            .common_ancestor_container()
            .map_err(|e| format!("common_ancestor_container failed: {:?}", e))?;

        if !self.contains(&ancestor) {
            return Ok(Some(SelectionSnapshot {
                within_container: false,
                ..Default::default()
            }));
        }

        let text = range
            .clone_contents()
            .map_err(|e| format!("clone_contents failed: {:?}", e))?
            .text_content()
            .unwrap_or_default();

        let rects: Vec<Rect> = range
            .get_client_rects()
            .map(|list| {
                (0..list.length())
                    .filter_map(|i| list.get(i))
                    .map(|rect| rect_from_dom(&rect))
                    .collect()
            })
            .unwrap_or_default();

        // Collapsed selections at an element boundary have no client rects.
        let ancestor_rect = if rects.is_empty() {
            ancestor_element(&ancestor).map(|element| rect_from_dom(&element.get_bounding_client_rect()))
        } else {
            None
        };

        Ok(Some(SelectionSnapshot {
            rects,
            text,
            collapsed: range.collapsed(),
            ancestor_rect,
            within_container: true,
        }))
    }

    fn clear_selection(&self) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        if let Some(selection) = window
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
        {
            selection
                .remove_all_ranges()
                .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
        }
        Ok(())
    }
}

/// The node itself if it is an element, otherwise its parent element.
fn ancestor_element(node: &web_sys::Node) -> Option<web_sys::Element> {
    node.dyn_ref::<web_sys::Element>()
        .cloned()
        .or_else(|| node.parent_element())
}

pub(crate) fn rect_from_dom(rect: &web_sys::DomRect) -> Rect {
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}
