//! Control panel rules: the add-overlay form and list previews.

use crate::overlay::{NewOverlay, Overlay, OverlayKind};

/// Characters of a URL kept in the list preview.
pub const PREVIEW_CHARS: usize = 40;

/// Hints shown under the video surface.
pub const INSTRUCTIONS: [&str; 4] = [
    "Click and drag overlays to reposition them",
    "Drag the bottom-right corner to resize",
    "Use the controls panel to add, hide, or remove overlays",
    "Video controls are at the bottom of the player",
];

/// State of the add-overlay form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOverlayForm {
    pub open: bool,
    pub kind: OverlayKind,
    pub content: String,
}

impl AddOverlayForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "Add Overlay" button flips the form open or closed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close without submitting. Entered values are kept for next time.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Whether the current input would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Take the input if it is valid, resetting and closing the form.
    ///
    /// Whitespace-only content is rejected silently and leaves the form
    /// untouched. Accepted content is passed on as typed.
    pub fn submit(&mut self) -> Option<NewOverlay> {
        if !self.can_submit() {
            return None;
        }
        let new_overlay = NewOverlay::new(self.kind, std::mem::take(&mut self.content));
        self.kind = OverlayKind::Text;
        self.open = false;
        Some(new_overlay)
    }

    pub fn content_label(&self) -> &'static str {
        if self.kind.is_media() {
            "Image URL"
        } else {
            "Text Content"
        }
    }

    pub fn content_placeholder(&self) -> &'static str {
        if self.kind.is_media() {
            "https://example.com/logo.png"
        } else {
            "Enter text..."
        }
    }
}

/// Text shown for an overlay in the list.
///
/// Text overlays show their full content. Logo and image overlays show the
/// first [`PREVIEW_CHARS`] characters of the URL followed by `...`, whatever
/// the URL length.
pub fn content_preview(overlay: &Overlay) -> String {
    if overlay.kind.is_media() {
        let head: String = overlay.content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        overlay.content.clone()
    }
}

/// Heading of the overlay list.
pub fn list_heading(count: usize) -> String {
    format!("Active Overlays ({count})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayId;

    fn overlay(kind: OverlayKind, content: &str) -> Overlay {
        Overlay {
            id: OverlayId::new("a"),
            kind,
            content: content.to_string(),
            position_x: 50.0,
            position_y: 50.0,
            width: 150.0,
            height: 150.0,
            z_index: 1,
            is_visible: true,
        }
    }

    #[test]
    fn test_whitespace_submit_is_rejected_and_form_stays_open() {
        let mut form = AddOverlayForm::new();
        form.toggle();
        form.content = "   ".to_string();
        assert!(form.submit().is_none());
        assert!(form.open);
        assert_eq!(form.content, "   ");
    }

    #[test]
    fn test_submit_resets_and_closes() {
        let mut form = AddOverlayForm::new();
        form.toggle();
        form.kind = OverlayKind::Logo;
        form.content = " https://example.com/logo.png ".to_string();

        let new_overlay = form.submit().unwrap();
        assert_eq!(new_overlay.kind, OverlayKind::Logo);
        assert_eq!(new_overlay.content, " https://example.com/logo.png ");
        assert_eq!(form, AddOverlayForm::default());
    }

    #[test]
    fn test_cancel_closes_without_clearing() {
        let mut form = AddOverlayForm::new();
        form.toggle();
        form.content = "draft".to_string();
        form.cancel();
        assert!(!form.open);
        assert_eq!(form.content, "draft");
    }

    #[test]
    fn test_labels_follow_kind() {
        let mut form = AddOverlayForm::new();
        assert_eq!(form.content_label(), "Text Content");
        assert_eq!(form.content_placeholder(), "Enter text...");
        form.kind = OverlayKind::Image;
        assert_eq!(form.content_label(), "Image URL");
        assert_eq!(form.content_placeholder(), "https://example.com/logo.png");
    }

    #[test]
    fn test_text_preview_is_never_truncated() {
        let long = "x".repeat(120);
        assert_eq!(content_preview(&overlay(OverlayKind::Text, &long)), long);
    }

    #[test]
    fn test_media_preview_truncates_and_always_appends_ellipsis() {
        let url = format!("https://example.com/{}", "a".repeat(60));
        let preview = content_preview(&overlay(OverlayKind::Image, &url));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));

        assert_eq!(
            content_preview(&overlay(OverlayKind::Logo, "https://a.io/l.png")),
            "https://a.io/l.png..."
        );
    }

    #[test]
    fn test_media_preview_respects_char_boundaries() {
        let url = "é".repeat(50);
        let preview = content_preview(&overlay(OverlayKind::Logo, &url));
        assert_eq!(preview, format!("{}...", "é".repeat(40)));
    }

    #[test]
    fn test_list_heading() {
        assert_eq!(list_heading(0), "Active Overlays (0)");
        assert_eq!(list_heading(3), "Active Overlays (3)");
    }
}
