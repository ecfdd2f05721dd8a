//! Inline error box shared by every panel.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// Shown as-is; workflow errors already carry their user-facing text.
    pub message: String,
    /// Smaller second line, e.g. what the user can do about it.
    #[props(default)]
    pub hint: Option<String>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 10px 14px; margin: 8px 0; background: #FEF2F2; color: #B91C1C; border-left: 4px solid #DC2626; border-radius: 4px; font-size: 13px;",
            "{props.message}"
            if let Some(hint) = props.hint {
                div { style: "margin-top: 4px; font-size: 12px; color: #7F1D1D;", "{hint}" }
            }
        }
    }
}
