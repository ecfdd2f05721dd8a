//! Loading indicator.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading...".to_string())]
    pub label: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 16px; color: #64748b; font-size: 14px;",
            "{props.label}"
        }
    }
}
