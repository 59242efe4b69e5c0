use dioxus::prelude::*;

#[component]
pub fn AtomIcon(#[props(default = "h-10 w-10".to_string())] class: String) -> Element {
    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "1.5",
            "aria-hidden": "true",
            circle { cx: "12", cy: "12", r: "1.5", fill: "currentColor" }
            ellipse { cx: "12", cy: "12", rx: "10", ry: "4" }
            ellipse { cx: "12", cy: "12", rx: "10", ry: "4", transform: "rotate(60 12 12)" }
            ellipse { cx: "12", cy: "12", rx: "10", ry: "4", transform: "rotate(120 12 12)" }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = "h-8 w-8".to_string())] class: String) -> Element {
    rsx! {
        svg {
            class: "animate-spin {class}",
            view_box: "0 0 24 24",
            fill: "none",
            "aria-hidden": "true",
            circle {
                class: "opacity-25",
                cx: "12",
                cy: "12",
                r: "10",
                stroke: "currentColor",
                stroke_width: "4",
            }
            path {
                class: "opacity-75",
                fill: "currentColor",
                d: "M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z",
            }
        }
    }
}

#[component]
pub fn WarningIcon(#[props(default = "h-6 w-6".to_string())] class: String) -> Element {
    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "1.5",
            "aria-hidden": "true",
            path {
                stroke_linecap: "round",
                stroke_linejoin: "round",
                d: "M12 9v3.75m-9.303 3.376c-.866 1.5.217 3.374 1.948 3.374h14.71c1.73 0 2.813-1.874 1.948-3.374L13.949 3.378c-.866-1.5-3.032-1.5-3.898 0L2.697 16.126zM12 15.75h.007v.008H12v-.008z",
            }
        }
    }
}
