use dioxus::prelude::*;

use crate::ui::icons::Spinner;

#[component]
pub fn RevealButton(busy: bool, label: &'static str, on_reveal: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "inline-flex items-center justify-center gap-2 rounded-lg bg-indigo-500 px-5 py-2.5 text-sm font-semibold text-white shadow transition hover:bg-indigo-400 disabled:cursor-not-allowed disabled:opacity-60",
            r#type: "button",
            disabled: busy,
            onclick: move |_| {
                if !busy {
                    on_reveal.call(());
                }
            },
            if busy {
                Spinner { class: "h-4 w-4".to_string() }
            }
            "{label}"
        }
    }
}
