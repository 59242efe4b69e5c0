use dioxus::prelude::*;

use crate::state::ContentView;
use crate::ui::icons::{Spinner, WarningIcon};

/// Content area: exactly one of spinner, fact or error.
#[component]
pub fn FactCard(view: ContentView) -> Element {
    let body = match view {
        ContentView::Spinner => rsx! {
            div { class: "flex flex-col items-center gap-3 text-indigo-300",
                Spinner { class: "h-10 w-10".to_string() }
                p { class: "text-sm text-slate-400", "Consulting the cosmos..." }
            }
        },
        ContentView::Fact(fact) => rsx! {
            p { class: "text-lg leading-relaxed text-slate-100 text-center", "{fact}" }
        },
        ContentView::Error(message) => rsx! {
            div { class: "flex flex-col items-center gap-2 text-center text-red-300", role: "alert",
                WarningIcon { class: "h-8 w-8".to_string() }
                p { class: "text-sm font-semibold", "Something went wrong" }
                p { class: "text-xs text-red-200", "{message}" }
            }
        },
    };

    rsx! {
        div { class: "flex min-h-[10rem] items-center justify-center rounded-xl border border-slate-700 bg-slate-800/60 p-6 shadow-inner",
            {body}
        }
    }
}
