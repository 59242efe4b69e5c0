#![allow(non_snake_case)]

mod api;
mod config;
mod hooks;
mod services;
mod state;
mod ui;

use anyhow::Context;
use config::{AppConfig, AppProfile};
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use hooks::fact::use_fact_controller;
use once_cell::sync::OnceCell;
use services::fact::GeminiFactProvider;
use tracing::{error, info};
use ui::fact_card::FactCard;
use ui::icons::AtomIcon;
use ui::reveal_button::RevealButton;

pub(crate) static FACT_PROVIDER: OnceCell<GeminiFactProvider> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    init_logging(config.profile);

    if let Err(err) = bootstrap_infrastructure(config) {
        error!(?err, "startup aborted: {err:#}");
        return;
    }

    launch(App);
}

fn init_logging(profile: AppProfile) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(profile.log_level());
    });
}

fn bootstrap_infrastructure(config: AppConfig) -> anyhow::Result<()> {
    let provider = GeminiFactProvider::new(config).context("cannot create the fact provider")?;
    info!(model = %provider.model(), "fact provider initialized");

    if FACT_PROVIDER.set(provider).is_err() {
        anyhow::bail!("fact provider was already initialized");
    }
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

#[component]
fn Home() -> Element {
    let controller = use_fact_controller();
    let snapshot = controller.state().read().clone();

    rsx! {
        main { class: "flex min-h-screen flex-col items-center justify-center bg-slate-900 px-4 py-10 text-slate-100",
            div { class: "w-full max-w-2xl space-y-6",
                header { class: "flex flex-col items-center gap-2 text-center",
                    AtomIcon { class: "h-12 w-12 text-indigo-400".to_string() }
                    h1 { class: "text-3xl font-bold tracking-tight", "Physics Fact Generator" }
                    p { class: "text-sm text-slate-400",
                        "Discover a fascinating fact about the universe, written fresh by AI."
                    }
                }
                FactCard { view: snapshot.view() }
                div { class: "flex justify-center",
                    RevealButton {
                        busy: snapshot.is_loading,
                        label: snapshot.button_label(),
                        on_reveal: move |_| controller.refresh(),
                    }
                }
                footer { class: "text-center text-[11px] text-slate-500", "Facts are generated by a language model and may contain mistakes." }
            }
        }
    }
}
