use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::study::StudyProvider;
use ui::views::{Experiment, Palette};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Experiment {},
    #[route("/palette")]
    Palette {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_experiment(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Experiment {},
        "{label}"
    })
}

fn nav_palette(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Palette {},
        "{label}"
    })
}

fn main() {
    ui::core::platform::init_logging();
    log::info!("Chromalab starting");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        experiment: nav_experiment,
        palette: nav_palette,
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        // The session outlives route changes so the palette tool can be
        // opened mid-study without losing progress.
        StudyProvider {
            Router::<Route> {}
        }
    }
}

#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        main { class: "app-main",
            Outlet::<Route> {}
        }
    }
}
