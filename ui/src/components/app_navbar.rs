use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Link constructors supplied by the platform crate, so `ui` never needs to
/// know its `Route` enum. Each closure receives the label and returns a
/// `Link` containing it.
///
/// ```ignore
/// register_nav(NavBuilder {
///     experiment: |label| rsx!( Link { class: "navbar__link", to: Route::Experiment {}, "{label}" } ),
///     palette: |label| rsx!( Link { class: "navbar__link", to: Route::Palette {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub experiment: fn(label: &str) -> Element,
    pub palette: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let links = NAV_BUILDER
        .get()
        .map(|b| ((b.experiment)("Experiment"), (b.palette)("Palette tool")));

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Chromalab" }
                    }
                    span { class: "navbar__brand-subtitle", "Color recommendation study" }
                }

                if let Some((experiment, palette)) = links {
                    nav { class: "navbar__links",
                        {experiment}
                        {palette}
                    }
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
