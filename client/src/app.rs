//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    canvas::CanvasPage, connection::ConnectionPage, not_found::NotFoundPage, register::RegisterPage,
};
use crate::routes::AppRoute;
use crate::state::{auth::AuthState, place::PlaceState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Mounts the router over the static route table. Exactly one view is
/// rendered at a time; unmatched locations render the not-found page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Auth stays `loading` until the browser cookie has been read.
    let auth = RwSignal::new(AuthState { loading: true, ..AuthState::default() });
    let place = RwSignal::new(PlaceState::default());

    provide_context(auth);
    provide_context(place);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let token = crate::util::cookie::read_token();
        auth.set(AuthState::restored(token));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/place.css"/>
        <Title text="Place"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment(AppRoute::Connection.segment()) view=ConnectionPage/>
                <Route path=StaticSegment(AppRoute::Canvas.segment()) view=CanvasPage/>
                <Route path=StaticSegment(AppRoute::Register.segment()) view=RegisterPage/>
            </Routes>
        </Router>
    }
}
