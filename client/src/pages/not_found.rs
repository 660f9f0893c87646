//! Fallback view for paths outside the route table.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::routes::AppRoute;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Place · Not found"/>
        <div class="login-page">
            <div class="login-card">
                <h1>"404"</h1>
                <p class="login-card__subtitle">"Page not found."</p>
                <a href=AppRoute::Connection.path() class="login-link">"Back to Place"</a>
            </div>
        </div>
    }
}
