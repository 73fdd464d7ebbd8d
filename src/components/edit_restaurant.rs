use leptos::*;
use leptos_router::{use_navigate, use_params_map, A};

use crate::client;
use crate::components::restaurant_form::RestaurantForm;
use crate::models::restaurant::Restaurant;

#[component]
pub fn EditRestaurant() -> impl IntoView {
    let params = use_params_map();
    let id = move || {
        params.with(|p| {
            p.get("id")
                .and_then(|id| id.parse::<i64>().ok())
                .unwrap_or_default()
        })
    };

    let (draft, set_draft) = create_signal(Restaurant::default());
    let (error_message, set_error_message) = create_signal(String::new());
    let navigate = use_navigate();

    // Prefill the form once the current record arrives.
    let existing = create_local_resource(id, |id| async move { client::load_restaurant(id).await });
    create_effect(move |_| match existing.get() {
        Some(Ok(restaurant)) => set_draft.set(restaurant),
        Some(Err(e)) => set_error_message.set(e.to_string()),
        None => {}
    });

    let update = create_action(|restaurant: &Restaurant| {
        let restaurant = restaurant.clone();
        async move { client::update_restaurant(&restaurant).await }
    });

    create_effect(move |_| {
        if let Some(result) = update.value().get() {
            match result {
                Ok(_) => navigate("/", Default::default()),
                Err(e) => set_error_message.set(e.to_string()),
            }
        }
    });

    view! {
        <main class="page">
            <nav>
                <A href="/">"Home"</A>
                <h2>"Update the Restaurant"</h2>
            </nav>
            <RestaurantForm
                draft=draft
                set_draft=set_draft
                error_message=error_message
                submit_label="Submit changes"
                on_submit=move |restaurant: Restaurant| update.dispatch(restaurant)
            />
        </main>
    }
}
