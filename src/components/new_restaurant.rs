use leptos::*;
use leptos_router::{use_navigate, A};

use crate::client;
use crate::components::restaurant_form::RestaurantForm;
use crate::models::restaurant::Restaurant;

#[component]
pub fn NewRestaurant() -> impl IntoView {
    let (draft, set_draft) = create_signal(Restaurant::default());
    let (error_message, set_error_message) = create_signal(String::new());
    let navigate = use_navigate();

    let create = create_action(|restaurant: &Restaurant| {
        let restaurant = restaurant.clone();
        async move { client::create_restaurant(&restaurant).await }
    });

    create_effect(move |_| {
        if let Some(result) = create.value().get() {
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
                <h2>"Add a Restaurant"</h2>
            </nav>
            <RestaurantForm
                draft=draft
                set_draft=set_draft
                error_message=error_message
                submit_label="Submit"
                on_submit=move |restaurant: Restaurant| create.dispatch(restaurant)
            />
        </main>
    }
}
