use leptos::ev::SubmitEvent;
use leptos::*;

use crate::client;
use crate::components::restaurant_summary::RestaurantSummary;

/// Home page: every restaurant, narrowed by the search box.
#[component]
pub fn RestaurantsList() -> impl IntoView {
    let (filter, set_filter) = create_signal(String::new());
    let restaurants = create_local_resource(
        move || filter.get(),
        |filter| async move { client::load_restaurants(&filter).await },
    );

    view! {
        <main class="home">
            <h1>"Taco Tuesday"</h1>
            <form class="search" on:submit=|ev: SubmitEvent| ev.prevent_default()>
                <input
                    type="text"
                    placeholder="Search..."
                    prop:value=filter
                    on:input=move |ev| set_filter.set(event_target_value(&ev))
                />
            </form>

            <Transition fallback=move || view! { <p>"Loading..."</p> }>
                <ul class="results">
                    {move || {
                        restaurants
                            .get()
                            .map(|result| match result {
                                Ok(restaurants) => restaurants
                                    .into_iter()
                                    .map(|restaurant| view! { <RestaurantSummary restaurant=restaurant/> })
                                    .collect_view(),
                                Err(e) => view! { <li class="form-error">{e.to_string()}</li> }.into_view(),
                            })
                    }}
                </ul>
            </Transition>
        </main>
    }
}
