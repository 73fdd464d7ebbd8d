use leptos::*;
use leptos_router::{use_navigate, use_params_map, A};

use crate::client;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::components::star_rating::StarRating;
use crate::models::review::Review;

/// One restaurant with its reviews, the new-review form and the owner actions.
#[component]
pub fn RestaurantDetail() -> impl IntoView {
    let params = use_params_map();
    let id = move || {
        params.with(|p| {
            p.get("id")
                .and_then(|id| id.parse::<i64>().ok())
                .unwrap_or_default()
        })
    };

    let restaurant = create_local_resource(id, |id| async move { client::load_restaurant(id).await });
    let (error_message, set_error_message) = create_signal(String::new());
    let navigate = use_navigate();

    let delete_restaurant = create_action(|id: &i64| {
        let id = *id;
        async move { client::delete_restaurant(id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_restaurant.value().get() {
            match result {
                Ok(()) => navigate("/", Default::default()),
                Err(e) => set_error_message.set(e.to_string()),
            }
        }
    });

    let delete_review = create_action(|id: &i64| {
        let id = *id;
        async move { client::delete_review(id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_review.value().get() {
            match result {
                Ok(()) => restaurant.refetch(),
                Err(e) => set_error_message.set(e.to_string()),
            }
        }
    });

    view! {
        <main class="page">
            <Show when=move || !error_message.get().is_empty()>
                <p class="form-error">{move || error_message.get()}</p>
            </Show>
            <Transition fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    restaurant
                        .get()
                        .map(|result| match result {
                            Ok(restaurant_data) => {
                                let restaurant_id = restaurant_data.id;
                                let edit_href = format!("/restaurants/{restaurant_id}/edit");
                                let rating = restaurant_data.average_stars();
                                let review_count = restaurant_data.reviews.len();
                                view! {
                                    <nav>
                                        <A href="/">"Home"</A>
                                        <h2>{restaurant_data.name.clone()}</h2>
                                    </nav>
                                    <p>
                                        <StarRating rating=rating/>
                                        {format!("({review_count})")}
                                    </p>
                                    <address>{restaurant_data.address.clone()}</address>
                                    <p>{restaurant_data.description.clone()}</p>
                                    <p>{restaurant_data.telephone.clone()}</p>
                                    <p>
                                        <A href=edit_href>"Edit"</A>
                                        <button on:click=move |_| delete_restaurant.dispatch(restaurant_id)>
                                            "Delete"
                                        </button>
                                    </p>
                                    <hr/>
                                    <h3>"Reviews for " {restaurant_data.name.clone()}</h3>
                                    <ReviewsList
                                        reviews=restaurant_data.reviews
                                        on_delete=move |review_id: i64| delete_review.dispatch(review_id)
                                    />
                                    <ReviewForm
                                        restaurant_id=restaurant_id
                                        on_created=move |_: Review| restaurant.refetch()
                                    />
                                }
                                .into_view()
                            }
                            Err(e) => view! { <p class="form-error">{e.to_string()}</p> }.into_view(),
                        })
                }}
            </Transition>
        </main>
    }
}
