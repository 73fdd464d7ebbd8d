use leptos::*;
use leptos_router::A;

use crate::components::star_rating::StarRating;
use crate::models::restaurant::Restaurant;

/// One entry of the restaurant list.
#[component]
pub fn RestaurantSummary(restaurant: Restaurant) -> impl IntoView {
    let href = format!("/restaurants/{}", restaurant.id);
    let rating = restaurant.average_stars();
    let review_count = restaurant.reviews.len();

    view! {
        <li>
            <h2>
                <A href=href>{restaurant.name}</A>
            </h2>
            <p>
                <StarRating rating=rating/>
                {format!("({review_count})")}
            </p>
            <address>{restaurant.address}</address>
        </li>
    }
}
