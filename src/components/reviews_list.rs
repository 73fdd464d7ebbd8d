use leptos::*;

use crate::components::star_rating::StarRating;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>, #[prop(into)] on_delete: Callback<i64>) -> impl IntoView {
    view! {
        <ul class="reviews">
            {reviews
                .into_iter()
                .map(|review| {
                    let id = review.id;
                    let author = review.author_name().to_string();
                    let created_at = review.created_at_display();
                    view! {
                        <li>
                            <div class="author">
                                {author} " said: " <em>{review.summary}</em>
                            </div>
                            <div class="body">
                                <p>{review.body}</p>
                            </div>
                            <div class="meta">
                                <StarRating rating=Some(f64::from(review.stars))/>
                                <time>{created_at}</time>
                                <button class="small" on:click=move |_| on_delete.call(id)>
                                    "Delete"
                                </button>
                            </div>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
