use leptos::ev::SubmitEvent;
use leptos::*;

use crate::client;
use crate::components::star_rating::stars_label;
use crate::models::review::{Review, MAX_STARS, MIN_STARS};

#[component]
pub fn ReviewForm(restaurant_id: i64, #[prop(into)] on_created: Callback<Review>) -> impl IntoView {
    let (draft, set_draft) = create_signal(Review::draft(restaurant_id));
    let (error_message, set_error_message) = create_signal(String::new());

    let submit = create_action(|review: &Review| {
        let review = review.clone();
        async move { client::create_review(&review).await }
    });

    create_effect(move |_| {
        if let Some(result) = submit.value().get() {
            match result {
                Ok(review) => {
                    set_draft.set(Review::draft(restaurant_id));
                    set_error_message.set(String::new());
                    on_created.call(review);
                }
                Err(e) => set_error_message.set(e.to_string()),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submit.dispatch(draft.get());
    };

    let star_inputs = (MIN_STARS..=MAX_STARS)
        .map(|stars| {
            let id = format!("star-rating-{stars}");
            view! {
                <input
                    id=id.clone()
                    type="radio"
                    name="stars"
                    value=stars.to_string()
                    prop:checked=move || draft.with(|review| review.stars == stars)
                    on:change=move |_| set_draft.update(|review| review.stars = stars)
                />
                <label for=id>{stars_label(stars)}</label>
            }
        })
        .collect_view();

    view! {
        <h3>"Enter your own review"</h3>
        <form on:submit=handle_submit>
            <Show when=move || !error_message.get().is_empty()>
                <p class="form-error">{move || error_message.get()}</p>
            </Show>
            <p class="form-input">
                <label for="summary">"Summary"</label>
                <input
                    type="text"
                    name="summary"
                    prop:value=move || draft.with(|review| review.summary.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_draft.update(|review| review.summary = value);
                    }
                />
                <span class="note">
                    "Enter a brief summary of your review. Example: "
                    <strong>"Great food, good prices."</strong>
                </span>
            </p>
            <p class="form-input">
                <label for="body">"Review"</label>
                <textarea
                    name="body"
                    prop:value=move || draft.with(|review| review.body.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_draft.update(|review| review.body = value);
                    }
                ></textarea>
            </p>
            <div class="rating">{star_inputs}</div>
            <p>
                <input type="submit" value="Submit"/>
            </p>
        </form>
    }
}
