use leptos::ev::SubmitEvent;
use leptos::*;

use crate::models::restaurant::Restaurant;

/// Copies one named text field into the draft. Unknown names are ignored.
pub fn apply_field(restaurant: &mut Restaurant, field: &str, value: String) {
    match field {
        "name" => restaurant.name = value,
        "description" => restaurant.description = value,
        "address" => restaurant.address = value,
        "telephone" => restaurant.telephone = value,
        _ => {}
    }
}

/// Name, description, address and telephone inputs shared by the create and
/// edit pages. The page owns the draft and decides what submitting means.
#[component]
pub fn RestaurantForm(
    draft: ReadSignal<Restaurant>,
    set_draft: WriteSignal<Restaurant>,
    error_message: ReadSignal<String>,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_submit: Callback<Restaurant>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(draft.get());
    };

    let update = move |field: &'static str| {
        move |event: ev::Event| {
            let value = event_target_value(&event);
            set_draft.update(|restaurant| apply_field(restaurant, field, value));
        }
    };

    view! {
        <form on:submit=handle_submit>
            <Show when=move || !error_message.get().is_empty()>
                <p class="form-error">{move || error_message.get()}</p>
            </Show>
            <p class="form-input">
                <label for="name">"Name"</label>
                <input
                    type="text"
                    name="name"
                    required
                    prop:value=move || draft.with(|r| r.name.clone())
                    on:input=update("name")
                />
            </p>
            <p class="form-input">
                <label for="description">"Description"</label>
                <textarea
                    name="description"
                    prop:value=move || draft.with(|r| r.description.clone())
                    on:input=update("description")
                ></textarea>
                <span class="note">"Enter a brief description of the restaurant."</span>
            </p>
            <p class="form-input">
                <label for="address">"Address"</label>
                <textarea
                    name="address"
                    required
                    prop:value=move || draft.with(|r| r.address.clone())
                    on:input=update("address")
                ></textarea>
            </p>
            <p class="form-input">
                <label for="telephone">"Telephone"</label>
                <input
                    type="tel"
                    name="telephone"
                    prop:value=move || draft.with(|r| r.telephone.clone())
                    on:input=update("telephone")
                />
            </p>
            <p>
                <input type="submit" value=submit_label/>
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_fields_update_the_draft() {
        let mut restaurant = Restaurant::default();
        apply_field(&mut restaurant, "name", "Taco Hut".into());
        apply_field(&mut restaurant, "telephone", "555-0100".into());
        apply_field(&mut restaurant, "picture", "ignored".into());

        assert_eq!(restaurant.name, "Taco Hut");
        assert_eq!(restaurant.telephone, "555-0100");
        assert!(restaurant.description.is_empty());
    }
}
