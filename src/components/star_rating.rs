use leptos::*;

pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(rating) => format!("Star rating of this location is {rating:.1} out of 5."),
        None => "No ratings yet.".to_string(),
    }
}

pub fn stars_label(stars: i32) -> String {
    if stars == 1 {
        "1 star".to_string()
    } else {
        format!("{stars} stars")
    }
}

/// Stars drawn by the stylesheet from the `--rating` custom property.
#[component]
pub fn StarRating(rating: Option<f64>) -> impl IntoView {
    let style = format!("--rating: {:.1};", rating.unwrap_or(0.0));

    view! {
        <span class="stars" style=style aria-label=rating_label(rating)></span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(
            rating_label(Some(4.66)),
            "Star rating of this location is 4.7 out of 5."
        );
        assert_eq!(rating_label(None), "No ratings yet.");
        assert_eq!(stars_label(1), "1 star");
        assert_eq!(stars_label(4), "4 stars");
    }
}
