//! Root of the Taco Tuesday frontend: page routing plus the shared header and footer.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::{
    edit_restaurant::EditRestaurant, new_restaurant::NewRestaurant,
    restaurant_detail::RestaurantDetail, restaurants_list::RestaurantsList,
};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/taco-tuesday.css"/>
        <Title text="Taco Tuesday"/>
        <Router>
            <header>
                <nav>
                    <A href="/restaurants/new">"+ Restaurant"</A>
                </nav>
            </header>
            <Routes>
                <Route path="/" view=RestaurantsList/>
                <Route path="/restaurants/new" view=NewRestaurant/>
                <Route path="/restaurants/:id" view=RestaurantDetail/>
                <Route path="/restaurants/:id/edit" view=EditRestaurant/>
            </Routes>
            <footer>
                <p>"Built in St Petersburg, Florida."</p>
            </footer>
        </Router>
    }
}
