pub mod edit_restaurant;
pub mod new_restaurant;
pub mod restaurant_detail;
pub mod restaurant_form;
pub mod restaurant_summary;
pub mod restaurants_list;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
