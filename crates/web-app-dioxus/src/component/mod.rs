pub mod element;
pub mod exercise_image;
pub mod form;
pub mod navbar;
pub mod plan_cards;
pub mod profile_form;
