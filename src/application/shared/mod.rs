pub mod api_key_helpers;
pub mod post_view;
