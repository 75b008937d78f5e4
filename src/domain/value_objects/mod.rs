pub mod ids;
pub mod slug;
pub mod timestamps;
