pub mod db;
pub mod providers;
