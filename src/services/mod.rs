pub mod google_maps;
pub mod itinerary;
pub mod photo;
pub mod providers;
