pub mod distance;
pub mod itinerary;
pub mod poi;
pub mod preference;

pub use distance::{DistanceElement, DistanceRow, DistanceTable, ElementStatus};
pub use itinerary::{ItineraryRequest, ItineraryStop, TimeSlot, TimeWindow};
pub use poi::Poi;
pub use preference::PreferenceTable;
