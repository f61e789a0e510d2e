pub mod diagnosis;
pub mod disease;
pub mod enums;

pub use diagnosis::{Diagnosis, MarkerReading};
pub use disease::{DiseaseRecord, HistoryEntry};
pub use enums::{Marker, SeverityTier};
