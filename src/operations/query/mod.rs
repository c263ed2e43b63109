mod nearby_point;

pub use nearby_point::{Candidate, FindNearbyPoint, NearbyPoint};
