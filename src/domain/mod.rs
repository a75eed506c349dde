pub mod geo;
pub mod random;
pub mod slug;

pub use geo::{distance, Coordinate};
pub use random::random_string;
pub use slug::slugify;
