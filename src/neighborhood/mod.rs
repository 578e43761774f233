mod rectangle;
pub use rectangle::{Anchor, Neighborhood, RectangleNeighborhood, RectangleNeighborhoodFactory};

mod local_cursor;
pub use local_cursor::LocalCursor;

mod sampler;
pub use sampler::RectangleNeighborhoodSampler;

mod cursor;
pub use cursor::RectangleNeighborhoodCursor;

mod random_access;
pub use random_access::RectangleNeighborhoodRandomAccess;

mod shape;
pub use shape::RectangleShape;
