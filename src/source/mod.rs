mod array;
pub use array::{ArrayAccess, ArraySource};

mod border;
pub use border::{map_index, BorderMode};
