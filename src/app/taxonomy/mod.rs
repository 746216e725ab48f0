pub mod class_name;
pub mod rank;
pub mod stream;
pub mod subjects;

pub use class_name::generate_class_name;
pub use rank::{available_ranks, level_from_rank, next_rank, rank_requires_stream, Rank};
pub use stream::available_streams;
