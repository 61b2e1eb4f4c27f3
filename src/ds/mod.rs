pub mod fifo_queue;
pub mod hash_index;
pub mod linked_list;
pub mod rating_tree;
pub mod recent_list;
pub mod shard;
pub mod stack;

pub use fifo_queue::FifoQueue;
pub use hash_index::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, FxBuildHasher, HashIndex};
pub use linked_list::LinkedList;
pub use rating_tree::RatingTree;
pub use recent_list::{DEFAULT_RECENT_CAPACITY, RecentList};
pub use shard::ShardSelector;
pub use stack::Stack;
