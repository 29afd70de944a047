mod actions;
pub use actions::{Actions, Notice, Target};

mod cache;
pub use cache::{apply_mutation, CacheEntry, EntityCache, QueryCache, QueryKey, SharedCache};

mod entity;
pub use entity::Entity;

pub mod mutation;

mod tree;
pub use tree::{replies_label, CollapseState, CommentNode, CommentTree, Walk};

pub mod api {
    pub use forum_api::*;
}
