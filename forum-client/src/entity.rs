use std::{fmt::Debug, hash::Hash};

use crate::{
    api::{
        slugify_topic_name, Comment, CommentId, ListCommentsRequest, ListPostsRequest,
        ListTopicsRequest, ListUsersRequest, Post, PostId, Topic, User,
    },
    EntityCache, QueryCache,
};

/// A record that can live in the client cache under a stable identity
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Key: Clone + Debug + Eq + Hash + Send + Sync;

    /// Parameters of the listing endpoint, keying cached pages
    type Query: Clone + Debug + Eq + Hash + Send + Sync;

    /// Family name of the single-item and flat-list entries
    const NAME: &'static str;

    /// Family name of the paginated entries
    const PLURAL: &'static str;

    fn key(&self) -> Self::Key;

    fn cache(cache: &QueryCache) -> &EntityCache<Self>;
    fn cache_mut(cache: &mut QueryCache) -> &mut EntityCache<Self>;
}

impl Entity for Comment {
    type Key = CommentId;
    type Query = ListCommentsRequest;

    const NAME: &'static str = "comment";
    const PLURAL: &'static str = "comments";

    fn key(&self) -> CommentId {
        self.id
    }

    fn cache(cache: &QueryCache) -> &EntityCache<Comment> {
        &cache.comments
    }

    fn cache_mut(cache: &mut QueryCache) -> &mut EntityCache<Comment> {
        &mut cache.comments
    }
}

impl Entity for Post {
    type Key = PostId;
    type Query = ListPostsRequest;

    const NAME: &'static str = "post";
    const PLURAL: &'static str = "posts";

    fn key(&self) -> PostId {
        self.id
    }

    fn cache(cache: &QueryCache) -> &EntityCache<Post> {
        &cache.posts
    }

    fn cache_mut(cache: &mut QueryCache) -> &mut EntityCache<Post> {
        &mut cache.posts
    }
}

// Topics are addressed by slug everywhere in the API
impl Entity for Topic {
    type Key = String;
    type Query = ListTopicsRequest;

    const NAME: &'static str = "topic";
    const PLURAL: &'static str = "topics";

    fn key(&self) -> String {
        slugify_topic_name(&self.name)
    }

    fn cache(cache: &QueryCache) -> &EntityCache<Topic> {
        &cache.topics
    }

    fn cache_mut(cache: &mut QueryCache) -> &mut EntityCache<Topic> {
        &mut cache.topics
    }
}

// Profile pages are addressed by username
impl Entity for User {
    type Key = String;
    type Query = ListUsersRequest;

    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn key(&self) -> String {
        self.username.clone()
    }

    fn cache(cache: &QueryCache) -> &EntityCache<User> {
        &cache.users
    }

    fn cache_mut(cache: &mut QueryCache) -> &mut EntityCache<User> {
        &mut cache.users
    }
}
