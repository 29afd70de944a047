use crate::{Comment, CommentId, Post, PostId, Topic, UserId};

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CommentSort {
    Score,
    #[default]
    CreatedAt,
}

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    Score,
    #[default]
    CreatedAt,
    NoOfComments,
}

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TopicSort {
    #[default]
    Name,
    NoOfFollowers,
    NoOfPosts,
}

/// Query parameters of `GET /comments`; each distinct value keys its own
/// cached page
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListCommentsRequest {
    pub page: u32,
    /// 0 fetches every matching comment
    pub page_size: u32,
    pub sort: CommentSort,
    pub order_by: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    #[serde(default)]
    pub only_top_level: bool,
    #[serde(default)]
    pub show_deleted_comments: bool,
    #[serde(default)]
    pub show_post_title: bool,
}

impl Default for ListCommentsRequest {
    fn default() -> ListCommentsRequest {
        ListCommentsRequest {
            page: 1,
            page_size: crate::COMMENTS_PER_PAGE,
            sort: CommentSort::default(),
            order_by: SortOrder::default(),
            search: None,
            post_id: None,
            user_id: None,
            parent_id: None,
            only_top_level: false,
            show_deleted_comments: false,
            show_post_title: false,
        }
    }
}

impl ListCommentsRequest {
    /// Every comment of a post, deleted ones included so replies to them
    /// keep their parent
    pub fn thread(post_id: PostId, sort: CommentSort) -> ListCommentsRequest {
        ListCommentsRequest {
            page_size: 0,
            sort,
            post_id: Some(post_id),
            show_deleted_comments: true,
            ..ListCommentsRequest::default()
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListPostsRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort: PostSort,
    pub order_by: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub filter_following: bool,
}

impl Default for ListPostsRequest {
    fn default() -> ListPostsRequest {
        ListPostsRequest {
            page: 1,
            page_size: crate::POSTS_PER_PAGE,
            sort: PostSort::default(),
            order_by: SortOrder::default(),
            search: None,
            topic_name: None,
            user_id: None,
            filter_following: false,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListTopicsRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort: TopicSort,
    pub order_by: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub filter_following: bool,
}

impl Default for ListTopicsRequest {
    fn default() -> ListTopicsRequest {
        ListTopicsRequest {
            page: 1,
            page_size: crate::TOPICS_PER_PAGE,
            sort: TopicSort::default(),
            order_by: SortOrder::Asc,
            search: None,
            filter_following: false,
        }
    }
}

/// One page of a listing, whatever the entity
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<E> {
    pub items: Vec<E>,
    /// Total number of matching entities, across all pages
    pub count: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PaginatedComments {
    pub comments: Vec<Comment>,
    pub count: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PaginatedPosts {
    pub posts: Vec<Post>,
    pub count: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PaginatedTopics {
    pub topics: Vec<Topic>,
    pub count: i64,
}

impl From<PaginatedComments> for Page<Comment> {
    fn from(p: PaginatedComments) -> Page<Comment> {
        Page {
            items: p.comments,
            count: p.count,
        }
    }
}

impl From<PaginatedPosts> for Page<Post> {
    fn from(p: PaginatedPosts) -> Page<Post> {
        Page {
            items: p.posts,
            count: p.count,
        }
    }
}

impl From<PaginatedTopics> for Page<Topic> {
    fn from(p: PaginatedTopics) -> Page<Topic> {
        Page {
            items: p.topics,
            count: p.count,
        }
    }
}
