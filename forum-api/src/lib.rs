use chrono::Utc;

pub type Time = chrono::DateTime<Utc>;

mod api;
pub use api::Api;

mod comment;
pub use comment::{Comment, CommentId, CreateCommentRequest, UpdateCommentRequest};

mod error;
pub use error::Error;

mod list;
pub use list::{
    CommentSort, ListCommentsRequest, ListPostsRequest, ListTopicsRequest, Page,
    PaginatedComments, PaginatedPosts, PaginatedTopics, PostSort, SortOrder, TopicSort,
};

mod post;
pub use post::{CreatePostRequest, PinCommentRequest, Post, PostId, UpdatePostRequest};

mod response;
pub use response::{CreatedComment, CreatedPost, MessageResponse, VoteResponse};

mod summary;
pub use summary::{summarize_comment_content, summarize_post_content, Summary};

mod topic;
pub use topic::{deslugify_topic_name, slugify_topic_name, FollowTopicRequest, Topic, TopicId};

mod user;
pub use user::{
    validate_email, validate_username, ListUsersRequest, PaginatedUsers, UpdateProfileRequest,
    User, UserId, UserSort, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH,
};

mod vote;
pub use vote::{Vote, VoteClick, VoteRequest};

pub const COMMENTS_PER_PAGE: u32 = 10;
pub const POSTS_PER_PAGE: u32 = 10;
pub const TOPICS_PER_PAGE: u32 = 9;
pub const USERS_PER_PAGE: u32 = 9;

// sync with backend
pub const SUMMARY_LENGTH: usize = 400;

pub const MAX_COMMENT_CONTENT_LENGTH: usize = 10_000;
pub const MAX_POST_TITLE_LENGTH: usize = 500;
pub const MAX_POST_CONTENT_LENGTH: usize = 10_000;

pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

pub fn validate_comment_content(content: &str) -> Result<(), Error> {
    validate_string(content)?;
    let len = content.trim().chars().count();
    if len == 0 {
        return Err(Error::ContentRequired);
    }
    if len > MAX_COMMENT_CONTENT_LENGTH {
        return Err(Error::ContentTooLong {
            len,
            max: MAX_COMMENT_CONTENT_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_post_title(title: &str) -> Result<(), Error> {
    validate_string(title)?;
    let len = title.trim().chars().count();
    if len == 0 {
        return Err(Error::TitleRequired);
    }
    if len > MAX_POST_TITLE_LENGTH {
        return Err(Error::TitleTooLong {
            len,
            max: MAX_POST_TITLE_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_post_content(content: &str) -> Result<(), Error> {
    validate_string(content)?;
    let len = content.trim().chars().count();
    if len > MAX_POST_CONTENT_LENGTH {
        return Err(Error::ContentTooLong {
            len,
            max: MAX_POST_CONTENT_LENGTH,
        });
    }
    Ok(())
}
