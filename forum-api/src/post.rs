use crate::{CommentId, Error, Time, TopicId, UserId, Vote};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct PostId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub topic_id: TopicId,

    pub title: String,
    pub summary: String,
    pub content: String,

    pub created_at: Time,
    pub updated_at: Time,
    pub user_id: UserId,

    pub pinned_comment_id: Option<CommentId>,

    pub score: i64,
    #[serde(default)]
    pub my_vote: Vote,
    pub no_of_comments: i64,

    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<Time>,

    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreatePostRequest {
    pub topic_id: TopicId,
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_post_title(&self.title)?;
        crate::validate_post_content(&self.content)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(title) = &self.title {
            crate::validate_post_title(title)?;
        }
        if let Some(content) = &self.content {
            crate::validate_post_content(content)?;
        }
        Ok(())
    }
}

/// `comment_id: None` unpins
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PinCommentRequest {
    pub comment_id: Option<CommentId>,
}
