use crate::{Error, PostId, Time, UserId, Vote};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,

    pub content: String,
    pub summary: String,

    /// Materialized path of ancestor ids, as stored by the server
    #[serde(default)]
    pub path: String,

    pub score: i64,
    #[serde(default)]
    pub my_vote: Vote,

    /// Tombstone: the comment keeps its place in the thread but its content
    /// must not be shown
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<Time>,

    /// Server-side count of replies, which may differ from the children
    /// present in a partial listing
    pub no_of_replies: i64,

    pub created_at: Time,
    pub updated_at: Time,

    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub topic_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,
    #[serde(default)]
    pub has_long_content: bool,
}

impl Comment {
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreateCommentRequest {
    pub post_id: PostId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if self.post_id.0 <= 0 {
            return Err(Error::BadRequest(String::from(
                "Valid post ID is required",
            )));
        }
        crate::validate_comment_content(&self.content)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_comment_content(&self.content)
    }
}
