use crate::{CommentId, PostId};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `score` is the server's aggregate after the vote; callers that keep a
/// cache derive their own value instead
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VoteResponse {
    pub message: String,
    pub score: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreatedComment {
    pub message: String,
    pub comment_id: CommentId,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreatedPost {
    pub message: String,
    pub post_id: PostId,
}
