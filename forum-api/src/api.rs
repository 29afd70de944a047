use async_trait::async_trait;

use crate::{
    Comment, CommentId, CreateCommentRequest, CreatePostRequest, CreatedComment, CreatedPost,
    Error, FollowTopicRequest, ListCommentsRequest, ListPostsRequest, ListTopicsRequest,
    ListUsersRequest, MessageResponse, PaginatedComments, PaginatedPosts, PaginatedTopics,
    PaginatedUsers, PinCommentRequest, Post, PostId, Topic, UpdateCommentRequest,
    UpdatePostRequest, UpdateProfileRequest, User, VoteRequest, VoteResponse,
};

/// The REST endpoints the client relies on
#[async_trait]
pub trait Api: Send + Sync {
    async fn list_comments(&self, q: &ListCommentsRequest) -> Result<PaginatedComments, Error>;
    async fn get_comment(&self, id: CommentId) -> Result<Comment, Error>;
    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<CreatedComment, Error>;
    async fn update_comment(
        &self,
        id: CommentId,
        req: &UpdateCommentRequest,
    ) -> Result<MessageResponse, Error>;
    async fn delete_comment(&self, id: CommentId) -> Result<MessageResponse, Error>;
    async fn vote_comment(&self, id: CommentId, req: VoteRequest) -> Result<VoteResponse, Error>;

    async fn list_posts(&self, q: &ListPostsRequest) -> Result<PaginatedPosts, Error>;
    async fn get_post(&self, id: PostId) -> Result<Post, Error>;
    async fn create_post(&self, req: &CreatePostRequest) -> Result<CreatedPost, Error>;
    async fn update_post(&self, id: PostId, req: &UpdatePostRequest)
        -> Result<MessageResponse, Error>;
    async fn delete_post(&self, id: PostId) -> Result<MessageResponse, Error>;
    async fn vote_post(&self, id: PostId, req: VoteRequest) -> Result<VoteResponse, Error>;
    async fn pin_comment(
        &self,
        post: PostId,
        req: PinCommentRequest,
    ) -> Result<MessageResponse, Error>;

    async fn list_topics(&self, q: &ListTopicsRequest) -> Result<PaginatedTopics, Error>;
    /// Every topic, unpaginated, for pickers
    async fn list_topics_summary(&self) -> Result<Vec<Topic>, Error>;
    async fn get_topic(&self, slug: &str) -> Result<Topic, Error>;
    async fn follow_topic(&self, req: &FollowTopicRequest) -> Result<MessageResponse, Error>;

    async fn list_users(&self, q: &ListUsersRequest) -> Result<PaginatedUsers, Error>;
    async fn get_user(&self, username: &str) -> Result<User, Error>;
    async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<MessageResponse, Error>;
}
