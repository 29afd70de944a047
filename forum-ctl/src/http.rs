use forum_api::{
    Api, Comment, CommentId, CreateCommentRequest, CreatePostRequest, CreatedComment,
    CreatedPost, Error, FollowTopicRequest, ListCommentsRequest, ListPostsRequest,
    ListTopicsRequest, ListUsersRequest, MessageResponse, PaginatedComments, PaginatedPosts,
    PaginatedTopics, PaginatedUsers, PinCommentRequest, Post, PostId, Topic,
    UpdateCommentRequest, UpdatePostRequest, UpdateProfileRequest, User, VoteRequest,
    VoteResponse,
};
use reqwest::{header, Method, RequestBuilder};

/// `Api` over the forum's REST endpoints, authenticated by the `jwt` cookie
pub struct HttpApi {
    client: reqwest::Client,
    host: String,
    token: Option<String>,
}

#[derive(serde::Serialize)]
struct FollowBody {
    is_follow: bool,
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

impl HttpApi {
    pub fn new(host: String, token: Option<String>) -> HttpApi {
        HttpApi {
            client: reqwest::Client::new(),
            host: String::from(host.trim_end_matches('/')),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}/api/{}", self.host, path));
        match &self.token {
            None => req,
            Some(tok) => req.header(header::COOKIE, format!("jwt={tok}")),
        }
    }

    async fn send<R>(&self, req: RequestBuilder) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %body, "server returned an error");
            // reqwest 0.11 and forum-api both use http 0.2
            return Err(Error::from_response(status, &body));
        }
        resp.json().await.map_err(transport)
    }
}

#[async_trait::async_trait]
impl Api for HttpApi {
    async fn list_comments(&self, q: &ListCommentsRequest) -> Result<PaginatedComments, Error> {
        self.send(self.request(Method::GET, "comments").query(q))
            .await
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment, Error> {
        self.send(self.request(Method::GET, &format!("comments/{}", id.0)))
            .await
    }

    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<CreatedComment, Error> {
        self.send(self.request(Method::POST, "comments").json(req))
            .await
    }

    async fn update_comment(
        &self,
        id: CommentId,
        req: &UpdateCommentRequest,
    ) -> Result<MessageResponse, Error> {
        self.send(
            self.request(Method::PUT, &format!("comments/{}", id.0))
                .json(req),
        )
        .await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<MessageResponse, Error> {
        self.send(self.request(Method::DELETE, &format!("comments/{}", id.0)))
            .await
    }

    async fn vote_comment(&self, id: CommentId, req: VoteRequest) -> Result<VoteResponse, Error> {
        self.send(
            self.request(Method::POST, &format!("comments/{}/vote", id.0))
                .json(&req),
        )
        .await
    }

    async fn list_posts(&self, q: &ListPostsRequest) -> Result<PaginatedPosts, Error> {
        self.send(self.request(Method::GET, "posts").query(q)).await
    }

    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        self.send(self.request(Method::GET, &format!("posts/{}", id.0)))
            .await
    }

    async fn create_post(&self, req: &CreatePostRequest) -> Result<CreatedPost, Error> {
        self.send(self.request(Method::POST, "posts").json(req))
            .await
    }

    async fn update_post(
        &self,
        id: PostId,
        req: &UpdatePostRequest,
    ) -> Result<MessageResponse, Error> {
        self.send(self.request(Method::PUT, &format!("posts/{}", id.0)).json(req))
            .await
    }

    async fn delete_post(&self, id: PostId) -> Result<MessageResponse, Error> {
        self.send(self.request(Method::DELETE, &format!("posts/{}", id.0)))
            .await
    }

    async fn vote_post(&self, id: PostId, req: VoteRequest) -> Result<VoteResponse, Error> {
        self.send(
            self.request(Method::POST, &format!("posts/{}/vote", id.0))
                .json(&req),
        )
        .await
    }

    async fn pin_comment(
        &self,
        post: PostId,
        req: PinCommentRequest,
    ) -> Result<MessageResponse, Error> {
        self.send(
            self.request(Method::POST, &format!("posts/{}/pin-comment", post.0))
                .json(&req),
        )
        .await
    }

    async fn list_topics(&self, q: &ListTopicsRequest) -> Result<PaginatedTopics, Error> {
        self.send(self.request(Method::GET, "topics").query(q)).await
    }

    async fn list_topics_summary(&self) -> Result<Vec<Topic>, Error> {
        self.send(self.request(Method::GET, "topics-summary")).await
    }

    async fn get_topic(&self, slug: &str) -> Result<Topic, Error> {
        self.send(self.request(Method::GET, &format!("topics/{slug}")))
            .await
    }

    async fn follow_topic(&self, req: &FollowTopicRequest) -> Result<MessageResponse, Error> {
        self.send(
            self.request(Method::POST, &format!("topics/{}/follow", req.topic_slug))
                .json(&FollowBody {
                    is_follow: req.is_follow,
                }),
        )
        .await
    }

    async fn list_users(&self, q: &ListUsersRequest) -> Result<PaginatedUsers, Error> {
        self.send(self.request(Method::GET, "users").query(q)).await
    }

    async fn get_user(&self, username: &str) -> Result<User, Error> {
        self.send(self.request(Method::GET, &format!("users/{username}")))
            .await
    }

    async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<MessageResponse, Error> {
        self.send(self.request(Method::PUT, "profile").json(req))
            .await
    }
}
