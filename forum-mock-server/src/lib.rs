use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    sync::Arc,
};

use forum_api::{
    summarize_comment_content, summarize_post_content, Api, Comment, CommentId, CommentSort,
    CreateCommentRequest, CreatePostRequest, CreatedComment, CreatedPost, Error,
    FollowTopicRequest, ListCommentsRequest, ListPostsRequest, ListTopicsRequest,
    ListUsersRequest, MessageResponse, PaginatedComments, PaginatedPosts, PaginatedTopics,
    PaginatedUsers, PinCommentRequest, Post, PostId, PostSort, SortOrder, Time, Topic, TopicId,
    TopicSort, UpdateCommentRequest, UpdatePostRequest, UpdateProfileRequest, User, UserId,
    UserSort, Vote, VoteRequest, VoteResponse,
};
use tokio::sync::Mutex;

/// In-memory forum backend, for tests.
///
/// Cloning yields another handle to the same server.
#[derive(Clone)]
pub struct MockServer(Arc<Mutex<Db>>);

struct Db {
    // None means logged out
    session: Option<UserId>,
    users: BTreeMap<UserId, User>,
    clock: i64,
    next_id: i64,
    topics: BTreeMap<TopicId, Topic>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,

    // Per-user state; the stored entities always hold the logged-out view
    comment_votes: BTreeMap<(UserId, CommentId), Vote>,
    post_votes: BTreeMap<(UserId, PostId), Vote>,
    follows: BTreeSet<(UserId, TopicId)>,

    failures: VecDeque<Error>,
    calls: HashMap<&'static str, usize>,
}

const EPOCH: i64 = 1_700_000_000;

impl Db {
    fn tick(&mut self) -> Time {
        self.clock += 1;
        Time::from_timestamp(EPOCH + self.clock, 0).unwrap_or_default()
    }

    fn fresh_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Called on every request: counts it, and fails it if a failure was
    /// injected
    fn enter(&mut self, endpoint: &'static str) -> Result<(), Error> {
        *self.calls.entry(endpoint).or_insert(0) += 1;
        match self.failures.pop_front() {
            None => Ok(()),
            Some(e) => {
                tracing::debug!(endpoint, error = ?e, "injecting failure");
                Err(e)
            }
        }
    }

    fn user(&self) -> Result<(UserId, String), Error> {
        self.session
            .and_then(|id| self.users.get(&id))
            .map(|u| (u.id, u.username.clone()))
            .ok_or(Error::Unauthenticated)
    }

    fn register(&mut self, id: UserId, name: &str) {
        if !self.users.contains_key(&id) {
            let created_at = self.tick();
            self.users.insert(
                id,
                User {
                    id,
                    username: String::from(name),
                    email: format!("{}@example.org", name.to_lowercase()),
                    karma: 0,
                    created_at,
                },
            );
        }
    }

    fn add_karma(&mut self, user: UserId, delta: i64) {
        if let Some(u) = self.users.get_mut(&user) {
            u.karma += delta;
        }
    }

    fn topic_by_name(&self, name: &str) -> Option<&Topic> {
        self.topics.values().find(|t| t.name == name)
    }

    fn topic_by_slug(&self, slug: &str) -> Option<&Topic> {
        self.topics.values().find(|t| t.slug() == slug)
    }

    fn comment_view(&self, c: &Comment) -> Comment {
        let mut c = c.clone();
        c.my_vote = self
            .session
            .and_then(|u| self.comment_votes.get(&(u, c.id)).copied())
            .unwrap_or_default();
        c
    }

    fn post_view(&self, p: &Post) -> Post {
        let mut p = p.clone();
        p.my_vote = self
            .session
            .and_then(|u| self.post_votes.get(&(u, p.id)).copied())
            .unwrap_or_default();
        p
    }

    fn is_following(&self, topic: TopicId) -> bool {
        self.session
            .map_or(false, |u| self.follows.contains(&(u, topic)))
    }

    fn topic_view(&self, t: &Topic) -> Topic {
        Topic {
            is_following: self.is_following(t.id),
            ..t.clone()
        }
    }

    fn live_post(&self, id: PostId) -> Result<&Post, Error> {
        self.posts
            .get(&id)
            .filter(|p| !p.is_deleted)
            .ok_or(Error::NotFound)
    }

    fn owned_comment_mut(&mut self, id: CommentId) -> Result<&mut Comment, Error> {
        let (user, _) = self.user()?;
        let c = self
            .comments
            .get_mut(&id)
            .filter(|c| !c.is_deleted)
            .ok_or(Error::NotFound)?;
        match c.user_id == user {
            true => Ok(c),
            false => Err(Error::PermissionDenied),
        }
    }

    fn owned_post_mut(&mut self, id: PostId) -> Result<&mut Post, Error> {
        let (user, _) = self.user()?;
        let p = self
            .posts
            .get_mut(&id)
            .filter(|p| !p.is_deleted)
            .ok_or(Error::NotFound)?;
        match p.user_id == user {
            true => Ok(p),
            false => Err(Error::PermissionDenied),
        }
    }

    fn insert_topic(&mut self, name: &str, description: &str) -> Topic {
        let t = Topic {
            id: TopicId(self.fresh_id()),
            name: String::from(name),
            description: String::from(description),
            no_of_posts: 0,
            no_of_followers: 0,
            is_following: false,
        };
        self.topics.insert(t.id, t.clone());
        t
    }

    fn insert_post(
        &mut self,
        author: (UserId, String),
        req: &CreatePostRequest,
    ) -> Result<Post, Error> {
        req.validate()?;
        let topic = self.topics.get(&req.topic_id).ok_or(Error::NotFound)?;
        let (topic_id, topic_name) = (topic.id, topic.name.clone());
        let now = self.tick();
        let p = Post {
            id: PostId(self.fresh_id()),
            topic_id,
            title: String::from(req.title.trim()),
            summary: summarize_post_content(&req.content),
            content: req.content.clone(),
            created_at: now,
            updated_at: now,
            user_id: author.0,
            pinned_comment_id: None,
            score: 0,
            my_vote: Vote::Neutral,
            no_of_comments: 0,
            is_deleted: false,
            deleted_at: None,
            topic_name,
            username: author.1,
        };
        if let Some(t) = self.topics.get_mut(&topic_id) {
            t.no_of_posts += 1;
        }
        self.posts.insert(p.id, p.clone());
        Ok(p)
    }

    fn insert_comment(
        &mut self,
        author: (UserId, String),
        req: &CreateCommentRequest,
    ) -> Result<Comment, Error> {
        req.validate()?;
        let post = self.live_post(req.post_id)?;
        let (post_id, topic_name) = (post.id, post.topic_name.clone());
        let parent_path = match req.parent_id {
            None => None,
            Some(parent) => match self.comments.get(&parent) {
                Some(p) if p.post_id == post_id => Some(p.path.clone()),
                _ => {
                    return Err(Error::BadRequest(String::from(
                        "Parent comment does not belong to this post",
                    )))
                }
            },
        };
        let id = CommentId(self.fresh_id());
        let now = self.tick();
        let summary = summarize_comment_content(&req.content);
        let c = Comment {
            id,
            post_id,
            parent_id: req.parent_id,
            content: req.content.clone(),
            summary: summary.summary,
            path: match parent_path {
                None => id.0.to_string(),
                Some(p) => format!("{p}.{}", id.0),
            },
            score: 0,
            my_vote: Vote::Neutral,
            is_deleted: false,
            deleted_at: None,
            no_of_replies: 0,
            created_at: now,
            updated_at: now,
            user_id: author.0,
            username: author.1,
            topic_name,
            post_title: None,
            has_long_content: summary.is_truncated,
        };
        if let Some(parent) = req.parent_id.and_then(|p| self.comments.get_mut(&p)) {
            parent.no_of_replies += 1;
        }
        if let Some(post) = self.posts.get_mut(&post_id) {
            post.no_of_comments += 1;
        }
        self.comments.insert(id, c.clone());
        Ok(c)
    }
}

/// Sets `user`'s vote on `key`, returning how much the score moves
fn record_vote<K: Ord>(
    votes: &mut BTreeMap<(UserId, K), Vote>,
    user: UserId,
    key: K,
    vote: Vote,
) -> i64 {
    let old = match vote {
        Vote::Neutral => votes.remove(&(user, key)),
        v => votes.insert((user, key), v),
    };
    vote.value() - old.unwrap_or_default().value()
}

fn ordered(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> (Vec<T>, i64) {
    let count = items.len() as i64;
    if page_size == 0 {
        return (items, count);
    }
    let skip = (page.max(1) as usize - 1) * page_size as usize;
    let items = items
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect();
    (items, count)
}

fn matches_search(haystack: &str, search: &Option<String>) -> bool {
    match search {
        None => true,
        Some(s) => haystack.to_lowercase().contains(&s.to_lowercase()),
    }
}

impl MockServer {
    /// A server with a single user, `alice`, logged in
    pub fn new() -> MockServer {
        let mut db = Db {
            session: Some(UserId(1)),
            users: BTreeMap::new(),
            clock: 0,
            next_id: 0,
            topics: BTreeMap::new(),
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            comment_votes: BTreeMap::new(),
            post_votes: BTreeMap::new(),
            follows: BTreeSet::new(),
            failures: VecDeque::new(),
            calls: HashMap::new(),
        };
        db.register(UserId(1), "alice");
        MockServer(Arc::new(Mutex::new(db)))
    }

    /// Registers `user` if it is not known yet
    pub async fn log_in_as(&self, user: UserId, name: &str) {
        let mut db = self.0.lock().await;
        db.register(user, name);
        db.session = Some(user);
    }

    pub async fn log_out(&self) {
        self.0.lock().await.session = None;
    }

    /// Make the next request fail with `e`, whatever it is
    pub async fn fail_next(&self, e: Error) {
        self.0.lock().await.failures.push_back(e);
    }

    /// Number of requests received on `endpoint`, failed ones included
    pub async fn calls(&self, endpoint: &str) -> usize {
        self.0
            .lock()
            .await
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub async fn add_topic(&self, name: &str, description: &str) -> Topic {
        self.0.lock().await.insert_topic(name, description)
    }

    pub async fn add_post(
        &self,
        topic_name: &str,
        title: &str,
        content: &str,
    ) -> Result<Post, Error> {
        let mut db = self.0.lock().await;
        let author = db.user()?;
        let topic_id = db.topic_by_name(topic_name).ok_or(Error::NotFound)?.id;
        db.insert_post(
            author,
            &CreatePostRequest {
                topic_id,
                title: String::from(title),
                content: String::from(content),
            },
        )
    }

    /// Seed a comment written by `author`, who need not be logged in
    pub async fn add_comment(
        &self,
        author: (UserId, &str),
        post_id: PostId,
        parent_id: Option<CommentId>,
        content: &str,
    ) -> Result<Comment, Error> {
        let mut db = self.0.lock().await;
        db.register(author.0, author.1);
        let author = db
            .users
            .get(&author.0)
            .map(|u| (u.id, u.username.clone()))
            .ok_or(Error::NotFound)?;
        db.insert_comment(
            author,
            &CreateCommentRequest {
                post_id,
                content: String::from(content),
                parent_id,
            },
        )
    }

    /// A comment as the logged-in user sees it, tombstoned ones included
    pub async fn comment(&self, id: CommentId) -> Option<Comment> {
        let db = self.0.lock().await;
        db.comments.get(&id).map(|c| db.comment_view(c))
    }

    pub async fn post(&self, id: PostId) -> Option<Post> {
        let db = self.0.lock().await;
        db.posts.get(&id).map(|p| db.post_view(p))
    }

    pub async fn topic(&self, slug: &str) -> Option<Topic> {
        let db = self.0.lock().await;
        db.topic_by_slug(slug).map(|t| db.topic_view(t))
    }

    pub async fn user(&self, id: UserId) -> Option<User> {
        self.0.lock().await.users.get(&id).cloned()
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait::async_trait]
impl Api for MockServer {
    async fn list_comments(&self, q: &ListCommentsRequest) -> Result<PaginatedComments, Error> {
        let mut db = self.0.lock().await;
        db.enter("list_comments")?;
        let mut comments = db
            .comments
            .values()
            .filter(|c| q.post_id.map_or(true, |p| c.post_id == p))
            .filter(|c| q.user_id.map_or(true, |u| c.user_id == u))
            .filter(|c| q.parent_id.map_or(true, |p| c.parent_id == Some(p)))
            .filter(|c| !q.only_top_level || c.parent_id.is_none())
            .filter(|c| q.show_deleted_comments || !c.is_deleted)
            .filter(|c| matches_search(&c.content, &q.search))
            .map(|c| db.comment_view(c))
            .collect::<Vec<_>>();
        comments.sort_by(|a, b| {
            let ord = match q.sort {
                CommentSort::Score => a.score.cmp(&b.score),
                CommentSort::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            ordered(ord.then(a.id.cmp(&b.id)), q.order_by)
        });
        if q.show_post_title {
            for c in comments.iter_mut() {
                c.post_title = db.posts.get(&c.post_id).map(|p| p.title.clone());
            }
        }
        let (comments, count) = paginate(comments, q.page, q.page_size);
        Ok(PaginatedComments { comments, count })
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment, Error> {
        let mut db = self.0.lock().await;
        db.enter("get_comment")?;
        db.comments
            .get(&id)
            .map(|c| db.comment_view(c))
            .ok_or(Error::NotFound)
    }

    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<CreatedComment, Error> {
        let mut db = self.0.lock().await;
        db.enter("create_comment")?;
        let author = db.user()?;
        let c = db.insert_comment(author, req)?;
        Ok(CreatedComment {
            message: String::from("Comment created successfully"),
            comment_id: c.id,
        })
    }

    async fn update_comment(
        &self,
        id: CommentId,
        req: &UpdateCommentRequest,
    ) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("update_comment")?;
        req.validate()?;
        let now = db.tick();
        let c = db.owned_comment_mut(id)?;
        let summary = summarize_comment_content(&req.content);
        c.content = req.content.clone();
        c.summary = summary.summary;
        c.has_long_content = summary.is_truncated;
        c.updated_at = now;
        Ok(MessageResponse {
            message: String::from("Comment updated successfully"),
        })
    }

    async fn delete_comment(&self, id: CommentId) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("delete_comment")?;
        let now = db.tick();
        let c = db.owned_comment_mut(id)?;
        c.is_deleted = true;
        c.deleted_at = Some(now);
        Ok(MessageResponse {
            message: String::from("Comment deleted successfully"),
        })
    }

    async fn vote_comment(&self, id: CommentId, req: VoteRequest) -> Result<VoteResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("vote_comment")?;
        let (me, _) = db.user()?;
        let db = &mut *db;
        let c = db
            .comments
            .get_mut(&id)
            .filter(|c| !c.is_deleted)
            .ok_or(Error::NotFound)?;
        let delta = record_vote(&mut db.comment_votes, me, id, req.vote_value);
        c.score += delta;
        let (author, score) = (c.user_id, c.score);
        db.add_karma(author, delta);
        Ok(VoteResponse {
            message: String::from("Vote recorded"),
            score,
        })
    }

    async fn list_posts(&self, q: &ListPostsRequest) -> Result<PaginatedPosts, Error> {
        let mut db = self.0.lock().await;
        db.enter("list_posts")?;
        let mut posts = db
            .posts
            .values()
            .filter(|p| !p.is_deleted)
            .filter(|p| q.topic_name.as_ref().map_or(true, |t| p.topic_name == *t))
            .filter(|p| q.user_id.map_or(true, |u| p.user_id == u))
            .filter(|p| !q.filter_following || db.is_following(p.topic_id))
            .filter(|p| matches_search(&p.title, &q.search))
            .map(|p| db.post_view(p))
            .collect::<Vec<_>>();
        posts.sort_by(|a, b| {
            let ord = match q.sort {
                PostSort::Score => a.score.cmp(&b.score),
                PostSort::CreatedAt => a.created_at.cmp(&b.created_at),
                PostSort::NoOfComments => a.no_of_comments.cmp(&b.no_of_comments),
            };
            ordered(ord.then(a.id.cmp(&b.id)), q.order_by)
        });
        let (posts, count) = paginate(posts, q.page, q.page_size);
        Ok(PaginatedPosts { posts, count })
    }

    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        let mut db = self.0.lock().await;
        db.enter("get_post")?;
        let p = db.live_post(id)?;
        Ok(db.post_view(p))
    }

    async fn create_post(&self, req: &CreatePostRequest) -> Result<CreatedPost, Error> {
        let mut db = self.0.lock().await;
        db.enter("create_post")?;
        let author = db.user()?;
        let p = db.insert_post(author, req)?;
        Ok(CreatedPost {
            message: String::from("Post created successfully"),
            post_id: p.id,
        })
    }

    async fn update_post(
        &self,
        id: PostId,
        req: &UpdatePostRequest,
    ) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("update_post")?;
        req.validate()?;
        let now = db.tick();
        let p = db.owned_post_mut(id)?;
        if let Some(title) = &req.title {
            p.title = String::from(title.trim());
        }
        if let Some(content) = &req.content {
            p.summary = summarize_post_content(content);
            p.content = content.clone();
        }
        p.updated_at = now;
        Ok(MessageResponse {
            message: String::from("Post updated successfully"),
        })
    }

    async fn delete_post(&self, id: PostId) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("delete_post")?;
        let now = db.tick();
        let p = db.owned_post_mut(id)?;
        p.is_deleted = true;
        p.deleted_at = Some(now);
        let topic = p.topic_id;
        if let Some(t) = db.topics.get_mut(&topic) {
            t.no_of_posts -= 1;
        }
        Ok(MessageResponse {
            message: String::from("Post deleted successfully"),
        })
    }

    async fn vote_post(&self, id: PostId, req: VoteRequest) -> Result<VoteResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("vote_post")?;
        let (me, _) = db.user()?;
        let db = &mut *db;
        let p = db
            .posts
            .get_mut(&id)
            .filter(|p| !p.is_deleted)
            .ok_or(Error::NotFound)?;
        let delta = record_vote(&mut db.post_votes, me, id, req.vote_value);
        p.score += delta;
        let (author, score) = (p.user_id, p.score);
        db.add_karma(author, delta);
        Ok(VoteResponse {
            message: String::from("Vote recorded"),
            score,
        })
    }

    async fn pin_comment(
        &self,
        post: PostId,
        req: PinCommentRequest,
    ) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("pin_comment")?;
        if let Some(c) = req.comment_id {
            match db.comments.get(&c) {
                Some(c) if c.post_id == post && !c.is_deleted => (),
                _ => {
                    return Err(Error::BadRequest(String::from(
                        "Comment does not belong to this post",
                    )))
                }
            }
        }
        let p = db.owned_post_mut(post)?;
        p.pinned_comment_id = req.comment_id;
        let message = match req.comment_id {
            Some(_) => "Comment pinned successfully",
            None => "Comment unpinned successfully",
        };
        Ok(MessageResponse {
            message: String::from(message),
        })
    }

    async fn list_topics(&self, q: &ListTopicsRequest) -> Result<PaginatedTopics, Error> {
        let mut db = self.0.lock().await;
        db.enter("list_topics")?;
        let mut topics = db
            .topics
            .values()
            .map(|t| db.topic_view(t))
            .filter(|t| !q.filter_following || t.is_following)
            .filter(|t| matches_search(&t.name, &q.search))
            .collect::<Vec<_>>();
        topics.sort_by(|a, b| {
            let ord = match q.sort {
                TopicSort::Name => a.name.cmp(&b.name),
                TopicSort::NoOfFollowers => a.no_of_followers.cmp(&b.no_of_followers),
                TopicSort::NoOfPosts => a.no_of_posts.cmp(&b.no_of_posts),
            };
            ordered(ord.then(a.id.cmp(&b.id)), q.order_by)
        });
        let (topics, count) = paginate(topics, q.page, q.page_size);
        Ok(PaginatedTopics { topics, count })
    }

    async fn list_topics_summary(&self) -> Result<Vec<Topic>, Error> {
        let mut db = self.0.lock().await;
        db.enter("list_topics_summary")?;
        let mut topics = db
            .topics
            .values()
            .map(|t| db.topic_view(t))
            .collect::<Vec<_>>();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(topics)
    }

    async fn get_topic(&self, slug: &str) -> Result<Topic, Error> {
        let mut db = self.0.lock().await;
        db.enter("get_topic")?;
        db.topic_by_slug(slug)
            .map(|t| db.topic_view(t))
            .ok_or(Error::NotFound)
    }

    async fn follow_topic(&self, req: &FollowTopicRequest) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("follow_topic")?;
        req.validate()?;
        let (me, _) = db.user()?;
        let topic = db
            .topic_by_slug(&req.topic_slug)
            .ok_or(Error::NotFound)?
            .id;
        let delta = match req.is_follow {
            true if db.follows.insert((me, topic)) => 1,
            false if db.follows.remove(&(me, topic)) => -1,
            _ => 0,
        };
        if let Some(t) = db.topics.get_mut(&topic) {
            t.no_of_followers += delta;
        }
        let message = match req.is_follow {
            true => "Topic followed successfully",
            false => "Topic unfollowed successfully",
        };
        Ok(MessageResponse {
            message: String::from(message),
        })
    }

    async fn list_users(&self, q: &ListUsersRequest) -> Result<PaginatedUsers, Error> {
        let mut db = self.0.lock().await;
        db.enter("list_users")?;
        let me = db.session;
        let mut users = db
            .users
            .values()
            .filter(|u| matches_search(&u.username, &q.search))
            .cloned()
            .map(|mut u| {
                if Some(u.id) != me {
                    u.email = String::new();
                }
                u
            })
            .collect::<Vec<_>>();
        users.sort_by(|a, b| {
            let ord = match q.sort {
                UserSort::Karma => a.karma.cmp(&b.karma),
                UserSort::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            ordered(ord.then(a.id.cmp(&b.id)), q.order_by)
        });
        let (users, count) = paginate(users, q.page, q.page_size);
        Ok(PaginatedUsers { users, count })
    }

    async fn get_user(&self, username: &str) -> Result<User, Error> {
        let mut db = self.0.lock().await;
        db.enter("get_user")?;
        let mut u = db
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(Error::NotFound)?;
        if Some(u.id) != db.session {
            u.email = String::new();
        }
        Ok(u)
    }

    async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<MessageResponse, Error> {
        let mut db = self.0.lock().await;
        db.enter("update_profile")?;
        req.validate()?;
        let (me, _) = db.user()?;
        if db
            .users
            .values()
            .any(|u| u.id != me && u.username == req.username)
        {
            return Err(Error::BadRequest(String::from("Username already taken")));
        }
        if let Some(u) = db.users.get_mut(&me) {
            u.username = req.username.clone();
            u.email = req.email.clone();
        }
        for p in db.posts.values_mut().filter(|p| p.user_id == me) {
            p.username = req.username.clone();
        }
        for c in db.comments.values_mut().filter(|c| c.user_id == me) {
            c.username = req.username.clone();
        }
        Ok(MessageResponse {
            message: String::from("Profile updated successfully"),
        })
    }
}
