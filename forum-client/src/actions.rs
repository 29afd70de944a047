use std::{fmt, sync::Arc};

use chrono::Utc;

use crate::{
    api::{
        deslugify_topic_name, Api, Comment, CommentId, CommentSort, CreateCommentRequest,
        CreatePostRequest, Error,
        FollowTopicRequest, ListCommentsRequest, ListPostsRequest, ListTopicsRequest,
        ListUsersRequest, Page, PinCommentRequest, Post, PostId, Topic, UpdateCommentRequest,
        UpdatePostRequest, UpdateProfileRequest, User, Vote, VoteClick, VoteRequest,
    },
    apply_mutation, mutation, CommentTree, Entity, QueryCache, SharedCache,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Comment,
    Post,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Comment => write!(f, "comment"),
            Target::Post => write!(f, "post"),
        }
    }
}

/// Outcome of a successful action, displayed as the user-facing notification
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    Voted { target: Target, vote: Vote },
    Updated(Target),
    Deleted(Target),
    Created { id: CommentId },
    PostCreated { id: PostId },
    Pinned { pinned: bool },
    Followed { topic_name: String, is_follow: bool },
    ProfileUpdated,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capitalized = |t: &Target| match t {
            Target::Comment => "Comment",
            Target::Post => "Post",
        };
        match self {
            Notice::Voted { target, vote } => {
                let verb = match vote {
                    Vote::Up => "Upvoted",
                    Vote::Down => "Downvoted",
                    Vote::Neutral => "Removed vote from",
                };
                write!(f, "{verb} {target} successfully!")
            }
            Notice::Updated(t) => write!(f, "{} updated successfully!", capitalized(t)),
            Notice::Deleted(t) => write!(f, "{} deleted successfully!", capitalized(t)),
            Notice::Created { .. } => write!(f, "Comment created successfully!"),
            Notice::PostCreated { .. } => write!(f, "Post created successfully!"),
            Notice::Pinned { pinned: true } => write!(f, "Comment pinned successfully!"),
            Notice::Pinned { pinned: false } => write!(f, "Comment unpinned successfully!"),
            Notice::Followed {
                topic_name,
                is_follow,
            } => {
                let verb = match is_follow {
                    true => "followed",
                    false => "unfollowed",
                };
                write!(f, "Topic {topic_name} {verb} successfully!")
            }
            Notice::ProfileUpdated => write!(f, "Updated profile successfully!"),
        }
    }
}

fn failed(action: &str, e: Error) -> Error {
    match e.is_validation() {
        true => tracing::debug!(error = %e, "rejected input, did not {action}"),
        false => tracing::warn!(error = ?e, "failed to {action}"),
    }
    e
}

/// Runs user actions against the server and keeps the cache in sync.
///
/// The cache is only touched once the server accepted the change; a failed
/// request leaves it exactly as it was. Concurrent actions on one entity are
/// not serialized, the last response to arrive wins.
pub struct Actions<A> {
    api: A,
    cache: SharedCache,
}

impl<A: Api> Actions<A> {
    pub fn new(api: A, cache: SharedCache) -> Actions<A> {
        Actions { api, cache }
    }

    pub fn with_fresh_cache(api: A) -> Actions<A> {
        Actions::new(api, QueryCache::shared())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    fn mutate<E, F>(&self, key: &E::Key, transform: F) -> usize
    where
        E: Entity,
        F: Fn(&E) -> E,
    {
        apply_mutation::<E, F>(&mut self.cache.lock(), key, transform)
    }

    pub async fn load_comments(
        &self,
        query: ListCommentsRequest,
    ) -> Result<Arc<Page<Arc<Comment>>>, Error> {
        let page = self
            .api
            .list_comments(&query)
            .await
            .map_err(|e| failed("list comments", e))?;
        Ok(self.cache.lock().comments.insert_page(query, page.into()))
    }

    pub async fn load_comment(&self, id: CommentId) -> Result<Arc<Comment>, Error> {
        let c = self
            .api
            .get_comment(id)
            .await
            .map_err(|e| failed("fetch comment", e))?;
        Ok(self.cache.lock().comments.insert_item(c))
    }

    /// Fetches all comments of a post and threads them
    pub async fn load_thread(&self, post: PostId, sort: CommentSort) -> Result<CommentTree, Error> {
        let page = self
            .load_comments(ListCommentsRequest::thread(post, sort))
            .await?;
        Ok(CommentTree::build(page.items.iter().cloned()))
    }

    /// Rebuilds a thread from the cache only, reflecting every mutation
    /// applied since it was loaded
    pub fn cached_thread(&self, post: PostId, sort: CommentSort) -> Option<CommentTree> {
        let cache = self.cache.lock();
        let page = cache
            .comments
            .page(&ListCommentsRequest::thread(post, sort))?
            .clone();
        drop(cache);
        Some(CommentTree::build(page.items.iter().cloned()))
    }

    pub async fn load_post(&self, id: PostId) -> Result<Arc<Post>, Error> {
        let p = self
            .api
            .get_post(id)
            .await
            .map_err(|e| failed("fetch post", e))?;
        Ok(self.cache.lock().posts.insert_item(p))
    }

    pub async fn load_posts(&self, query: ListPostsRequest) -> Result<Arc<Page<Arc<Post>>>, Error> {
        let page = self
            .api
            .list_posts(&query)
            .await
            .map_err(|e| failed("list posts", e))?;
        Ok(self.cache.lock().posts.insert_page(query, page.into()))
    }

    pub async fn load_topic(&self, slug: &str) -> Result<Arc<Topic>, Error> {
        let t = self
            .api
            .get_topic(slug)
            .await
            .map_err(|e| failed("fetch topic", e))?;
        Ok(self.cache.lock().topics.insert_item(t))
    }

    pub async fn load_topics(
        &self,
        query: ListTopicsRequest,
    ) -> Result<Arc<Page<Arc<Topic>>>, Error> {
        let page = self
            .api
            .list_topics(&query)
            .await
            .map_err(|e| failed("list topics", e))?;
        Ok(self.cache.lock().topics.insert_page(query, page.into()))
    }

    /// All topics as a flat list, cached under the topics family's list entry
    pub async fn load_topics_summary(&self) -> Result<Arc<Vec<Arc<Topic>>>, Error> {
        let topics = self
            .api
            .list_topics_summary()
            .await
            .map_err(|e| failed("list topics", e))?;
        Ok(self.cache.lock().topics.insert_list(topics))
    }

    pub async fn load_user(&self, username: &str) -> Result<Arc<User>, Error> {
        let u = self
            .api
            .get_user(username)
            .await
            .map_err(|e| failed("fetch user", e))?;
        Ok(self.cache.lock().users.insert_item(u))
    }

    pub async fn load_users(&self, query: ListUsersRequest) -> Result<Arc<Page<Arc<User>>>, Error> {
        let page = self
            .api
            .list_users(&query)
            .await
            .map_err(|e| failed("list users", e))?;
        Ok(self.cache.lock().users.insert_page(query, page.into()))
    }

    pub async fn vote_comment(&self, comment: &Comment, click: VoteClick) -> Result<Notice, Error> {
        let vote = comment.my_vote.after(click);
        self.api
            .vote_comment(comment.id, VoteRequest { vote_value: vote })
            .await
            .map_err(|e| failed("vote on comment", e))?;
        self.mutate::<Comment, _>(&comment.id, mutation::vote::<Comment>(vote));
        Ok(Notice::Voted {
            target: Target::Comment,
            vote,
        })
    }

    pub async fn upvote_comment(&self, comment: &Comment) -> Result<Notice, Error> {
        self.vote_comment(comment, VoteClick::Upvote).await
    }

    pub async fn downvote_comment(&self, comment: &Comment) -> Result<Notice, Error> {
        self.vote_comment(comment, VoteClick::Downvote).await
    }

    pub async fn edit_comment(&self, id: CommentId, content: String) -> Result<Notice, Error> {
        let req = UpdateCommentRequest { content };
        req.validate().map_err(|e| failed("update comment", e))?;
        self.api
            .update_comment(id, &req)
            .await
            .map_err(|e| failed("update comment", e))?;
        self.mutate::<Comment, _>(&id, mutation::edit_comment(req.content, Utc::now()));
        Ok(Notice::Updated(Target::Comment))
    }

    pub async fn delete_comment(&self, id: CommentId) -> Result<Notice, Error> {
        self.api
            .delete_comment(id)
            .await
            .map_err(|e| failed("delete comment", e))?;
        self.mutate::<Comment, _>(&id, mutation::delete::<Comment>());
        Ok(Notice::Deleted(Target::Comment))
    }

    /// The new comment's position depends on server-side sorting, so cached
    /// comment listings are dropped rather than patched
    pub async fn create_comment(&self, req: CreateCommentRequest) -> Result<Notice, Error> {
        req.validate().map_err(|e| failed("create comment", e))?;
        let created = self
            .api
            .create_comment(&req)
            .await
            .map_err(|e| failed("create comment", e))?;
        let dropped = self.cache.lock().comments.invalidate_all_pages();
        tracing::debug!(
            family = Comment::PLURAL,
            dropped,
            "invalidated cached pages"
        );
        Ok(Notice::Created {
            id: created.comment_id,
        })
    }

    /// Like comments, a new post may land on any cached listing page
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Notice, Error> {
        req.validate().map_err(|e| failed("create post", e))?;
        let created = self
            .api
            .create_post(&req)
            .await
            .map_err(|e| failed("create post", e))?;
        let dropped = self.cache.lock().posts.invalidate_all_pages();
        tracing::debug!(family = Post::PLURAL, dropped, "invalidated cached pages");
        Ok(Notice::PostCreated {
            id: created.post_id,
        })
    }

    pub async fn pin_comment(&self, comment: &Comment) -> Result<Notice, Error> {
        self.set_pinned(comment, true).await
    }

    pub async fn unpin_comment(&self, comment: &Comment) -> Result<Notice, Error> {
        self.set_pinned(comment, false).await
    }

    async fn set_pinned(&self, comment: &Comment, pinned: bool) -> Result<Notice, Error> {
        let pinned_id = pinned.then_some(comment.id);
        self.api
            .pin_comment(
                comment.post_id,
                PinCommentRequest {
                    comment_id: pinned_id,
                },
            )
            .await
            .map_err(|e| failed("pin comment", e))?;
        self.mutate::<Post, _>(&comment.post_id, mutation::pin_comment(pinned_id));
        Ok(Notice::Pinned { pinned })
    }

    pub async fn vote_post(&self, post: &Post, click: VoteClick) -> Result<Notice, Error> {
        let vote = post.my_vote.after(click);
        self.api
            .vote_post(post.id, VoteRequest { vote_value: vote })
            .await
            .map_err(|e| failed("vote on post", e))?;
        self.mutate::<Post, _>(&post.id, mutation::vote::<Post>(vote));
        Ok(Notice::Voted {
            target: Target::Post,
            vote,
        })
    }

    pub async fn upvote_post(&self, post: &Post) -> Result<Notice, Error> {
        self.vote_post(post, VoteClick::Upvote).await
    }

    pub async fn downvote_post(&self, post: &Post) -> Result<Notice, Error> {
        self.vote_post(post, VoteClick::Downvote).await
    }

    pub async fn edit_post(&self, id: PostId, req: UpdatePostRequest) -> Result<Notice, Error> {
        req.validate().map_err(|e| failed("update post", e))?;
        self.api
            .update_post(id, &req)
            .await
            .map_err(|e| failed("update post", e))?;
        self.mutate::<Post, _>(&id, mutation::edit_post(req, Utc::now()));
        Ok(Notice::Updated(Target::Post))
    }

    pub async fn delete_post(&self, id: PostId) -> Result<Notice, Error> {
        self.api
            .delete_post(id)
            .await
            .map_err(|e| failed("delete post", e))?;
        self.mutate::<Post, _>(&id, mutation::delete::<Post>());
        Ok(Notice::Deleted(Target::Post))
    }

    /// Also drops cached "followed topics" listings, whose membership changed
    pub async fn follow_topic(&self, slug: &str, is_follow: bool) -> Result<Notice, Error> {
        let req = FollowTopicRequest {
            topic_slug: String::from(slug),
            is_follow,
        };
        req.validate().map_err(|e| failed("follow topic", e))?;
        self.api
            .follow_topic(&req)
            .await
            .map_err(|e| failed("follow topic", e))?;
        {
            let mut cache = self.cache.lock();
            apply_mutation::<Topic, _>(
                &mut cache,
                &req.topic_slug,
                mutation::follow_topic(is_follow),
            );
            cache.topics.invalidate_pages(|q| q.filter_following);
        }
        Ok(Notice::Followed {
            topic_name: deslugify_topic_name(slug),
            is_follow,
        })
    }

    /// A new username shows up in every cached comment and post, so the
    /// whole cache is dropped
    pub async fn update_profile(&self, req: UpdateProfileRequest) -> Result<Notice, Error> {
        req.validate().map_err(|e| failed("update profile", e))?;
        self.api
            .update_profile(&req)
            .await
            .map_err(|e| failed("update profile", e))?;
        self.cache.lock().clear();
        Ok(Notice::ProfileUpdated)
    }
}
