use std::sync::Arc;

use forum_api::{
    CommentSort, Error, ListCommentsRequest, ListPostsRequest, PostId, UpdateProfileRequest,
    UserId, Vote, VoteClick,
};
use forum_client::{Actions, Notice, QueryCache, Target};
use forum_mock_server::MockServer;
use rand::SeedableRng;
use tests::{rt, seed_forum, seeded_username};

async fn seeded(seed: u64, n: usize) -> (MockServer, Actions<MockServer>, PostId) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let server = MockServer::new();
    let post = seed_forum(&mut rng, &server, n).await;
    (
        server.clone(),
        Actions::new(server, QueryCache::shared()),
        post,
    )
}

#[test]
fn concurrent_votes_on_distinct_comments() {
    rt().block_on(async {
        let (server, actions, post) = seeded(1, 10).await;
        let page = actions
            .load_comments(ListCommentsRequest::thread(post, CommentSort::CreatedAt))
            .await
            .unwrap();
        let (a, b) = (page.items[0].clone(), page.items[1].clone());

        let (ra, rb) = futures::join!(
            actions.upvote_comment(&a),
            actions.downvote_comment(&b)
        );
        assert_eq!(
            ra.unwrap(),
            Notice::Voted {
                target: Target::Comment,
                vote: Vote::Up
            }
        );
        assert_eq!(rb.unwrap().to_string(), "Downvoted comment successfully!");

        let cache = actions.cache().lock();
        let page = cache
            .comments
            .page(&ListCommentsRequest::thread(post, CommentSort::CreatedAt))
            .unwrap();
        let score = |id| page.items.iter().find(|c| c.id == id).unwrap().score;
        assert_eq!((score(a.id), score(b.id)), (1, -1));
        drop(cache);

        assert_eq!(server.comment(a.id).await.unwrap().score, 1);
        assert_eq!(server.comment(b.id).await.unwrap().score, -1);
    })
}

#[test]
fn repeated_click_toggles_vote_off() {
    rt().block_on(async {
        let (server, actions, post) = seeded(2, 3).await;
        let p = actions.load_post(post).await.unwrap();
        actions.vote_post(&p, VoteClick::Upvote).await.unwrap();

        let p = actions.cache().lock().posts.item(&post).unwrap().clone();
        assert_eq!((p.score, p.my_vote), (1, Vote::Up));

        let notice = actions.vote_post(&p, VoteClick::Upvote).await.unwrap();
        assert_eq!(notice.to_string(), "Removed vote from post successfully!");
        let p = actions.cache().lock().posts.item(&post).unwrap().clone();
        assert_eq!((p.score, p.my_vote), (0, Vote::Neutral));
        assert_eq!(server.post(post).await.unwrap().score, 0);
    })
}

#[test]
fn server_rejections_leave_every_entry_untouched() {
    rt().block_on(async {
        let (server, actions, post) = seeded(3, 15).await;
        let query = ListCommentsRequest::thread(post, CommentSort::Score);
        let page = actions.load_comments(query.clone()).await.unwrap();
        let posts = actions
            .load_posts(ListPostsRequest::default())
            .await
            .unwrap();
        let victim = page.items[0].clone();

        // Seeded comments are not alice's
        assert_eq!(
            actions.delete_comment(victim.id).await,
            Err(Error::PermissionDenied)
        );
        server.log_out().await;
        assert_eq!(
            actions.upvote_comment(&victim).await,
            Err(Error::Unauthenticated)
        );
        server.fail_next(Error::NotFound).await;
        assert_eq!(
            actions.pin_comment(&victim).await,
            Err(Error::NotFound)
        );

        let cache = actions.cache().lock();
        assert!(Arc::ptr_eq(cache.comments.page(&query).unwrap(), &page));
        assert!(Arc::ptr_eq(
            cache.posts.page(&ListPostsRequest::default()).unwrap(),
            &posts
        ));
    })
}

#[test]
fn deleting_a_post_marks_it_in_listings() {
    rt().block_on(async {
        let (server, actions, post) = seeded(4, 0).await;
        let listing = actions
            .load_posts(ListPostsRequest::default())
            .await
            .unwrap();
        assert_eq!(listing.items.len(), 1);

        actions.delete_post(post).await.unwrap();
        let cache = actions.cache().lock();
        let listing = cache.posts.page(&ListPostsRequest::default()).unwrap();
        assert!(listing.items[0].is_deleted);
        assert_eq!(listing.count, 1);
        drop(cache);

        assert!(server.post(post).await.unwrap().is_deleted);
        assert_eq!(actions.load_post(post).await, Err(Error::NotFound));
    })
}

#[test]
fn replies_to_foreign_comments() {
    rt().block_on(async {
        let (server, actions, post) = seeded(5, 5).await;
        server.log_in_as(UserId(9), "carol").await;
        let tree = actions
            .load_thread(post, CommentSort::CreatedAt)
            .await
            .unwrap();
        let parent = tree.roots[0].id();
        let Notice::Created { id } = actions
            .create_comment(forum_api::CreateCommentRequest {
                post_id: post,
                content: String::from("nice thread"),
                parent_id: Some(parent),
            })
            .await
            .unwrap()
        else {
            panic!("unexpected notice");
        };

        let tree = actions
            .load_thread(post, CommentSort::CreatedAt)
            .await
            .unwrap();
        let reply = tree.find(id).unwrap();
        assert_eq!(reply.comment.parent_id, Some(parent));
        assert_eq!(reply.comment.username, "carol");
        assert!(tree
            .find(parent)
            .unwrap()
            .children
            .iter()
            .any(|c| c.id() == id));
    })
}

#[test]
fn seeded_authors_have_distinct_names() {
    rt().block_on(async {
        let (server, actions, post) = seeded(6, 40).await;
        let page = actions
            .load_comments(ListCommentsRequest::thread(post, CommentSort::CreatedAt))
            .await
            .unwrap();
        for c in page.items.iter() {
            assert_eq!(c.username, seeded_username(c.user_id));
        }

        let author = page.items[0].user_id;
        let user = actions.load_user(&seeded_username(author)).await.unwrap();
        assert_eq!(user.id, author);

        let taken = UpdateProfileRequest {
            email: String::from("alice@example.org"),
            username: seeded_username(author),
        };
        assert_eq!(
            actions.update_profile(taken).await,
            Err(Error::BadRequest(String::from("Username already taken")))
        );
        assert_eq!(server.user(UserId(1)).await.unwrap().username, "alice");
    })
}
