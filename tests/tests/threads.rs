use std::collections::HashMap;

use forum_api::{CommentSort, PaginatedComments, PostId};
use forum_client::{Actions, CollapseState, CommentTree, QueryCache};
use forum_mock_server::MockServer;
use rand::SeedableRng;
use tests::{gen_thread, rt, seed_forum};

#[test]
fn generated_listings_thread_consistently() {
    bolero::check!()
        .with_type::<(u64, u8)>()
        .cloned()
        .for_each(|(seed, n)| {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let comments = gen_thread(&mut rng, PostId(1), n as usize);
            let tree = CommentTree::build(comments.clone());
            assert_eq!(tree.len(), comments.len());

            let by_id = comments
                .iter()
                .map(|c| (c.id, c))
                .collect::<HashMap<_, _>>();
            let mut seen = 0;
            let mut stack = tree.roots.iter().map(|r| (None, r)).collect::<Vec<_>>();
            while let Some((parent, node)) = stack.pop() {
                seen += 1;
                let expected = node.comment.parent_id.filter(|p| by_id.contains_key(p));
                assert_eq!(parent, expected, "comment {:?} misplaced", node.id());
                stack.extend(node.children.iter().map(|c| (Some(node.id()), c)));
            }
            assert_eq!(seen, comments.len());
        });
}

#[test]
fn thread_survives_json_round_trip() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let comments = gen_thread(&mut rng, PostId(1), 50);
    let body = serde_json::to_string(&PaginatedComments {
        count: comments.len() as i64,
        comments: comments.clone(),
    })
    .unwrap();
    let parsed: PaginatedComments = serde_json::from_str(&body).unwrap();
    assert_eq!(
        CommentTree::build(parsed.comments),
        CommentTree::build(comments)
    );
}

#[test]
fn collapsing_hides_whole_subtrees() {
    rt().block_on(async {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let server = MockServer::new();
        let post = seed_forum(&mut rng, &server, 80).await;
        let actions = Actions::new(server, QueryCache::shared());
        let tree = actions
            .load_thread(post, CommentSort::CreatedAt)
            .await
            .unwrap();
        assert_eq!(tree.len(), 80);

        let expanded = CollapseState::default();
        assert_eq!(tree.walk(&expanded).count(), 80);

        let mut collapsed = CollapseState::default();
        let root = &tree.roots[0];
        collapsed.toggle(root.id());
        let visible = tree.walk(&collapsed).map(|(_, n)| n.id()).collect::<Vec<_>>();
        let hidden = tree.walk(&expanded).count() - visible.len();
        let mut subtree = 0;
        let mut stack = root.children.iter().collect::<Vec<_>>();
        while let Some(n) = stack.pop() {
            subtree += 1;
            stack.extend(n.children.iter());
        }
        assert_eq!(hidden, subtree);
        assert!(visible.contains(&root.id()));

        for (depth, node) in tree.walk(&expanded) {
            let expected_depth = node.comment.path.split('.').count() - 1;
            assert_eq!(depth, expected_depth, "comment {}", node.id().0);
            assert_eq!(node.children.len() as i64, node.comment.no_of_replies);
        }
    })
}

#[test]
fn cached_thread_tracks_mutations() {
    rt().block_on(async {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let server = MockServer::new();
        let post = seed_forum(&mut rng, &server, 20).await;
        let actions = Actions::new(server.clone(), QueryCache::shared());
        let tree = actions.load_thread(post, CommentSort::Score).await.unwrap();

        let target = tree.roots[0].comment.clone();
        actions.upvote_comment(&target).await.unwrap();

        let after = actions.cached_thread(post, CommentSort::Score).unwrap();
        let node = after.find(target.id).unwrap();
        assert_eq!(node.comment.score, target.score + 1);
        assert_eq!(after.len(), tree.len());

        // Every other comment is still the very same allocation
        for (_, n) in after.walk(&CollapseState::default()) {
            if n.id() != target.id {
                let old = tree.find(n.id()).unwrap();
                assert!(std::sync::Arc::ptr_eq(&old.comment, &n.comment));
            }
        }

        assert!(actions.cached_thread(PostId(post.0 + 1), CommentSort::Score).is_none());
        assert_eq!(
            server.comment(target.id).await.map(|c| c.score),
            Some(target.score + 1)
        );
    })
}
