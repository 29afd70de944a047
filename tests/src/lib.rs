//! Fixtures shared by the end-to-end tests and `generate-test-data`

use forum_api::{summarize_comment_content, Comment, CommentId, PostId, Time, UserId, Vote};
use forum_mock_server::MockServer;
use rand::{seq::SliceRandom, Rng};

pub const NUM_USERS: i64 = 3;

const WORDS_PER_COMMENT: usize = 12;

// Odds, out of 100, of each way a generated comment can be irregular
const TOP_LEVEL_ODDS: u32 = 20;
const DELETED_ODDS: u32 = 10;
const ORPHAN_ODDS: u32 = 3;

pub fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("building tokio runtime")
}

/// A flat listing of `n` comments of `post` as a server could return it:
/// shuffled, with tombstones, and with a few replies to comments missing
/// from the listing
pub fn gen_thread(rng: &mut impl Rng, post: PostId, n: usize) -> Vec<Comment> {
    let mut comments: Vec<Comment> = Vec::with_capacity(n);
    for i in 0..n {
        let id = i as i64 + 1;
        let parent_id = match (i, rng.gen_range(0..100)) {
            (0, _) => None,
            (_, r) if r < TOP_LEVEL_ODDS => None,
            (_, r) if r < TOP_LEVEL_ODDS + ORPHAN_ODDS => Some(CommentId(n as i64 + id)),
            _ => Some(comments[rng.gen_range(0..i)].id),
        };
        let content = lipsum::lipsum_from_seed(WORDS_PER_COMMENT, rng.gen());
        let summary = summarize_comment_content(&content);
        let date = Time::from_timestamp(1_700_000_000 + id * 60, 0).unwrap_or_default();
        comments.push(Comment {
            id: CommentId(id),
            post_id: post,
            parent_id,
            content,
            summary: summary.summary,
            path: String::new(),
            score: rng.gen_range(-5..20),
            my_vote: Vote::Neutral,
            is_deleted: rng.gen_range(0..100) < DELETED_ODDS,
            deleted_at: None,
            no_of_replies: 0,
            created_at: date,
            updated_at: date,
            user_id: UserId(rng.gen_range(1..=NUM_USERS)),
            username: String::new(),
            topic_name: String::from("General"),
            post_title: None,
            has_long_content: summary.is_truncated,
        });
    }
    let parents = comments.iter().filter_map(|c| c.parent_id).collect::<Vec<_>>();
    for parent in parents {
        // ids are positions plus one, orphans point past the end
        if let Some(p) = comments.get_mut(parent.0 as usize - 1) {
            p.no_of_replies += 1;
        }
    }
    comments.shuffle(rng);
    comments
}

/// Name of the seeded user `id`, unique per id
pub fn seeded_username(id: UserId) -> String {
    format!("user{}", id.0)
}

/// A server holding a `General` topic with one post by `alice` and `n`
/// comments by other users, created parents first. Returns the post.
pub async fn seed_forum(rng: &mut impl Rng, server: &MockServer, n: usize) -> PostId {
    server.add_topic("General", "Anything goes").await;
    let post = server
        .add_post("General", "Welcome", &lipsum::lipsum_from_seed(30, rng.gen()))
        .await
        .expect("seeding post")
        .id;
    let mut created: Vec<CommentId> = Vec::new();
    for _ in 0..n {
        let parent = match created.is_empty() || rng.gen_range(0..100) < TOP_LEVEL_ODDS {
            true => None,
            false => created.choose(rng).copied(),
        };
        // alice is UserId(1)
        let author = UserId(rng.gen_range(2..=NUM_USERS + 1));
        let name = seeded_username(author);
        let c = server
            .add_comment(
                (author, &name),
                post,
                parent,
                &lipsum::lipsum_from_seed(WORDS_PER_COMMENT, rng.gen()),
            )
            .await
            .expect("seeding comment");
        created.push(c.id);
    }
    post
}
