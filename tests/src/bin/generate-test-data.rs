use forum_api::{PaginatedComments, PostId};
use rand::SeedableRng;

const NUM_COMMENTS: usize = 150;

/// Prints a `GET /comments` response body for a randomly threaded post,
/// seeded by the first argument
fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let comments = tests::gen_thread(&mut rng, PostId(1), NUM_COMMENTS);
    let resp = PaginatedComments {
        count: comments.len() as i64,
        comments,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&resp).expect("serializing comments")
    );
}
