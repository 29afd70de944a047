use anyhow::Context;
use forum_api::{
    CommentId, CommentSort, CreateCommentRequest, CreatePostRequest, ListTopicsRequest, PostId,
    TopicId, UpdatePostRequest, UpdateProfileRequest, VoteClick,
};
use forum_client::{replies_label, Actions, CollapseState, QueryCache};

mod http;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base url of the forum, eg. `https://forum.example.org`
    #[structopt(short, long)]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the comment thread of a post
    Thread {
        post: i64,

        /// `score` or `created_at`
        #[structopt(long, default_value = "created_at", parse(try_from_str = parse_sort))]
        sort: CommentSort,

        /// Hide the replies of these comments
        #[structopt(long)]
        collapse: Vec<i64>,
    },

    /// List topics
    Topics {
        /// Only the topics you follow
        #[structopt(long)]
        following: bool,
    },

    /// Reply to a post, or to a comment with `--parent`
    Reply {
        post: i64,
        content: String,

        #[structopt(long)]
        parent: Option<i64>,
    },

    /// Start a new post in a topic, by topic id
    NewPost {
        topic: i64,
        title: String,
        content: String,
    },

    /// Upvote a comment, or remove your upvote
    UpvoteComment { comment: i64 },

    /// Downvote a comment, or remove your downvote
    DownvoteComment { comment: i64 },

    EditComment { comment: i64, content: String },

    DeleteComment { comment: i64 },

    /// Pin a comment to the top of its post
    Pin { comment: i64 },

    Unpin { comment: i64 },

    UpvotePost { post: i64 },

    DownvotePost { post: i64 },

    EditPost {
        post: i64,

        #[structopt(long)]
        title: Option<String>,

        #[structopt(long)]
        content: Option<String>,
    },

    DeletePost { post: i64 },

    /// Follow a topic, by slug
    Follow { topic: String },

    Unfollow { topic: String },

    /// Show a user's profile
    User { username: String },

    /// Change your own email and username
    UpdateProfile { email: String, username: String },
}

fn parse_sort(s: &str) -> anyhow::Result<CommentSort> {
    match s {
        "score" => Ok(CommentSort::Score),
        "created_at" => Ok(CommentSort::CreatedAt),
        _ => Err(anyhow::anyhow!("unknown sort {s:?}, expected score or created_at")),
    }
}

/// The session cookie, as set by the forum's login endpoint
fn forum_token() -> anyhow::Result<Option<String>> {
    match std::env::var("FORUM_TOKEN") {
        Ok(tok) => Ok(Some(tok)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).context("retrieving FORUM_TOKEN environment variable"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let api = http::HttpApi::new(opt.host, forum_token()?);
    let actions = Actions::new(api, QueryCache::shared());

    let notice = match opt.cmd {
        Command::Thread {
            post,
            sort,
            collapse,
        } => {
            let tree = actions
                .load_thread(PostId(post), sort)
                .await
                .with_context(|| format!("fetching the comments of post {post}"))?;
            let mut collapsed = CollapseState::default();
            for c in collapse {
                collapsed.collapse(CommentId(c));
            }
            for (depth, node) in tree.walk(&collapsed) {
                let c = &node.comment;
                println!(
                    "{:indent$}#{} {} ({:+}): {}",
                    "",
                    c.id.0,
                    c.username,
                    c.score,
                    node.display_text(),
                    indent = 2 * depth,
                );
                if let Some(label) = replies_label(c.no_of_replies, collapsed.is_collapsed(c.id)) {
                    println!("{:indent$}  [{label}]", "", indent = 2 * depth);
                }
            }
            return Ok(());
        }
        Command::Topics { following } => {
            let page = actions
                .load_topics(ListTopicsRequest {
                    filter_following: following,
                    ..ListTopicsRequest::default()
                })
                .await
                .context("listing topics")?;
            for t in page.items.iter() {
                let mark = match t.is_following {
                    true => "*",
                    false => " ",
                };
                println!(
                    "{mark} {} ({} posts, {} followers)",
                    t.slug(),
                    t.no_of_posts,
                    t.no_of_followers
                );
            }
            return Ok(());
        }
        Command::Reply {
            post,
            content,
            parent,
        } => {
            actions
                .create_comment(CreateCommentRequest {
                    post_id: PostId(post),
                    content,
                    parent_id: parent.map(CommentId),
                })
                .await
        }
        Command::NewPost {
            topic,
            title,
            content,
        } => {
            actions
                .create_post(CreatePostRequest {
                    topic_id: TopicId(topic),
                    title,
                    content,
                })
                .await
        }
        Command::UpvoteComment { comment } => {
            let c = actions.load_comment(CommentId(comment)).await?;
            actions.vote_comment(&c, VoteClick::Upvote).await
        }
        Command::DownvoteComment { comment } => {
            let c = actions.load_comment(CommentId(comment)).await?;
            actions.vote_comment(&c, VoteClick::Downvote).await
        }
        Command::EditComment { comment, content } => {
            actions.edit_comment(CommentId(comment), content).await
        }
        Command::DeleteComment { comment } => actions.delete_comment(CommentId(comment)).await,
        Command::Pin { comment } => {
            let c = actions.load_comment(CommentId(comment)).await?;
            actions.pin_comment(&c).await
        }
        Command::Unpin { comment } => {
            let c = actions.load_comment(CommentId(comment)).await?;
            actions.unpin_comment(&c).await
        }
        Command::UpvotePost { post } => {
            let p = actions.load_post(PostId(post)).await?;
            actions.vote_post(&p, VoteClick::Upvote).await
        }
        Command::DownvotePost { post } => {
            let p = actions.load_post(PostId(post)).await?;
            actions.vote_post(&p, VoteClick::Downvote).await
        }
        Command::EditPost {
            post,
            title,
            content,
        } => {
            actions
                .edit_post(PostId(post), UpdatePostRequest { title, content })
                .await
        }
        Command::DeletePost { post } => actions.delete_post(PostId(post)).await,
        Command::Follow { topic } => actions.follow_topic(&topic, true).await,
        Command::Unfollow { topic } => actions.follow_topic(&topic, false).await,
        Command::User { username } => {
            let u = actions
                .load_user(&username)
                .await
                .with_context(|| format!("fetching user {username}"))?;
            println!("{} (karma {}, joined {})", u.username, u.karma, u.created_at);
            if !u.email.is_empty() {
                println!("{}", u.email);
            }
            return Ok(());
        }
        Command::UpdateProfile { email, username } => {
            actions
                .update_profile(UpdateProfileRequest { email, username })
                .await
        }
    };

    println!("{}", notice?);
    Ok(())
}
