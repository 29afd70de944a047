//! Pure transforms describing what a successful server-side mutation did to
//! an entity, computed from the cached value and the user's input only.

use crate::api::{
    summarize_comment_content, summarize_post_content, Comment, CommentId, Post, Time, Topic,
    UpdatePostRequest, Vote,
};

pub trait Votable: Clone {
    fn score(&self) -> i64;
    fn my_vote(&self) -> Vote;
    fn set_score(&mut self, score: i64, my_vote: Vote);
}

pub trait Deletable: Clone {
    fn mark_deleted(&mut self);
}

impl Votable for Comment {
    fn score(&self) -> i64 {
        self.score
    }

    fn my_vote(&self) -> Vote {
        self.my_vote
    }

    fn set_score(&mut self, score: i64, my_vote: Vote) {
        self.score = score;
        self.my_vote = my_vote;
    }
}

impl Votable for Post {
    fn score(&self) -> i64 {
        self.score
    }

    fn my_vote(&self) -> Vote {
        self.my_vote
    }

    fn set_score(&mut self, score: i64, my_vote: Vote) {
        self.score = score;
        self.my_vote = my_vote;
    }
}

impl Deletable for Comment {
    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

impl Deletable for Post {
    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

/// The score is recomputed against whatever vote the cached copy holds, so
/// applying the same vote twice is a no-op the second time
pub fn vote<E: Votable>(new: Vote) -> impl Fn(&E) -> E {
    move |old| {
        let mut e = old.clone();
        e.set_score(Vote::rescore(old.score(), old.my_vote(), new), new);
        e
    }
}

pub fn delete<E: Deletable>() -> impl Fn(&E) -> E {
    |old| {
        let mut e = old.clone();
        e.mark_deleted();
        e
    }
}

pub fn edit_comment(content: String, now: Time) -> impl Fn(&Comment) -> Comment {
    let summary = summarize_comment_content(&content);
    move |old| Comment {
        content: content.clone(),
        summary: summary.summary.clone(),
        has_long_content: summary.is_truncated,
        updated_at: now,
        ..old.clone()
    }
}

pub fn edit_post(req: UpdatePostRequest, now: Time) -> impl Fn(&Post) -> Post {
    move |old| {
        let content = req.content.clone().unwrap_or_else(|| old.content.clone());
        Post {
            title: req.title.clone().unwrap_or_else(|| old.title.clone()),
            summary: summarize_post_content(&content),
            content,
            updated_at: now,
            ..old.clone()
        }
    }
}

pub fn pin_comment(comment: Option<CommentId>) -> impl Fn(&Post) -> Post {
    move |old| Post {
        pinned_comment_id: comment,
        ..old.clone()
    }
}

/// The follower count only moves when the follow state actually changes
pub fn follow_topic(is_follow: bool) -> impl Fn(&Topic) -> Topic {
    move |old| {
        let delta = match (old.is_following, is_follow) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        };
        Topic {
            is_following: is_follow,
            no_of_followers: old.no_of_followers + delta,
            ..old.clone()
        }
    }
}
