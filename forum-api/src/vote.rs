use crate::Error;

/// A user's vote on a post or comment, as the server reports it in `my_vote`
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum Vote {
    Down,
    #[default]
    Neutral,
    Up,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteClick {
    Upvote,
    Downvote,
}

impl Vote {
    pub fn value(self) -> i64 {
        match self {
            Vote::Down => -1,
            Vote::Neutral => 0,
            Vote::Up => 1,
        }
    }

    /// Clicking the button matching the current vote removes it
    pub fn after(self, click: VoteClick) -> Vote {
        match (self, click) {
            (Vote::Up, VoteClick::Upvote) => Vote::Neutral,
            (_, VoteClick::Upvote) => Vote::Up,
            (Vote::Down, VoteClick::Downvote) => Vote::Neutral,
            (_, VoteClick::Downvote) => Vote::Down,
        }
    }

    /// Score once `old` has been replaced by `new`
    pub fn rescore(score: i64, old: Vote, new: Vote) -> i64 {
        score - old.value() + new.value()
    }
}

impl TryFrom<i64> for Vote {
    type Error = Error;

    fn try_from(v: i64) -> Result<Vote, Error> {
        match v {
            -1 => Ok(Vote::Down),
            0 => Ok(Vote::Neutral),
            1 => Ok(Vote::Up),
            v => Err(Error::InvalidVote(v)),
        }
    }
}

impl From<Vote> for i64 {
    fn from(v: Vote) -> i64 {
        v.value()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VoteRequest {
    pub vote_value: Vote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling() {
        assert_eq!(Vote::Neutral.after(VoteClick::Upvote), Vote::Up);
        assert_eq!(Vote::Up.after(VoteClick::Upvote), Vote::Neutral);
        assert_eq!(Vote::Down.after(VoteClick::Upvote), Vote::Up);
        assert_eq!(Vote::Neutral.after(VoteClick::Downvote), Vote::Down);
        assert_eq!(Vote::Down.after(VoteClick::Downvote), Vote::Neutral);
        assert_eq!(Vote::Up.after(VoteClick::Downvote), Vote::Down);
    }

    #[test]
    fn rescoring_sequence() {
        let mut score = 10;
        let mut vote = Vote::Neutral;
        for (click, expected_score, expected_vote) in [
            (VoteClick::Upvote, 11, Vote::Up),
            (VoteClick::Upvote, 10, Vote::Neutral),
            (VoteClick::Upvote, 11, Vote::Up),
            (VoteClick::Downvote, 9, Vote::Down),
            (VoteClick::Downvote, 10, Vote::Neutral),
        ] {
            let new = vote.after(click);
            score = Vote::rescore(score, vote, new);
            vote = new;
            assert_eq!((score, vote), (expected_score, expected_vote));
        }
    }

    #[test]
    fn rescore_is_exact() {
        bolero::check!()
            .with_type::<(i32, i8, bool)>()
            .cloned()
            .for_each(|(score, v, up)| {
                let score = i64::from(score);
                let old = Vote::try_from(i64::from(v).rem_euclid(3) - 1).unwrap();
                let click = match up {
                    true => VoteClick::Upvote,
                    false => VoteClick::Downvote,
                };
                let new = old.after(click);
                let rescored = Vote::rescore(score, old, new);
                assert_eq!(rescored - score, new.value() - old.value());
                // clicking the same button twice comes back to the same score
                let back = new.after(click);
                if old == back {
                    assert_eq!(Vote::rescore(rescored, new, back), score);
                }
            })
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Vote::Down).unwrap(), "-1");
        assert_eq!(
            serde_json::to_string(&VoteRequest { vote_value: Vote::Up }).unwrap(),
            r#"{"vote_value":1}"#
        );
        assert_eq!(serde_json::from_str::<Vote>("0").unwrap(), Vote::Neutral);
        assert!(serde_json::from_str::<Vote>("2").is_err());
    }
}
