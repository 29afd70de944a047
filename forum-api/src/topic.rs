use crate::Error;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct TopicId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Topic {
    pub id: TopicId,
    /// Every word capitalized, separated by single spaces
    pub name: String,
    pub description: String,
    pub no_of_posts: i64,
    pub no_of_followers: i64,
    #[serde(default)]
    pub is_following: bool,
}

impl Topic {
    pub fn slug(&self) -> String {
        slugify_topic_name(&self.name)
    }
}

pub fn slugify_topic_name(name: &str) -> String {
    name.to_lowercase().split(' ').collect::<Vec<_>>().join("-")
}

pub fn deslugify_topic_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FollowTopicRequest {
    pub topic_slug: String,
    pub is_follow: bool,
}

impl FollowTopicRequest {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.topic_slug)?;
        if self.topic_slug.is_empty() {
            return Err(Error::BadRequest(String::from("Topic slug is required")));
        }
        Ok(())
    }
}
