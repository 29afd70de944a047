use crate::SUMMARY_LENGTH;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    pub summary: String,
    pub is_truncated: bool,
}

fn summarize(content: &str) -> Summary {
    match content.char_indices().nth(SUMMARY_LENGTH) {
        None => Summary {
            summary: String::from(content),
            is_truncated: false,
        },
        Some((cut, _)) => Summary {
            summary: format!("{}...", &content[..cut]),
            is_truncated: true,
        },
    }
}

pub fn summarize_comment_content(content: &str) -> Summary {
    summarize(content)
}

pub fn summarize_post_content(content: &str) -> String {
    summarize(content).summary
}
