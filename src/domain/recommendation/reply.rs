//! Natural-language reply composition.
//!
//! Replaces the hosted model's final answer with a fixed template that
//! lists the selected articles and addresses the user by profile data.

use crate::domain::catalog::{Article, UserProfile};
use crate::domain::conversation::{has_prior_exchange, ConversationTurn};

use super::ArticleSource;

/// Everything the reply is built from.
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    pub profile: Option<&'a UserProfile>,
    /// Interests the tag search was run with (empty if it was skipped).
    pub interests: &'a [String],
    pub source: ArticleSource,
    pub articles: &'a [Article],
    pub history: &'a [ConversationTurn],
}

const NO_SUGGESTIONS: &str =
    "I couldn't find any articles to suggest right now. Please check back soon for new content.";

const CLOSING: &str = "Let me know if you'd like suggestions on a particular topic.";

/// Builds the reply text.
pub fn compose_reply(ctx: &ReplyContext<'_>) -> String {
    let lead = if ctx.articles.is_empty() {
        NO_SUGGESTIONS.to_string()
    } else {
        introduction(ctx)
    };

    let mut text = if has_prior_exchange(ctx.history) {
        lead
    } else {
        format!("{} {}", greeting(ctx.profile), lead)
    };

    if ctx.articles.is_empty() {
        return text;
    }

    for (index, article) in ctx.articles.iter().enumerate() {
        text.push('\n');
        text.push_str(&format_article(index + 1, article));
    }

    text.push_str("\n\n");
    text.push_str(CLOSING);
    text
}

fn greeting(profile: Option<&UserProfile>) -> String {
    match profile.and_then(UserProfile::display_name) {
        Some(name) => format!("Hi {}!", name),
        None => "Hi there!".to_string(),
    }
}

fn introduction(ctx: &ReplyContext<'_>) -> String {
    let topics = join_topics(ctx.interests);
    match ctx.source {
        ArticleSource::Interests => format!(
            "Based on your interest in {}, here are some articles you might enjoy:",
            topics
        ),
        ArticleSource::Recent if !topics.is_empty() => format!(
            "I couldn't find articles about {} yet, so here are the most recent ones instead:",
            topics
        ),
        ArticleSource::Recent => "Here are some of our most recent articles:".to_string(),
    }
}

fn format_article(position: usize, article: &Article) -> String {
    let mut line = match article.title() {
        Some(title) => format!("{}. {} (id: {})", position, title, article.id()),
        None => format!("{}. Article {}", position, article.id()),
    };
    let tags = article.tags();
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

/// "a", "a and b", "a, b and c"; duplicates collapsed, blanks left out.
fn join_topics(interests: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for interest in interests.iter().map(|i| i.trim()) {
        if !interest.is_empty() && !unique.contains(&interest) {
            unique.push(interest);
        }
    }
    match unique.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
