// 📰 News Entity - PE deal news and AI news articles

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{first_text, non_empty, text_or_default, Field, FieldValue, LogoSubject, Record};

/// Category value that marks private-equity / M&A news.
pub const PE_NEWS_CATEGORY: &str = "pe news";

const FUNDING_WORDS: &[&str] = &["raise", "funding", "series", "million", "billion"];

/// Which feed an article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewsChannel {
    PrivateEquity,
    Ai,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "text_or_default")]
    pub title: String,

    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    pub source: Option<String>,

    pub category: Option<String>,

    pub region: Option<String>,

    /// RFC 3339, RFC 2822 or plain date
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NewsArticle {
    /// "PE News" (any case) is the PE feed; every other category is AI news.
    pub fn channel(&self) -> NewsChannel {
        match non_empty(&self.category) {
            Some(c) if c.eq_ignore_ascii_case(PE_NEWS_CATEGORY) => NewsChannel::PrivateEquity,
            _ => NewsChannel::Ai,
        }
    }

    /// `description`, else `summary`.
    pub fn summary_text(&self) -> Option<&str> {
        first_text(&self.description, &self.summary)
    }

    /// Raw publication date, `published` before `date`.
    pub fn published_text(&self) -> Option<&str> {
        first_text(&self.published, &self.date)
    }

    pub fn link_url(&self) -> Option<&str> {
        first_text(&self.url, &self.link)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_published(self.published_text()?)
    }

    /// Headline talks about a raise.
    pub fn is_funding_news(&self) -> bool {
        let title = self.title.to_lowercase();
        FUNDING_WORDS.iter().any(|w| title.contains(w))
    }
}

fn parse_published(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Articles of one channel, order preserved.
pub fn channel_feed(articles: &[NewsArticle], channel: NewsChannel) -> Vec<NewsArticle> {
    articles
        .iter()
        .filter(|a| a.channel() == channel)
        .cloned()
        .collect()
}

/// Newest first; undated articles sink to the bottom in input order.
pub fn sort_newest_first(articles: &mut [NewsArticle]) {
    articles.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
}

impl Record for NewsArticle {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.title),
            Field::Description => match self.summary_text() {
                Some(text) => FieldValue::Text(text),
                None => FieldValue::Missing,
            },
            Field::Category => FieldValue::text(&self.category),
            Field::Region => FieldValue::text(&self.region),
            Field::Source => FieldValue::text(&self.source),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for NewsArticle {
    fn display_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.title)
    }
}
