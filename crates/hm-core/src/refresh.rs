//! Content refresh: fold documentation feeds into the catalog.
//!
//! Fetching is somebody else's job. A [`ContentProvider`] hands over three
//! already-collected feeds (the service index, certification exam guides,
//! and "what's new" announcements) and [`refresh`] merges them into a copy
//! of the catalog, recording every change in a human-readable log.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::entry::{Difficulty, ServiceEntry};
use crate::error::{CatalogError, CatalogResult};

/// Only this many announcements are considered per refresh.
pub const MAX_ANNOUNCEMENTS: usize = 20;

const DOMAIN_KEYWORDS: [&str; 3] = ["domain", "section", "area"];

/// A service as it appears in the documentation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListing {
    /// Display name, e.g. "Amazon Simple Queue Service".
    pub name: String,
    /// Category heading the service was listed under.
    pub category: String,
    /// Description from the service's landing page, if one was found.
    #[serde(default)]
    pub description: Option<String>,
}

/// A section of a certification exam guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDomain {
    /// Section heading, e.g. "Domain 2: Design Resilient Architectures".
    pub title: String,
    /// Bullet points under the heading.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A product announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Headline.
    pub title: String,
    /// Publication date as printed, if any.
    #[serde(default)]
    pub date: Option<String>,
    /// First paragraph.
    #[serde(default)]
    pub summary: String,
}

/// Source of the three feeds a refresh consumes.
pub trait ContentProvider {
    /// The documentation service index.
    fn service_listings(&self) -> CatalogResult<Vec<ServiceListing>>;

    /// Exam guide sections.
    fn exam_domains(&self) -> CatalogResult<Vec<ExamDomain>>;

    /// Recent announcements, newest first.
    fn announcements(&self) -> CatalogResult<Vec<Announcement>>;
}

/// Which feeds to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshScope {
    /// Service index only.
    Docs,
    /// Exam guides only.
    Certification,
    /// Announcements only.
    Blogs,
    /// Everything, in the order docs, certification, blogs.
    #[default]
    All,
}

impl RefreshScope {
    /// Parse a scope from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "docs" | "documentation" => Some(Self::Docs),
            "cert" | "certification" | "exams" => Some(Self::Certification),
            "blogs" | "blog" | "news" => Some(Self::Blogs),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    fn includes(self, other: Self) -> bool {
        self == Self::All || self == other
    }
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docs => write!(f, "documentation"),
            Self::Certification => write!(f, "certification exam guides"),
            Self::Blogs => write!(f, "announcements"),
            Self::All => write!(f, "all sources"),
        }
    }
}

/// The refreshed catalog and what changed.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// The catalog after merging.
    pub catalog: Catalog,
    /// One line per change, in the order they were made.
    pub changes: Vec<String>,
}

/// Merge the feeds selected by `scope` into a copy of `current`.
///
/// A failing feed is logged and skipped; the others are still merged.
pub fn refresh(
    current: &Catalog,
    provider: &dyn ContentProvider,
    scope: RefreshScope,
) -> RefreshReport {
    let mut merger = Merger {
        catalog: current.clone(),
        changes: Vec::new(),
    };

    if scope.includes(RefreshScope::Docs) {
        match provider.service_listings() {
            Ok(listings) => merger.merge_listings(&listings),
            Err(e) => warn!("skipping service index: {e}"),
        }
    }
    if scope.includes(RefreshScope::Certification) {
        match provider.exam_domains() {
            Ok(domains) => merger.merge_exam_domains(&domains),
            Err(e) => warn!("skipping exam guides: {e}"),
        }
    }
    if scope.includes(RefreshScope::Blogs) {
        match provider.announcements() {
            Ok(announcements) => merger.merge_announcements(&announcements),
            Err(e) => warn!("skipping announcements: {e}"),
        }
    }

    info!(changes = merger.changes.len(), %scope, "refresh complete");
    RefreshReport {
        catalog: merger.catalog,
        changes: merger.changes,
    }
}

struct Merger {
    catalog: Catalog,
    changes: Vec<String>,
}

impl Merger {
    fn merge_listings(&mut self, listings: &[ServiceListing]) {
        for listing in listings {
            let Some(name) = normalize_service_name(&listing.name) else {
                continue;
            };
            let category = listing.category.trim();

            match self.catalog.get_mut(&name) {
                Some(entry) => {
                    if !category.is_empty() && entry.category != category {
                        entry.category = category.to_string();
                        self.changes
                            .push(format!("Updated category for {name} to {category}"));
                    }
                }
                None => {
                    let entry = ServiceEntry::new(
                        format!("{} - AWS service (description pending)", listing.name.trim()),
                        category,
                        Difficulty::Medium,
                        "This is a newer AWS service. Research its key features and use cases for certification exams.",
                    );
                    // Normalized names are alphanumeric, so this cannot fail.
                    if self.catalog.add(&name, entry).is_ok() {
                        self.changes
                            .push(format!("Added new service: {name} in category {category}"));
                    }
                }
            }

            let description = listing.description.as_deref().map(str::trim);
            if let (Some(description), Some(entry)) = (description, self.catalog.get_mut(&name))
                && !description.is_empty()
                && entry.description != description
            {
                entry.description = description.to_string();
                self.changes.push(format!("Updated description for {name}"));
            }
        }
    }

    fn merge_exam_domains(&mut self, domains: &[ExamDomain]) {
        let names = self.owned_names();
        for domain in domains {
            let title = domain.title.trim();
            let lower = title.to_lowercase();
            if !DOMAIN_KEYWORDS.iter().any(|k| lower.contains(k)) {
                continue;
            }
            for item in &domain.items {
                let item = item.trim();
                let note = format!("Exam domain: {title} - {item}");
                for name in mentioned(&names, item) {
                    self.append(name, &note, "exam domain info");
                }
            }
        }
    }

    fn merge_announcements(&mut self, announcements: &[Announcement]) {
        let names = self.owned_names();
        for announcement in announcements.iter().take(MAX_ANNOUNCEMENTS) {
            let title = announcement.title.trim();
            if title.is_empty() {
                continue;
            }
            let date = announcement
                .date
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("Recent update");
            let note = format!(
                "Recent update ({date}): {title} - {}",
                announcement.summary.trim()
            );
            for name in mentioned(&names, title) {
                self.append(name, &note, "recent update");
            }
        }
    }

    fn owned_names(&self) -> Vec<String> {
        self.catalog.names().into_iter().map(String::from).collect()
    }

    fn append(&mut self, name: &str, note: &str, what: &str) {
        if let Some(entry) = self.catalog.get_mut(name)
            && entry.append_note(note)
        {
            self.changes
                .push(format!("Updated certification notes for {name} with {what}"));
        }
    }
}

fn mentioned<'a>(names: &'a [String], text: &str) -> impl Iterator<Item = &'a str> {
    let lower = text.to_lowercase();
    names
        .iter()
        .filter(move |n| lower.contains(&n.to_lowercase()))
        .map(String::as_str)
}

/// Reduce a marketing name to a catalog key.
///
/// Vendor prefixes are dropped, a few flagship services are special-cased,
/// and everything that is not a letter or digit is removed. Returns `None`
/// when nothing is left.
pub fn normalize_service_name(raw: &str) -> Option<String> {
    let name = raw.replace("Amazon", "").replace("AWS", "");
    let name = name.trim();

    for (needle, key) in [("S3", "S3"), ("EC2", "EC2"), ("RDS", "RDS"), ("Lambda", "LAMBDA")] {
        if name.contains(needle) {
            return Some(key.to_string());
        }
    }

    let key: String = name
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_alphanumeric())
        .collect();
    (!key.is_empty()).then_some(key)
}

/// Feeds read from a JSON document produced by an external fetcher.
///
/// ```json
/// {
///   "services": [{"name": "Amazon SQS", "category": "Messaging"}],
///   "exam_domains": [{"title": "Domain 1", "items": ["Use SQS for decoupling"]}],
///   "announcements": [{"title": "SQS adds FIFO", "date": "2024-01-01", "summary": "..."}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFile {
    /// Documentation service index.
    #[serde(default)]
    pub services: Vec<ServiceListing>,
    /// Exam guide sections.
    #[serde(default)]
    pub exam_domains: Vec<ExamDomain>,
    /// Announcements, newest first.
    #[serde(default)]
    pub announcements: Vec<Announcement>,
}

impl FeedFile {
    /// Read a feed document from disk.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| CatalogError::io(PathBuf::from(path), e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl ContentProvider for FeedFile {
    fn service_listings(&self) -> CatalogResult<Vec<ServiceListing>> {
        Ok(self.services.clone())
    }

    fn exam_domains(&self) -> CatalogResult<Vec<ExamDomain>> {
        Ok(self.exam_domains.clone())
    }

    fn announcements(&self) -> CatalogResult<Vec<Announcement>> {
        Ok(self.announcements.clone())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::seed::default_catalog;

    fn listing(name: &str, category: &str) -> ServiceListing {
        ServiceListing {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
        }
    }

    fn feed() -> FeedFile {
        FeedFile {
            services: vec![
                listing("Amazon Simple Queue Service", "Application Integration"),
                listing("Amazon S3 Glacier", "Storage"),
                ServiceListing {
                    description: Some("Run code without servers".to_string()),
                    ..listing("AWS Lambda", "Serverless")
                },
            ],
            exam_domains: vec![
                ExamDomain {
                    title: "Domain 1: Design Secure Architectures".to_string(),
                    items: vec![
                        "Encrypt data at rest in S3 and RDS".to_string(),
                        "Nothing relevant here".to_string(),
                    ],
                },
                ExamDomain {
                    title: "Appendix".to_string(),
                    items: vec!["S3 in the appendix".to_string()],
                },
            ],
            announcements: vec![Announcement {
                title: "DynamoDB adds zero-ETL integrations".to_string(),
                date: Some("Mar 3, 2025".to_string()),
                summary: "Replicate tables to analytics.".to_string(),
            }],
        }
    }

    struct Failing;

    impl ContentProvider for Failing {
        fn service_listings(&self) -> CatalogResult<Vec<ServiceListing>> {
            Err(CatalogError::InvalidName("boom".to_string()))
        }
        fn exam_domains(&self) -> CatalogResult<Vec<ExamDomain>> {
            Err(CatalogError::InvalidName("boom".to_string()))
        }
        fn announcements(&self) -> CatalogResult<Vec<Announcement>> {
            Ok(vec![Announcement {
                title: "EC2 gets new instance types".to_string(),
                date: None,
                summary: "Faster.".to_string(),
            }])
        }
    }

    #[test]
    fn normalize_names() {
        assert_eq!(normalize_service_name("Amazon S3 Glacier").as_deref(), Some("S3"));
        assert_eq!(normalize_service_name("Amazon EC2").as_deref(), Some("EC2"));
        assert_eq!(normalize_service_name("AWS Lambda").as_deref(), Some("LAMBDA"));
        assert_eq!(
            normalize_service_name("Amazon Simple Queue Service").as_deref(),
            Some("SIMPLEQUEUESERVICE")
        );
        assert_eq!(normalize_service_name("AWS Step-Functions!").as_deref(), Some("STEPFUNCTIONS"));
        assert_eq!(normalize_service_name("AWS"), None);
        assert_eq!(normalize_service_name("  --  "), None);
    }

    #[test]
    fn listings_add_and_recategorize() {
        let report = refresh(&default_catalog(), &feed(), RefreshScope::Docs);
        let sqs = report.catalog.get("SIMPLEQUEUESERVICE").unwrap();
        assert_eq!(sqs.difficulty, Difficulty::Medium);
        assert_eq!(sqs.category, "Application Integration");
        assert!(sqs.description.contains("description pending"));

        let lambda = report.catalog.get("LAMBDA").unwrap();
        assert_eq!(lambda.category, "Serverless");
        assert_eq!(lambda.description, "Run code without servers");

        assert_eq!(
            report.changes,
            vec![
                "Added new service: SIMPLEQUEUESERVICE in category Application Integration",
                "Updated category for LAMBDA to Serverless",
                "Updated description for LAMBDA",
            ]
        );
    }

    #[test]
    fn exam_domains_append_notes_once() {
        let report = refresh(&default_catalog(), &feed(), RefreshScope::Certification);
        let s3 = &report.catalog.get("S3").unwrap().study_notes;
        assert!(s3.ends_with(
            "\n\nExam domain: Domain 1: Design Secure Architectures - Encrypt data at rest in S3 and RDS"
        ));
        assert!(!s3.contains("appendix"));
        assert_eq!(report.changes.len(), 2); // RDS and S3

        let again = refresh(&report.catalog, &feed(), RefreshScope::Certification);
        assert!(again.changes.is_empty());
        assert_eq!(again.catalog, report.catalog);
    }

    #[test]
    fn announcements_mention_services() {
        let report = refresh(&default_catalog(), &feed(), RefreshScope::Blogs);
        let notes = &report.catalog.get("DYNAMODB").unwrap().study_notes;
        assert!(notes.contains(
            "Recent update (Mar 3, 2025): DynamoDB adds zero-ETL integrations - Replicate tables to analytics."
        ));
        assert_eq!(
            report.changes,
            vec!["Updated certification notes for DYNAMODB with recent update"]
        );
    }

    #[test]
    fn only_first_twenty_announcements() {
        let mut f = FeedFile::default();
        for i in 0..MAX_ANNOUNCEMENTS {
            f.announcements.push(Announcement {
                title: format!("Unrelated news {i}"),
                date: None,
                summary: String::new(),
            });
        }
        f.announcements.push(Announcement {
            title: "RDS news".to_string(),
            date: None,
            summary: String::new(),
        });
        let report = refresh(&default_catalog(), &f, RefreshScope::All);
        assert!(report.changes.is_empty());
    }

    #[test]
    fn failing_feeds_are_skipped() {
        let report = refresh(&default_catalog(), &Failing, RefreshScope::All);
        assert_eq!(report.catalog.len(), 5);
        assert!(
            report
                .catalog
                .get("EC2")
                .unwrap()
                .study_notes
                .contains("Recent update (Recent update): EC2 gets new instance types - Faster.")
        );
    }

    #[test]
    fn scope_parsing() {
        assert_eq!(RefreshScope::parse("cert"), Some(RefreshScope::Certification));
        assert_eq!(RefreshScope::parse("DOCS"), Some(RefreshScope::Docs));
        assert_eq!(RefreshScope::parse("blogs"), Some(RefreshScope::Blogs));
        assert_eq!(RefreshScope::parse("all"), Some(RefreshScope::All));
        assert_eq!(RefreshScope::parse("rss"), None);
    }

    #[test]
    fn feed_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        fs::write(
            &path,
            r#"{"services": [{"name": "Amazon Athena", "category": "Analytics"}]}"#,
        )
        .unwrap();
        let f = FeedFile::load(&path).unwrap();
        assert_eq!(f.services.len(), 1);
        assert!(f.announcements.is_empty());
        assert!(FeedFile::load(&dir.path().join("missing.json")).is_err());
    }

    proptest! {
        #[test]
        fn normalized_names_are_catalog_keys(raw in "[ -~]{0,40}") {
            if let Some(key) = normalize_service_name(&raw) {
                prop_assert!(!key.is_empty());
                prop_assert!(key.chars().all(char::is_alphanumeric));
                let mut c = Catalog::new();
                prop_assert!(c.add(&key, ServiceEntry::new("d", "c", Difficulty::Easy, "")).is_ok());
            }
        }
    }
}
