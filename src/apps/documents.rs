//! Document library - versioned documents with reviewers and an activity feed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RepositoryError;
use crate::generator::SyntheticDataGenerator;
use crate::record::now;
use crate::repository::{InMemoryRepository, Latency, LatencyProfile, Repository};
use crate::{Record, RecordId, Timestamp};

/// User name recorded on activities triggered from the library itself.
pub const CURRENT_USER: &str = "Current User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Draft,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
    Published,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::UnderReview => "Under Review",
            DocumentStatus::Approved => "Approved",
            DocumentStatus::Rejected => "Rejected",
            DocumentStatus::Published => "Published",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    Contract,
    Requirements,
    Policy,
    Report,
    Proposal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub version: u32,
    pub description: String,
    pub author: String,
    pub date: Timestamp,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviewer {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub status: ReviewStatus,
    pub reviewed_at: Option<Timestamp>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentActivity {
    pub action: String,
    pub user: String,
    pub timestamp: Timestamp,
    pub icon: String,
    pub details: Option<String>,
}

impl DocumentActivity {
    fn new(
        action: impl Into<String>,
        user: impl Into<String>,
        timestamp: Timestamp,
        icon: &str,
    ) -> Self {
        Self {
            action: action.into(),
            user: user.into(),
            timestamp,
            icon: icon.to_string(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "documents", order_by = "last_modified", descending)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(rename = "type", default)]
    pub kind: DocumentKind,
    pub author: String,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
    pub file_size: String,
    pub version: u32,
    #[serde(default)]
    pub version_history: Vec<DocumentVersion>,
    #[serde(default)]
    pub reviewers: Vec<DocumentReviewer>,
    #[serde(default)]
    pub activities: Vec<DocumentActivity>,
}

impl Document {
    /// Record a change: append `activity` and bump `last_modified` to its time.
    fn record(&mut self, activity: DocumentActivity) {
        self.last_modified = activity.timestamp;
        self.activities.push(activity);
    }
}

const SERVICE_AGREEMENT: &str = "\
ANNUAL SERVICE AGREEMENT\n\
\n\
This Agreement is entered into as of January 1, 2025, between Company A (\"Client\") \
and Service Provider B (\"Provider\").\n\
\n\
1. SCOPE OF SERVICES\n\
The Provider agrees to deliver the following services to the Client:\n\
- 24/7 Technical Support\n\
- Monthly System Maintenance\n\
- Quarterly Security Audits\n\
- Annual Performance Review\n\
\n\
2. TERM AND TERMINATION\n\
This Agreement shall commence on January 1, 2025, and continue for a period of twelve \
(12) months unless terminated earlier in accordance with the terms herein.\n\
\n\
3. COMPENSATION\n\
Client agrees to pay Provider the sum of $50,000 annually, payable in quarterly \
installments of $12,500.\n\
\n\
4. CONFIDENTIALITY\n\
Both parties agree to maintain the confidentiality of proprietary information shared \
during the term of this Agreement.\n\
\n\
5. LIABILITY\n\
Provider's liability shall be limited to the total amount paid by Client under this \
Agreement.\n\
\n\
6. GOVERNING LAW\n\
This Agreement shall be governed by the laws of the State of California.";

const MOBILE_REQUIREMENTS: &str = "\
PRODUCT REQUIREMENTS DOCUMENT\n\
Mobile Application v2.0\n\
\n\
1. EXECUTIVE SUMMARY\n\
This document outlines the functional and technical requirements for our \
next-generation mobile application.\n\
\n\
2. PROJECT GOALS\n\
- Improve user engagement by 40%\n\
- Reduce app loading time by 50%\n\
- Implement offline functionality\n\
- Support both iOS and Android platforms\n\
\n\
3. FEATURES\n\
3.1 User Authentication\n\
- Social login integration\n\
- Biometric authentication\n\
- Two-factor authentication\n\
\n\
3.2 Dashboard\n\
- Personalized content feed\n\
- Real-time notifications\n\
- Quick action shortcuts\n\
\n\
3.3 Search & Discovery\n\
- Advanced search filters\n\
- AI-powered recommendations\n\
- Voice search capability";

fn version(
    version: u32,
    description: &str,
    author: &str,
    date: Timestamp,
    is_current: bool,
) -> DocumentVersion {
    DocumentVersion {
        version,
        description: description.to_string(),
        author: author.to_string(),
        date,
        is_current,
    }
}

fn reviewer(name: &str, email: &str, role: &str) -> DocumentReviewer {
    DocumentReviewer {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status: ReviewStatus::Pending,
        reviewed_at: None,
        comment: None,
    }
}

fn approved(mut reviewer: DocumentReviewer, at: Timestamp, comment: &str) -> DocumentReviewer {
    reviewer.status = ReviewStatus::Approved;
    reviewer.reviewed_at = Some(at);
    reviewer.comment = Some(comment.to_string());
    reviewer
}

/// The two starter documents. Fixed content; every date is relative to the
/// generator's baseline.
pub fn seed_documents(generator: &SyntheticDataGenerator) -> Vec<Document> {
    let days_ago = |days: i64| generator.at(-days, 0, 0);
    let hours_ago = |hours: i64| generator.at(0, -hours, 0);

    let agreement = Document {
        id: 1,
        title: "Annual Service Agreement 2025".to_string(),
        description: concat!(
            "Comprehensive service agreement covering maintenance and support ",
            "for the fiscal year 2025"
        )
        .to_string(),
        content: SERVICE_AGREEMENT.to_string(),
        status: DocumentStatus::UnderReview,
        kind: DocumentKind::Contract,
        author: "Sarah Johnson".to_string(),
        created_at: days_ago(30),
        last_modified: days_ago(2),
        file_size: "2.4 MB".to_string(),
        version: 3,
        version_history: vec![
            version(
                3,
                "Updated compensation terms",
                "Sarah Johnson",
                days_ago(2),
                true,
            ),
            version(
                2,
                "Added confidentiality clause",
                "Michael Chen",
                days_ago(10),
                false,
            ),
            version(1, "Initial draft", "Sarah Johnson", days_ago(30), false),
        ],
        reviewers: vec![
            approved(
                reviewer("John Smith", "john.smith@company.com", "Legal Counsel"),
                days_ago(1),
                "Legal terms are acceptable. Approved for signature.",
            ),
            approved(
                reviewer("Emily Davis", "emily.davis@company.com", "Finance Manager"),
                hours_ago(6),
                "Budget allocation confirmed.",
            ),
            reviewer(
                "Robert Wilson",
                "robert.wilson@company.com",
                "Operations Director",
            ),
        ],
        activities: vec![
            DocumentActivity::new(
                "Document created",
                "Sarah Johnson",
                days_ago(30),
                "description",
            ),
            DocumentActivity::new(
                "Version 2 uploaded",
                "Michael Chen",
                days_ago(10),
                "upload_file",
            ),
            DocumentActivity::new(
                "Sent for review",
                "Sarah Johnson",
                days_ago(5),
                "rate_review",
            ),
            DocumentActivity::new(
                "Approved by Legal",
                "John Smith",
                days_ago(1),
                "check_circle",
            ),
            DocumentActivity::new(
                "Approved by Finance",
                "Emily Davis",
                hours_ago(6),
                "check_circle",
            ),
            DocumentActivity::new(
                "Version 3 uploaded",
                "Sarah Johnson",
                days_ago(2),
                "upload_file",
            ),
        ],
    };

    let requirements = Document {
        id: 2,
        title: "Product Requirements Document - Mobile App".to_string(),
        description:
            "Detailed requirements specification for the new mobile application".to_string(),
        content: MOBILE_REQUIREMENTS.to_string(),
        status: DocumentStatus::Draft,
        kind: DocumentKind::Requirements,
        author: "Alex Martinez".to_string(),
        created_at: days_ago(14),
        last_modified: days_ago(1),
        file_size: "1.8 MB".to_string(),
        version: 2,
        version_history: vec![
            version(
                2,
                "Added voice search feature",
                "Alex Martinez",
                days_ago(1),
                true,
            ),
            version(
                1,
                "Initial requirements",
                "Alex Martinez",
                days_ago(14),
                false,
            ),
        ],
        reviewers: vec![
            reviewer(
                "Lisa Anderson",
                "lisa.anderson@company.com",
                "Product Manager",
            ),
            reviewer("David Kim", "david.kim@company.com", "Tech Lead"),
        ],
        activities: vec![
            DocumentActivity::new(
                "Document created",
                "Alex Martinez",
                days_ago(14),
                "description",
            ),
            DocumentActivity::new("Shared with team", "Alex Martinez", days_ago(13), "share"),
            DocumentActivity::new(
                "Version 2 uploaded",
                "Alex Martinez",
                days_ago(1),
                "upload_file",
            ),
        ],
    };

    SyntheticDataGenerator::sorted(vec![agreement, requirements])
}

#[derive(Clone)]
pub struct DocumentLibrary {
    documents: InMemoryRepository<Document>,
}

impl DocumentLibrary {
    pub fn default_latency() -> LatencyProfile {
        LatencyProfile {
            list: Latency::fixed(50),
            get: Latency::fixed(30),
            ..LatencyProfile::uniform(Latency::fixed(100))
        }
    }

    pub fn new(documents: InMemoryRepository<Document>) -> Self {
        Self { documents }
    }

    pub fn seeded(generator: &SyntheticDataGenerator, latency: LatencyProfile) -> Self {
        let documents = seed_documents(generator);
        info!(count = documents.len(), "document library seeded");
        Self::new(InMemoryRepository::with_records(documents, latency))
    }

    pub fn repository(&self) -> &InMemoryRepository<Document> {
        &self.documents
    }

    /// Every document, most recently modified first.
    pub async fn documents(&self) -> Result<Vec<Document>, RepositoryError> {
        self.documents.list_all().await
    }

    pub async fn document(&self, id: RecordId) -> Result<Option<Document>, RepositoryError> {
        self.documents.get_by_id(id).await
    }

    /// Store a new document, created and modified now.
    pub async fn create_document(
        &self,
        mut document: Document,
    ) -> Result<Document, RepositoryError> {
        let created = now();
        document.created_at = created;
        document.last_modified = created;
        self.documents.create(document).await
    }

    pub async fn update_document(&self, document: Document) -> Result<bool, RepositoryError> {
        self.documents.update(document).await
    }

    pub async fn delete_document(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.documents.delete(id).await
    }

    pub async fn set_status(
        &self,
        id: RecordId,
        status: DocumentStatus,
    ) -> Result<bool, RepositoryError> {
        self.documents
            .modify(id, |document| {
                document.status = status;
                document.record(DocumentActivity::new(
                    format!("Status changed to {status}"),
                    CURRENT_USER,
                    now(),
                    "update",
                ));
            })
            .await
    }

    /// Attach `comment` from the reviewer with `reviewer_email`. False when
    /// either the document or the reviewer is missing.
    pub async fn add_reviewer_comment(
        &self,
        document_id: RecordId,
        reviewer_email: &str,
        comment: &str,
    ) -> Result<bool, RepositoryError> {
        self.documents
            .modify_if(document_id, |document| {
                let at = now();
                let Some(reviewer) = document
                    .reviewers
                    .iter_mut()
                    .find(|reviewer| reviewer.email == reviewer_email)
                else {
                    debug!(document_id, reviewer_email, "no such reviewer");
                    return false;
                };

                reviewer.comment = Some(comment.to_string());
                reviewer.reviewed_at = Some(at);
                let mut activity =
                    DocumentActivity::new("Comment added", reviewer.name.clone(), at, "comment");
                activity.details = Some(comment.to_string());
                document.record(activity);
                true
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn library() -> DocumentLibrary {
        let generator =
            SyntheticDataGenerator::for_date(42, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        DocumentLibrary::seeded(&generator, LatencyProfile::none())
    }

    #[test]
    fn status_serializes_with_display_label() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::UnderReview).unwrap(),
            "\"Under Review\""
        );
        assert_eq!(DocumentStatus::UnderReview.to_string(), "Under Review");
    }

    #[tokio::test]
    async fn most_recently_modified_first() {
        let documents = library().documents().await.unwrap();
        let ids: Vec<_> = documents.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);
        let history = &documents[1].version_history;
        assert_eq!(history.iter().filter(|v| v.is_current).count(), 1);
    }

    #[tokio::test]
    async fn status_change_is_logged() {
        let library = library();
        let status = DocumentStatus::Approved;
        assert!(library.set_status(1, status).await.unwrap());

        let document = library.document(1).await.unwrap().unwrap();
        assert_eq!(document.status, DocumentStatus::Approved);
        let last = document.activities.last().unwrap();
        assert_eq!(last.action, "Status changed to Approved");
        assert_eq!(last.user, CURRENT_USER);
        assert_eq!(last.icon, "update");
        assert_eq!(document.last_modified, last.timestamp);

        // The touched document now sorts first.
        assert_eq!(library.documents().await.unwrap()[0].id, 1);
        assert!(!library.set_status(9, status).await.unwrap());
    }

    #[tokio::test]
    async fn reviewer_comment() {
        let library = library();
        let before = library.document(1).await.unwrap().unwrap().activities.len();

        assert!(library
            .add_reviewer_comment(1, "robert.wilson@company.com", "Looks fine")
            .await
            .unwrap());

        let document = library.document(1).await.unwrap().unwrap();
        let reviewer = document
            .reviewers
            .iter()
            .find(|r| r.email == "robert.wilson@company.com")
            .unwrap();
        assert_eq!(reviewer.comment.as_deref(), Some("Looks fine"));
        assert!(reviewer.reviewed_at.is_some());
        assert_eq!(document.activities.len(), before + 1);
        let last = document.activities.last().unwrap();
        assert_eq!(last.user, "Robert Wilson");
        assert_eq!(last.details.as_deref(), Some("Looks fine"));
    }

    #[tokio::test]
    async fn unknown_reviewer_changes_nothing() {
        let library = library();
        let before = library.document(2).await.unwrap().unwrap();
        assert!(!library
            .add_reviewer_comment(2, "nobody@company.com", "hi")
            .await
            .unwrap());
        assert!(!library
            .add_reviewer_comment(7, "lisa.anderson@company.com", "hi")
            .await
            .unwrap());
        assert_eq!(library.document(2).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn create_stamps_both_dates() {
        let library = library();
        let template = library.document(2).await.unwrap().unwrap();
        let created = library.create_document(template).await.unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(created.created_at, created.last_modified);
        assert_eq!(library.documents().await.unwrap()[0].id, 3);
    }
}
