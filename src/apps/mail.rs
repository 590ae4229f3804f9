//! Mail - a single mailbox split into folders.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RepositoryError;
use crate::generator::SyntheticDataGenerator;
use crate::repository::{Filter, InMemoryRepository, Latency, LatencyProfile, Repository};
use crate::{Record, RecordId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MailFolder {
    #[default]
    Inbox,
    Sent,
    Drafts,
    Archive,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "emails", order_by = "date", descending)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: RecordId,
    pub from: String,
    pub from_email: String,
    pub subject: String,
    pub preview: String,
    pub body: String,
    #[record(created_at)]
    pub date: Timestamp,
    pub is_read: bool,
    pub is_starred: bool,
    pub has_attachment: bool,
    #[serde(default)]
    pub folder: MailFolder,
}

impl Email {
    /// An outgoing message. `date` and `folder` are overwritten on send.
    pub fn compose(
        from: impl Into<String>,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        Self {
            id: 0,
            from: from.into(),
            from_email: from_email.into(),
            subject: subject.into(),
            preview: body.chars().take(100).collect(),
            body,
            date: crate::record::now(),
            is_read: true,
            is_starred: false,
            has_attachment: false,
            folder: MailFolder::Drafts,
        }
    }
}

const SENDERS: &[(&str, &str)] = &[
    ("Sarah Johnson", "sarah.j@company.com"),
    ("Michael Chen", "mchen@techcorp.io"),
    ("Emily Rodriguez", "emily.r@startup.dev"),
    ("James Wilson", "jwilson@enterprise.net"),
    ("Alexandra Brown", "alex.b@business.com"),
    ("David Martinez", "dmartinez@consulting.pro"),
    ("Jennifer Taylor", "jtaylor@design.studio"),
    ("Robert Anderson", "randerson@marketing.agency"),
    ("Lisa Thompson", "lthompson@sales.biz"),
    ("William Garcia", "wgarcia@finance.co"),
    ("Microsoft Teams", "noreply@teams.microsoft.com"),
    ("GitHub", "noreply@github.com"),
    ("LinkedIn", "notifications@linkedin.com"),
    ("Amazon", "orders@amazon.com"),
    ("Slack", "feedback@slack.com"),
];

const SUBJECTS: &[&str] = &[
    "Q4 Project Review Meeting",
    "Action Required: Approve Budget Request",
    "Welcome to the Team!",
    "Weekly Status Report - Week 42",
    "Important: Security Update Required",
    "Your order has been shipped",
    "Meeting Notes - Product Roadmap Discussion",
    "Reminder: Complete Your Performance Review",
    "New Feature Release - v2.1.0",
    "Team Building Event - Save the Date",
    "Invoice #12345 - Payment Due",
    "Congratulations on Your Work Anniversary!",
    "System Maintenance Scheduled",
    "Customer Feedback Summary",
    "Project Milestone Achieved",
    "Vacation Request Approval",
    "Training Session: Advanced Analytics",
    "Code Review Request - PR #456",
    "Monthly Newsletter - October 2025",
    "Urgent: Production Issue Detected",
];

const PREVIEWS: &[&str] = &[
    "Hi, I wanted to follow up on our previous discussion about the project timeline...",
    "Please find attached the latest report for your review. Let me know if you have any \
     questions...",
    "Thank you for your continued support. We're excited to share some updates with you...",
    "This is a reminder that the deadline is approaching. Please make sure to submit your work...",
    "Great news! We've successfully completed the first phase of the project...",
    "I hope this email finds you well. I wanted to reach out regarding the upcoming event...",
    "As discussed in our last meeting, here are the action items we need to address...",
    "Your feedback has been incredibly valuable. We've implemented several of your suggestions...",
    "We're pleased to announce some exciting changes coming to our platform...",
    "Just a quick note to confirm the details we discussed earlier today...",
];

fn body(generator: &mut SyntheticDataGenerator, sender: &str) -> String {
    let opening = generator.pick(PREVIEWS);
    let status = if generator.chance(50) {
        "I've reviewed the documents you sent and everything looks good. We can proceed with the \
         next steps as planned."
    } else {
        "I wanted to bring to your attention some important updates that require immediate action."
    };
    let closing = if generator.chance(40) {
        "Please let me know if you need any additional information or clarification on any of \
         these points."
    } else {
        "Looking forward to hearing your thoughts on this matter."
    };
    format!("Dear Team,\n\n{opening}\n\n{status}\n\n{closing}\n\nBest regards,\n{sender}")
}

/// Fabricate `count` inbox emails dated up to 30 days before the baseline.
pub fn seed_emails(generator: &mut SyntheticDataGenerator, count: usize) -> Vec<Email> {
    let mut emails = Vec::with_capacity(count);

    for i in 0..count {
        let (from, from_email) = *SyntheticDataGenerator::cycle(SENDERS, i);
        let subject = *SyntheticDataGenerator::cycle(SUBJECTS, i);
        let days_ago = generator.between(0..30);
        let hours_ago = generator.between(0..24);
        let preview = generator.pick(PREVIEWS).to_string();
        let body = body(generator, from);

        emails.push(Email {
            id: i as RecordId + 1,
            from: from.to_string(),
            from_email: from_email.to_string(),
            subject: subject.to_string(),
            preview,
            body,
            date: generator.at(-days_ago, -hours_ago, 0),
            is_read: generator.chance(60),
            is_starred: generator.chance(15),
            has_attachment: generator.chance(25),
            folder: MailFolder::Inbox,
        });
    }

    SyntheticDataGenerator::sorted(emails)
}

#[derive(Clone)]
pub struct MailService {
    emails: InMemoryRepository<Email>,
}

impl MailService {
    pub const DEFAULT_EMAIL_COUNT: usize = 25;

    pub fn default_latency() -> LatencyProfile {
        LatencyProfile {
            list: Latency::fixed(100),
            get: Latency::fixed(50),
            create: Latency::fixed(200),
            update: Latency::fixed(50),
            delete: Latency::fixed(50),
            mutate: Latency::fixed(50),
        }
    }

    pub fn new(emails: InMemoryRepository<Email>) -> Self {
        Self { emails }
    }

    pub fn seeded(
        generator: &mut SyntheticDataGenerator,
        count: usize,
        latency: LatencyProfile,
    ) -> Self {
        let emails = seed_emails(generator, count);
        info!(
            count = emails.len(),
            seed = generator.seed(),
            "mailbox seeded"
        );
        Self::new(InMemoryRepository::with_records(emails, latency))
    }

    pub fn repository(&self) -> &InMemoryRepository<Email> {
        &self.emails
    }

    /// Emails in `folder`, newest first.
    pub async fn folder(&self, folder: MailFolder) -> Result<Vec<Email>, RepositoryError> {
        let in_folder: &Filter<'_, Email> = &move |email: &Email| email.folder == folder;
        self.emails.list(Some(in_folder)).await
    }

    pub async fn email(&self, id: RecordId) -> Result<Option<Email>, RepositoryError> {
        self.emails.get_by_id(id).await
    }

    /// File `email` into Sent, dated now. Returns the stored message.
    pub async fn send(&self, mut email: Email) -> Result<Email, RepositoryError> {
        email.folder = MailFolder::Sent;
        self.emails.create(email).await
    }

    pub async fn mark_as_read(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.emails.modify(id, |email| email.is_read = true).await
    }

    pub async fn toggle_star(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.emails
            .modify(id, |email| email.is_starred = !email.is_starred)
            .await
    }

    pub async fn delete_email(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.emails.delete(id).await
    }

    pub async fn unread_count(&self, folder: MailFolder) -> Result<usize, RepositoryError> {
        let unread: &Filter<'_, Email> =
            &move |email: &Email| email.folder == folder && !email.is_read;
        self.emails.count(unread).await
    }
}
