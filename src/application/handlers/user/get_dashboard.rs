//! GetDashboardHandler - Personal overview across every module.
//!
//! The reads are independent, so they run concurrently and the first
//! failure aborts the rest.

use std::sync::Arc;

use crate::domain::assessment::compute_trend;
use crate::domain::foundation::UserId;
use crate::domain::user::{ActivityCounts, Dashboard, LatestAssessment, MoodDistribution, UserError};
use crate::ports::{AssessmentRepository, ChatRepository, ForumRepository, JournalRepository};

#[derive(Debug, Clone)]
pub struct GetDashboardQuery {
    pub user_id: UserId,
}

pub struct GetDashboardHandler {
    assessments: Arc<dyn AssessmentRepository>,
    journal: Arc<dyn JournalRepository>,
    chat: Arc<dyn ChatRepository>,
    forum: Arc<dyn ForumRepository>,
}

impl GetDashboardHandler {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        journal: Arc<dyn JournalRepository>,
        chat: Arc<dyn ChatRepository>,
        forum: Arc<dyn ForumRepository>,
    ) -> Self {
        Self {
            assessments,
            journal,
            chat,
            forum,
        }
    }

    pub async fn handle(&self, query: GetDashboardQuery) -> Result<Dashboard, UserError> {
        let user_id = &query.user_id;

        let (
            assessment_count,
            journal_count,
            chat_count,
            post_count,
            latest,
            mood_counts,
            trend_points,
        ) = futures::try_join!(
            self.assessments.count_by_user(user_id),
            self.journal.count_by_user(user_id),
            self.chat.count_by_user(user_id),
            self.forum.count_posts_by_author(user_id),
            self.assessments.latest_by_user(user_id),
            self.journal.mood_counts(user_id),
            self.assessments.trend_points(user_id),
        )?;

        Ok(Dashboard {
            counts: ActivityCounts {
                assessments: assessment_count,
                journal_entries: journal_count,
                chat_messages: chat_count,
                forum_posts: post_count,
            },
            latest_assessment: latest.map(|a| LatestAssessment {
                id: *a.id(),
                percentage: a.score().percentage,
                wellness_level: a.analytics().wellness_level,
                summary: a.insight().summary.clone(),
                created_at: *a.created_at(),
            }),
            mood_distribution: MoodDistribution::from_counts(mood_counts),
            trend: compute_trend(trend_points),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAssessmentRepository, InMemoryChatRepository, InMemoryForumRepository,
        InMemoryJournalRepository,
    };
    use crate::domain::assessment::{default_insight, Answer, Assessment, ScoredSheet};
    use crate::domain::chat::ChatMessage;
    use crate::domain::foundation::{AssessmentId, JournalEntryId};
    use crate::domain::journal::{JournalDraft, JournalEntry, Mood};

    struct Fixture {
        assessments: Arc<InMemoryAssessmentRepository>,
        journal: Arc<InMemoryJournalRepository>,
        chat: Arc<InMemoryChatRepository>,
        forum: Arc<InMemoryForumRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                assessments: Arc::new(InMemoryAssessmentRepository::new()),
                journal: Arc::new(InMemoryJournalRepository::new()),
                chat: Arc::new(InMemoryChatRepository::new()),
                forum: Arc::new(InMemoryForumRepository::new()),
            }
        }

        fn handler(&self) -> GetDashboardHandler {
            GetDashboardHandler::new(
                self.assessments.clone(),
                self.journal.clone(),
                self.chat.clone(),
                self.forum.clone(),
            )
        }
    }

    fn user() -> UserId {
        UserId::new("dash-user").unwrap()
    }

    #[tokio::test]
    async fn empty_dashboard_for_new_user() {
        let fixture = Fixture::new();

        let dashboard = fixture
            .handler()
            .handle(GetDashboardQuery { user_id: user() })
            .await
            .unwrap();

        assert_eq!(dashboard.counts, ActivityCounts::default());
        assert!(dashboard.latest_assessment.is_none());
        assert_eq!(dashboard.mood_distribution.total(), 0);
        assert_eq!(dashboard.trend.count, 0);
    }

    #[tokio::test]
    async fn aggregates_activity() {
        let fixture = Fixture::new();
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", 4), Answer::new("q2", 4)]).unwrap();
        let insight = default_insight(sheet.analytics.wellness_level);
        let assessment = Assessment::new(AssessmentId::new(), user(), sheet, insight);
        fixture.assessments.save(&assessment).await.unwrap();

        for mood in [Mood::Good, Mood::Good, Mood::Low] {
            let entry = JournalEntry::new(
                JournalEntryId::new(),
                user(),
                JournalDraft::new(None, "note", Some(mood), &[]).unwrap(),
            );
            fixture.journal.insert(&entry).await.unwrap();
        }
        fixture
            .chat
            .append(&ChatMessage::from_user(user(), "hi").unwrap())
            .await
            .unwrap();

        let dashboard = fixture
            .handler()
            .handle(GetDashboardQuery { user_id: user() })
            .await
            .unwrap();

        assert_eq!(dashboard.counts.assessments, 1);
        assert_eq!(dashboard.counts.journal_entries, 3);
        assert_eq!(dashboard.counts.chat_messages, 1);
        assert_eq!(dashboard.counts.forum_posts, 0);
        let latest = dashboard.latest_assessment.unwrap();
        assert_eq!(latest.id, *assessment.id());
        assert_eq!(latest.percentage, 80);
        assert_eq!(dashboard.mood_distribution.get(Mood::Good), 2);
        assert_eq!(dashboard.mood_distribution.get(Mood::Low), 1);
    }
}
