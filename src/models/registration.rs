use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UserStatus;

/// Onboarding questionnaire answers, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub experience: Option<String>,
    pub goals: Option<String>,
    pub injuries: Option<String>,
    pub preferences: Option<String>,
    pub availability: Option<String>,
    pub additional_info: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionnaireRequest {
    pub experience: Option<String>,
    pub goals: Option<String>,
    pub injuries: Option<String>,
    pub preferences: Option<String>,
    pub availability: Option<String>,
    pub additional_info: Option<String>,
}

impl QuestionnaireRequest {
    /// Blank answers are stored as NULL.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            experience: clean(self.experience),
            goals: clean(self.goals),
            injuries: clean(self.injuries),
            preferences: clean(self.preferences),
            availability: clean(self.availability),
            additional_info: clean(self.additional_info),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Registration joined with the applicant, as shown on the admin review page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationWithUser {
    #[serde(flatten)]
    pub registration: Registration,
    pub user: RegistrationUser,
}

#[derive(Debug, FromRow)]
pub(crate) struct RegistrationWithUserRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub experience: Option<String>,
    pub goals: Option<String>,
    pub injuries: Option<String>,
    pub preferences: Option<String>,
    pub availability: Option<String>,
    pub additional_info: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub user_name: Option<String>,
    pub user_email: String,
    pub user_status: UserStatus,
    pub user_created_at: DateTime<Utc>,
}

impl From<RegistrationWithUserRow> for RegistrationWithUser {
    fn from(row: RegistrationWithUserRow) -> Self {
        Self {
            user: RegistrationUser {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
                status: row.user_status,
                created_at: row.user_created_at,
            },
            registration: Registration {
                id: row.id,
                user_id: row.user_id,
                experience: row.experience,
                goals: row.goals,
                injuries: row.injuries,
                preferences: row.preferences,
                availability: row.availability,
                additional_info: row.additional_info,
                submitted_at: row.submitted_at,
                reviewed_at: row.reviewed_at,
                reviewed_by: row.reviewed_by,
            },
        }
    }
}
