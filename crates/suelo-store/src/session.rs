use suelo_core::models::ReportKind;
use suelo_core::ports::{IdentityProvider, UserId};

/// Explicit context naming whose reports a store reads and writes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    /// Session without a signed-in user; uses the device-wide partitions
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn for_user(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Build a session from whoever the identity provider reports
    pub async fn from_identity(provider: &dyn IdentityProvider) -> Self {
        Self { user: provider.current_user_id().await }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Key of the partition holding this session's reports of one kind
    pub fn partition_key(&self, kind: ReportKind) -> String {
        match &self.user {
            Some(user) => format!("users/{}/{}", user, kind.partition()),
            None => kind.partition().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticIdentity;

    #[test]
    fn test_anonymous_partitions() {
        let session = Session::anonymous();
        assert_eq!(session.partition_key(ReportKind::Advanced), "advancedReports");
        assert_eq!(session.partition_key(ReportKind::Basic), "basicReports");
    }

    #[tokio::test]
    async fn test_user_partitions() {
        let session = Session::from_identity(&StaticIdentity::signed_in("demo2")).await;
        assert_eq!(session.user(), Some(&UserId("demo2".to_string())));
        assert_eq!(session.partition_key(ReportKind::Basic), "users/demo2/basicReports");
    }
}
