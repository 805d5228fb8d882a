//! Controller for the create/edit campaign page.

use crate::controllers::Notifier;
use crate::domain::campaign::NewCampaign;
use crate::domain::types::CampaignId;
use crate::forms::campaigns::{CampaignDraft, CampaignFormError, DraftField};
use crate::gateway::{CampaignReader, CampaignWriter, GatewayError};

/// Lifecycle of the form page.
///
/// `Saved` and `LoadFailed` are terminal for the current activation: after a
/// save the caller navigates back to the collection view, and a failed load
/// means there is no draft to proceed to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Fetching,
    Ready,
    Submitting,
    Saved,
    LoadFailed(GatewayError),
}

/// Owns the editable draft of a single campaign and submits it.
pub struct CampaignFormController<G, N> {
    gateway: G,
    notifier: N,
    campaign_id: Option<CampaignId>,
    draft: CampaignDraft,
    state: FormState,
}

impl<G, N> CampaignFormController<G, N>
where
    G: CampaignReader + CampaignWriter,
    N: Notifier,
{
    pub fn new(gateway: G, notifier: N) -> Self {
        Self {
            gateway,
            notifier,
            campaign_id: None,
            draft: CampaignDraft::default(),
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    /// The identifier being edited, absent for a new campaign.
    pub fn campaign_id(&self) -> Option<CampaignId> {
        self.campaign_id
    }

    /// Activates the page.
    ///
    /// Without an id this is a synchronous transition to `Ready` with the
    /// default draft. With an id the existing campaign is fetched to
    /// pre-populate the draft; a fetch failure is terminal (`LoadFailed`).
    /// Only valid from `Idle`; repeated calls are ignored.
    pub async fn load(&mut self, id: Option<CampaignId>) {
        if self.state != FormState::Idle {
            return;
        }
        let Some(id) = id else {
            self.draft = CampaignDraft::default();
            self.state = FormState::Ready;
            return;
        };
        self.campaign_id = Some(id);
        self.state = FormState::Fetching;
        match self.gateway.get_campaign_by_id(id).await {
            Ok(campaign) => {
                self.draft = campaign.into();
                self.state = FormState::Ready;
            }
            Err(e) => {
                log::error!("Failed to load campaign {id}: {e}");
                self.state = FormState::LoadFailed(e);
            }
        }
    }

    /// Edits one draft field. Ignored unless the form is `Ready`.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        if self.state == FormState::Ready {
            self.draft.set(field, value);
        }
    }

    /// Validates the current draft without submitting it.
    pub fn validate(&self) -> Result<NewCampaign, CampaignFormError> {
        self.draft.validate()
    }

    /// Validates and submits the draft.
    ///
    /// Returns `true` once the campaign is saved, signalling the caller to
    /// navigate to the collection view. A validation failure never reaches
    /// the gateway; a save failure returns the form to `Ready` with the
    /// draft intact so the user can retry. Requiring `Ready` on entry also
    /// rejects duplicate submits while one is already in flight.
    pub async fn submit(&mut self) -> bool {
        if self.state != FormState::Ready {
            return false;
        }
        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return false;
            }
        };
        self.state = FormState::Submitting;
        let result = match self.campaign_id {
            Some(id) => self.gateway.update_campaign(id, &payload).await,
            None => self.gateway.create_campaign(&payload).await,
        };
        match result {
            Ok(_) => {
                self.state = FormState::Saved;
                self.notifier.success("Campaign saved successfully!");
                true
            }
            Err(e) => {
                log::error!("Failed to save campaign: {e}");
                self.state = FormState::Ready;
                self.notifier.error("Failed to save campaign.");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test::{RecordingNotifier, sample_campaign};
    use crate::domain::types::{CampaignStatus, Platform};
    use crate::gateway::test::TestGateway;

    fn controller(
        gateway: &TestGateway,
    ) -> CampaignFormController<TestGateway, RecordingNotifier> {
        CampaignFormController::new(gateway.clone(), RecordingNotifier::default())
    }

    #[tokio::test]
    async fn load_without_id_is_synchronously_ready_with_defaults() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let mut form = controller(&gateway);
        form.load(None).await;
        assert_eq!(*form.state(), FormState::Ready);
        assert_eq!(form.draft().platform, Platform::Instagram);
        assert_eq!(form.draft().status, CampaignStatus::Active);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn load_with_id_prepopulates_the_draft() {
        let gateway = TestGateway::new(vec![sample_campaign(3, "Existing")], None, vec![]);
        let mut form = controller(&gateway);
        form.load(Some(sample_campaign(3, "Existing").id)).await;
        assert_eq!(*form.state(), FormState::Ready);
        assert_eq!(form.draft().title, "Existing");
        assert_eq!(gateway.calls(), vec!["GET /api/campaigns/3/"]);
    }

    #[tokio::test]
    async fn failed_load_is_terminal() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let mut form = controller(&gateway);
        form.load(Some(sample_campaign(9, "x").id)).await;
        assert!(matches!(form.state(), FormState::LoadFailed(_)));
        // editing and submitting are both dead ends now
        form.set_field(DraftField::Title, "Launch");
        assert!(form.draft().title.is_empty());
        assert!(!form.submit().await);
    }

    #[tokio::test]
    async fn unconfigured_gateway_fails_load_with_config_error() {
        let gateway = TestGateway::unconfigured();
        let mut form = controller(&gateway);
        form.load(Some(crate::domain::types::CampaignId::new(1).unwrap()))
            .await;
        assert_eq!(
            *form.state(),
            FormState::LoadFailed(crate::gateway::GatewayError::Config)
        );
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn create_flow_posts_and_reaches_saved() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let mut form = controller(&gateway);
        form.load(None).await;
        form.set_field(DraftField::Title, "Launch");
        form.set_field(DraftField::Budget, "500");
        form.set_field(DraftField::StartDate, "2024-01-01");
        form.set_field(DraftField::EndDate, "2024-01-31");
        assert!(form.validate().is_ok());
        assert!(form.submit().await);
        assert_eq!(*form.state(), FormState::Saved);
        assert_eq!(gateway.calls(), vec!["POST /api/campaigns/"]);
        assert_eq!(gateway.campaigns().len(), 1);
    }

    #[tokio::test]
    async fn editing_issues_an_update_never_a_create() {
        let existing = sample_campaign(5, "Before");
        let gateway = TestGateway::new(vec![existing.clone()], None, vec![]);
        let mut form = controller(&gateway);
        form.load(Some(existing.id)).await;
        form.set_field(DraftField::Title, "After");
        assert!(form.submit().await);
        assert_eq!(
            gateway.calls(),
            vec!["GET /api/campaigns/5/", "PUT /api/campaigns/5/"]
        );
        assert_eq!(gateway.campaigns()[0].title, "After");
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_gateway() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let notifier = RecordingNotifier::default();
        let mut form = CampaignFormController::new(gateway.clone(), notifier.clone());
        form.load(None).await;
        form.set_field(DraftField::Title, "   ");
        assert!(!form.submit().await);
        assert_eq!(*form.state(), FormState::Ready);
        assert!(gateway.calls().is_empty());
        assert_eq!(notifier.messages(), vec!["error: Title is required"]);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft_for_retry() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let notifier = RecordingNotifier::default();
        let mut form = CampaignFormController::new(gateway.clone(), notifier.clone());
        form.load(None).await;
        form.set_field(DraftField::Title, "Launch");
        form.set_field(DraftField::Budget, "500");
        form.set_field(DraftField::StartDate, "2024-01-01");
        form.set_field(DraftField::EndDate, "2024-01-31");

        gateway.fail_with(crate::gateway::GatewayError::Network("timeout".into()));
        assert!(!form.submit().await);
        assert_eq!(*form.state(), FormState::Ready);
        assert_eq!(form.draft().title, "Launch");
        assert_eq!(notifier.messages(), vec!["error: Failed to save campaign."]);

        gateway.recover();
        assert!(form.submit().await);
        assert_eq!(*form.state(), FormState::Saved);
    }

    #[tokio::test]
    async fn duplicate_submit_after_save_is_ignored() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let mut form = controller(&gateway);
        form.load(None).await;
        form.set_field(DraftField::Title, "Launch");
        form.set_field(DraftField::Budget, "500");
        form.set_field(DraftField::StartDate, "2024-01-01");
        form.set_field(DraftField::EndDate, "2024-01-31");
        assert!(form.submit().await);
        assert!(!form.submit().await);
        assert_eq!(gateway.campaigns().len(), 1);
    }
}
