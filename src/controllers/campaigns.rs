//! Controller for the campaign collection page.

use crate::controllers::{ConfirmPrompt, Notifier};
use crate::domain::campaign::Campaign;
use crate::domain::types::CampaignId;
use crate::gateway::{CampaignReader, CampaignWriter, GatewayError, GatewayResult};

/// View-state of the collection page.
///
/// `LoadFailed` holds no partial list; the page shows the error instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    /// Campaigns in the order the service returned them, never re-sorted.
    Loaded(Vec<Campaign>),
    LoadFailed(GatewayError),
}

/// Owns the fetched campaign list and reconciles deletions against it.
pub struct CampaignListController<G, C, N> {
    gateway: G,
    confirm: C,
    notifier: N,
    state: ListState,
    latest_refresh: u64,
}

impl<G, C, N> CampaignListController<G, C, N>
where
    G: CampaignReader + CampaignWriter,
    C: ConfirmPrompt,
    N: Notifier,
{
    pub fn new(gateway: G, confirm: C, notifier: N) -> Self {
        Self {
            gateway,
            confirm,
            notifier,
            state: ListState::Loading,
            latest_refresh: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// The loaded campaigns, empty unless the list is `Loaded`.
    pub fn campaigns(&self) -> &[Campaign] {
        match &self.state {
            ListState::Loaded(campaigns) => campaigns,
            _ => &[],
        }
    }

    /// True when the list loaded successfully but holds no campaigns.
    pub fn is_empty(&self) -> bool {
        matches!(&self.state, ListState::Loaded(campaigns) if campaigns.is_empty())
    }

    /// Fetches the full collection, replacing the held list wholesale.
    ///
    /// Each call is tagged with a sequence number; a response belonging to a
    /// superseded request is discarded so the state always reflects the most
    /// recently issued refresh rather than the last one to arrive.
    pub async fn refresh(&mut self) {
        let issued = self.begin_refresh();
        let result = self.gateway.list_campaigns().await;
        self.apply_refresh(issued, result);
    }

    /// Issues a new refresh tag, superseding any outstanding request.
    fn begin_refresh(&mut self) -> u64 {
        self.latest_refresh += 1;
        self.latest_refresh
    }

    /// Applies a refresh response unless a newer request was issued since.
    fn apply_refresh(&mut self, issued: u64, result: GatewayResult<Vec<Campaign>>) {
        if issued != self.latest_refresh {
            return; // a newer refresh owns the state now
        }
        match result {
            Ok(campaigns) => self.state = ListState::Loaded(campaigns),
            Err(e) => {
                log::error!("Failed to load campaigns: {e}");
                self.state = ListState::LoadFailed(e);
            }
        }
    }

    /// Deletes one campaign after user confirmation.
    ///
    /// The local entry is removed only once the server acknowledges the
    /// DELETE; on failure the list is left exactly as it was and the user is
    /// notified, with the item still visible.
    pub async fn remove(&mut self, id: CampaignId) {
        if !matches!(self.state, ListState::Loaded(_)) {
            return;
        }
        if !self
            .confirm
            .confirm("Are you sure you want to delete this campaign?")
            .await
        {
            return;
        }
        match self.gateway.delete_campaign(id).await {
            Ok(()) => {
                if let ListState::Loaded(campaigns) = &mut self.state {
                    campaigns.retain(|c| c.id != id);
                }
                self.notifier.success("Campaign deleted!");
            }
            Err(e) => {
                log::error!("Failed to delete campaign {id}: {e}");
                self.notifier.error("Failed to delete campaign.");
            }
        }
    }
}
