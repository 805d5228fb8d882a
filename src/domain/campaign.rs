use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Budget, CampaignId, CampaignStatus, CampaignTitle, Platform};

/// A persisted marketing campaign as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: CampaignTitle,
    pub platform: Platform,
    pub budget: Budget,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Payload for creating or updating a [`Campaign`].
///
/// Produced only by [`crate::forms::campaigns::CampaignDraft::validate`],
/// so a value of this type always satisfies the field constraints including
/// `end_date >= start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCampaign {
    pub title: CampaignTitle,
    pub platform: Platform,
    pub budget: Budget,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
