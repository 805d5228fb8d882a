//! Editable campaign draft and its validation.
//!
//! The draft holds field values exactly as the user entered them (budget and
//! dates as raw text); [`CampaignDraft::validate`] turns a draft into a typed
//! [`NewCampaign`] payload or reports the first violated rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::types::{Budget, CampaignStatus, CampaignTitle, Platform};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failure for a campaign draft.
///
/// Validation short-circuits: only the first violated rule is reported, in
/// the order title, budget, dates present, date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CampaignFormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Budget must be a number greater than zero")]
    InvalidBudget,
    #[error("Start and end dates are required")]
    MissingDates,
    #[error("End date cannot be before start date")]
    EndBeforeStart,
}

/// Field selector for [`CampaignDraft::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Platform,
    Budget,
    Status,
    StartDate,
    EndDate,
}

/// A client-local, unsaved campaign being created or edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignDraft {
    pub title: String,
    pub platform: Platform,
    pub budget: String,
    pub status: CampaignStatus,
    pub start_date: String,
    pub end_date: String,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            platform: Platform::Instagram,
            budget: String::new(),
            status: CampaignStatus::Active,
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

impl From<Campaign> for CampaignDraft {
    /// Pre-populates a draft from a fetched campaign for editing.
    fn from(campaign: Campaign) -> Self {
        Self {
            title: campaign.title.into_inner(),
            platform: campaign.platform,
            budget: campaign.budget.get().to_string(),
            status: campaign.status,
            start_date: campaign.start_date.format(DATE_FORMAT).to_string(),
            end_date: campaign.end_date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl CampaignDraft {
    /// Mutates a single field by name with a raw input value.
    ///
    /// Enum-valued fields keep their previous value when the input does not
    /// name a known variant (the select-input contract: only known options
    /// can be picked, anything else is noise).
    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Title => self.title = value.to_string(),
            DraftField::Budget => self.budget = value.to_string(),
            DraftField::StartDate => self.start_date = value.to_string(),
            DraftField::EndDate => self.end_date = value.to_string(),
            DraftField::Platform => match Platform::try_from(value) {
                Ok(platform) => self.platform = platform,
                Err(e) => log::warn!("Ignoring draft field update: {e}"),
            },
            DraftField::Status => match CampaignStatus::try_from(value) {
                Ok(status) => self.status = status,
                Err(e) => log::warn!("Ignoring draft field update: {e}"),
            },
        }
    }

    /// Validates the draft and builds the submission payload.
    ///
    /// Rules are checked in order and the first failure is returned; callers
    /// must not attempt submission past it.
    pub fn validate(&self) -> Result<NewCampaign, CampaignFormError> {
        let title =
            CampaignTitle::new(self.title.as_str()).map_err(|_| CampaignFormError::EmptyTitle)?;

        let budget = self
            .budget
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|value| Budget::new(value).ok())
            .ok_or(CampaignFormError::InvalidBudget)?;

        let start_date = parse_date(&self.start_date).ok_or(CampaignFormError::MissingDates)?;
        let end_date = parse_date(&self.end_date).ok_or(CampaignFormError::MissingDates)?;

        if end_date < start_date {
            return Err(CampaignFormError::EndBeforeStart);
        }

        Ok(NewCampaign {
            title,
            platform: self.platform,
            budget,
            status: self.status,
            start_date,
            end_date,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
