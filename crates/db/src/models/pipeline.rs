//! The investor document: selected criteria plus the screening pipeline.
//!
//! Both lists are owned by exactly one investor and are persisted together
//! with a `version` counter. Writers must go through
//! [`Store::save_investor`](crate::Store::save_investor), which only succeeds
//! when the stored version still matches the one that was loaded.

use foundernest_core::answer::ANSWER_UNANSWERED;
use foundernest_core::phase::Phase;
use foundernest_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::models::company::CompanySnapshot;
use crate::models::criterion::Criterion;

/// An investor's adopted copy of a catalog criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCriterion {
    pub text: String,
    pub key: String,
    pub icon: String,
    /// Free-form importance tag chosen at selection time (e.g. `"MUST"`).
    #[serde(rename = "type")]
    pub criterion_type: String,
}

impl SelectedCriterion {
    pub fn from_criterion(criterion: &Criterion, criterion_type: &str) -> Self {
        Self {
            text: criterion.text.clone(),
            key: criterion.key.clone(),
            icon: criterion.icon.clone(),
            criterion_type: criterion_type.to_string(),
        }
    }
}

/// One investor's answer for one criterion against one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub key: String,
    #[serde(rename = "type")]
    pub criterion_type: String,
    pub answer: String,
}

impl Answer {
    /// A fresh `"?"` slot for a selected criterion.
    pub fn unanswered(criterion: &SelectedCriterion) -> Self {
        Self {
            text: criterion.text.clone(),
            key: criterion.key.clone(),
            criterion_type: criterion.criterion_type.clone(),
            answer: ANSWER_UNANSWERED.to_string(),
        }
    }
}

/// One tracked company in an investor's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEntry {
    pub company: CompanySnapshot,
    pub status: String,
    pub key: String,
    pub answers: Vec<Answer>,
}

impl PipelineEntry {
    /// A `WAITING` entry with one unanswered slot per selected criterion.
    pub fn waiting(company: CompanySnapshot, criteria: &[SelectedCriterion]) -> Self {
        let phase = Phase::waiting();
        Self {
            company,
            status: phase.status,
            key: phase.key,
            answers: criteria.iter().map(Answer::unanswered).collect(),
        }
    }

    pub fn set_phase(&mut self, phase: &Phase) {
        self.key = phase.key.clone();
        self.status = phase.status.clone();
    }
}

/// The mutable part of a user record, as loaded for a read-modify-write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorDocument {
    pub id: DbId,
    pub criteria: Vec<SelectedCriterion>,
    pub pipeline: Vec<PipelineEntry>,
    /// Version observed at load time.
    pub version: i64,
}

impl InvestorDocument {
    pub fn entry(&self, company_id: DbId) -> Option<&PipelineEntry> {
        self.pipeline.iter().find(|e| e.company.id == company_id)
    }

    pub fn entry_mut(&mut self, company_id: DbId) -> Option<&mut PipelineEntry> {
        self.pipeline.iter_mut().find(|e| e.company.id == company_id)
    }

    pub fn has_criterion(&self, key: &str) -> bool {
        self.criteria.iter().any(|c| c.key == key)
    }
}
