use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use super::actions::{permitted_actions, ActionState, ActionView, DocumentAction};
use super::display::{render_details, validity_years, DetailView};
use super::domain::{
    DocumentId, DocumentRecord, DocumentStatus, DocumentType, ExpiryDate, ViewMode,
};
use super::status::{DerivedStatus, DisplayStatus, StatusPolicy};
use crate::records::{
    assemble, count_by_status, FieldFilter, Listing, ListingSettings, PageRequest, RecordQuery,
    Searchable,
};
use crate::repository::{Repository, RepositoryError};

/// Render-ready projection of a document for one view mode and reference date.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentCard {
    pub id: DocumentId,
    pub holder_id: String,
    pub doc_type: DocumentType,
    pub type_label: String,
    pub issue_date: NaiveDate,
    pub expiry_date: ExpiryDate,
    pub status: DocumentStatus,
    #[serde(flatten)]
    pub derived: DerivedStatus,
    pub view_mode: ViewMode,
    pub actions: Vec<ActionView>,
    pub details: Vec<DetailView>,
}

impl DocumentCard {
    pub fn build(
        record: &DocumentRecord,
        policy: &StatusPolicy,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Self {
        DocumentCard {
            id: record.id.clone(),
            holder_id: record.holder_id.clone(),
            doc_type: record.doc_type.clone(),
            type_label: record.doc_type.label().to_string(),
            issue_date: record.issue_date,
            expiry_date: record.expiry_date.clone(),
            status: record.status,
            derived: policy.derive(record, today),
            view_mode: mode,
            actions: permitted_actions(record, mode).views(),
            details: render_details(&record.doc_type, &record.details, mode),
        }
    }

    pub fn action_state(&self, action: DocumentAction) -> Option<ActionState> {
        self.actions
            .iter()
            .find(|view| view.action == action)
            .map(|view| view.state)
    }
}

impl Searchable for DocumentCard {
    type Status = DisplayStatus;
    type Category = DocumentType;

    fn search_fields(&self) -> Vec<&str> {
        std::iter::once(self.type_label.as_str())
            .chain(
                self.details
                    .iter()
                    .filter(|detail| !detail.sensitive)
                    .map(|detail| detail.value.as_str()),
            )
            .collect()
    }

    fn status(&self) -> DisplayStatus {
        self.derived.display_status
    }

    fn category(&self) -> DocumentType {
        self.doc_type.clone()
    }

    fn owner_id(&self) -> Option<&str> {
        Some(self.holder_id.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("document {0} not found")]
    NotFound(DocumentId),
    #[error("{dialog}")]
    ActionRejected {
        action: DocumentAction,
        dialog: &'static str,
    },
    #[error("{} is disabled for this document in {} mode", .action.label(), .mode.label())]
    ActionDisabled {
        action: DocumentAction,
        mode: ViewMode,
    },
    #[error(
        "{} is not available for a {} document in {} mode",
        .action.label(),
        .status.label(),
        .mode.label()
    )]
    ActionUnavailable {
        action: DocumentAction,
        status: DocumentStatus,
        mode: ViewMode,
    },
    #[error("renewed expiry for document {0} is out of range")]
    RenewalOutOfRange(DocumentId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Wallet operations over a document repository. Every derived value is computed on
/// read; only renewal and deletion mutate stored records.
pub struct DocumentWalletService<R> {
    repository: Arc<R>,
    policy: StatusPolicy,
    listing: ListingSettings,
}

impl<R> DocumentWalletService<R>
where
    R: Repository<DocumentRecord> + 'static,
{
    pub fn new(repository: Arc<R>, policy: StatusPolicy, listing: ListingSettings) -> Self {
        Self {
            repository,
            policy,
            listing,
        }
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    /// Cards in repository order, optionally restricted to one holder.
    pub fn cards(
        &self,
        holder: Option<&str>,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<Vec<DocumentCard>, WalletError> {
        let cards = self
            .repository
            .all()?
            .iter()
            .filter(|record| holder.map_or(true, |holder| record.holder_id == holder))
            .map(|record| DocumentCard::build(record, &self.policy, mode, today))
            .collect();
        Ok(cards)
    }

    /// One page of a wallet. Status tiles count only the holder named by the owner
    /// filter.
    pub fn list(
        &self,
        query: &RecordQuery<DisplayStatus, DocumentType>,
        request: PageRequest,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<Listing<DocumentCard, DisplayStatus>, WalletError> {
        let holder = match &query.owner_id {
            FieldFilter::Only(holder) => Some(holder.as_str()),
            FieldFilter::All => None,
        };
        let cards = self.cards(holder, mode, today)?;
        Ok(assemble(&cards, query, request, &self.listing))
    }

    pub fn summary(
        &self,
        holder: Option<&str>,
        today: NaiveDate,
    ) -> Result<BTreeMap<DisplayStatus, usize>, WalletError> {
        let cards = self.cards(holder, ViewMode::Readonly, today)?;
        Ok(count_by_status(&cards))
    }

    pub fn card(
        &self,
        id: &DocumentId,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<DocumentCard, WalletError> {
        let record = self.fetch(id)?;
        Ok(DocumentCard::build(&record, &self.policy, mode, today))
    }

    /// Open a document for inspection, honoring a disabled view control.
    pub fn view(
        &self,
        id: &DocumentId,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<DocumentCard, WalletError> {
        let record = self.authorize(id, DocumentAction::View, mode)?;
        Ok(DocumentCard::build(&record, &self.policy, mode, today))
    }

    pub fn print(
        &self,
        id: &DocumentId,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<DocumentCard, WalletError> {
        let record = self.authorize(id, DocumentAction::Print, mode)?;
        debug!(document_id = %id, "document released for printing");
        Ok(DocumentCard::build(&record, &self.policy, ViewMode::Print, today))
    }

    /// Reactivate an expired document with fresh dates from the type's validity period.
    pub fn renew(
        &self,
        id: &DocumentId,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<DocumentCard, WalletError> {
        let record = self
            .repository
            .modify::<WalletError, _>(id, |record| {
                check_action(record, DocumentAction::Renew, mode)?;

                let expiry_date = match validity_years(&record.doc_type) {
                    Some(years) => today
                        .checked_add_months(Months::new(years * 12))
                        .map(ExpiryDate::On)
                        .ok_or_else(|| WalletError::RenewalOutOfRange(id.clone()))?,
                    None => ExpiryDate::Permanent,
                };

                record.status = DocumentStatus::Active;
                record.issue_date = today;
                record.expiry_date = expiry_date;
                Ok(())
            })
            .map_err(|err| match err {
                WalletError::Repository(RepositoryError::NotFound) => {
                    WalletError::NotFound(id.clone())
                }
                other => other,
            })?;

        info!(
            document_id = %id,
            expiry_date = %record.expiry_date,
            "document renewed"
        );
        Ok(DocumentCard::build(&record, &self.policy, mode, today))
    }

    pub fn delete(&self, id: &DocumentId, mode: ViewMode) -> Result<DocumentRecord, WalletError> {
        self.authorize(id, DocumentAction::Delete, mode)?;
        let removed = self.repository.remove(id).map_err(|err| match err {
            RepositoryError::NotFound => WalletError::NotFound(id.clone()),
            other => WalletError::Repository(other),
        })?;
        info!(document_id = %id, "document removed from wallet");
        Ok(removed)
    }

    fn fetch(&self, id: &DocumentId) -> Result<DocumentRecord, WalletError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| WalletError::NotFound(id.clone()))
    }

    fn authorize(
        &self,
        id: &DocumentId,
        action: DocumentAction,
        mode: ViewMode,
    ) -> Result<DocumentRecord, WalletError> {
        let record = self.fetch(id)?;
        check_action(&record, action, mode)?;
        Ok(record)
    }
}

fn check_action(
    record: &DocumentRecord,
    action: DocumentAction,
    mode: ViewMode,
) -> Result<(), WalletError> {
    match permitted_actions(record, mode).state(action) {
        Some(ActionState::Enabled) => Ok(()),
        Some(ActionState::Disabled) => Err(WalletError::ActionDisabled { action, mode }),
        Some(ActionState::Rejected { dialog }) => {
            Err(WalletError::ActionRejected { action, dialog })
        }
        None => Err(WalletError::ActionUnavailable {
            action,
            status: record.effective_status(),
            mode,
        }),
    }
}
