use crate::infra::{parse_date, parse_mode, Stores};
use chrono::{Local, NaiveDate};
use civic_id::config::AppConfig;
use civic_id::documents::{
    ActionState, DocumentCard, DocumentId, DocumentWalletService, StatusPolicy, ViewMode,
};
use civic_id::error::AppError;
use civic_id::records::{
    AdminAccount, AuditLogEntry, Complaint, ComplaintStatus, ListingParams, ListingService,
    ListingSettings, RecordId, Searchable, ServiceApplication,
};
use civic_id::repository::{InMemoryRepository, Keyed, Repository};
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct WalletArgs {
    /// Holder whose documents are listed
    #[arg(long, default_value = "citizen-001")]
    pub(crate) holder: String,
    /// View mode: service, readonly or print
    #[arg(long, value_parser = parse_mode, default_value = "service")]
    pub(crate) mode: ViewMode,
    /// Reference date for expiry calculations (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AdminEntity {
    Complaints,
    Applications,
    Accounts,
    Logs,
}

#[derive(Args, Debug)]
pub(crate) struct AdminArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub(crate) entity: AdminEntity,
    /// Case-insensitive free-text search
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Status label to match, or "all"
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Category, kind, role or log category label, or "all"
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Submitter, applicant or actor id
    #[arg(long)]
    pub(crate) owner: Option<String>,
    #[arg(long)]
    pub(crate) page: Option<usize>,
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
}

impl AdminArgs {
    fn listing_params(&self) -> ListingParams {
        ListingParams {
            search: self.search.clone(),
            status: self.status.clone(),
            category: self.category.clone(),
            owner: self.owner.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for expiry calculations (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the admin listing portion of the demo
    #[arg(long)]
    pub(crate) skip_admin: bool,
}

pub(crate) fn run_wallet(args: WalletArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let stores = Stores::load(config.seed_dir.as_deref())?;
    let service = DocumentWalletService::new(
        stores.documents,
        StatusPolicy::new(config.wallet.expiring_soon_days),
        ListingSettings::from(&config.listing),
    );
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let cards = service.cards(Some(&args.holder), args.mode, today)?;
    println!(
        "Wallet for {} ({} mode, as of {})",
        args.holder,
        args.mode.label(),
        today
    );
    if cards.is_empty() {
        println!("No documents on file");
    }
    for card in &cards {
        render_card(card);
    }
    Ok(())
}

pub(crate) fn run_admin(args: AdminArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let stores = Stores::load(config.seed_dir.as_deref())?;
    let settings = ListingSettings::from(&config.listing);
    let params = args.listing_params();

    match args.entity {
        AdminEntity::Complaints => print_listing(stores.complaints, settings, &params),
        AdminEntity::Applications => print_listing(stores.applications, settings, &params),
        AdminEntity::Accounts => print_listing(stores.accounts, settings, &params),
        AdminEntity::Logs => print_listing(stores.logs, settings, &params),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let stores = Stores::load(None)?;
    let service = DocumentWalletService::new(
        stores.documents,
        StatusPolicy::default(),
        ListingSettings::default(),
    );

    println!("Civic ID demo (as of {today})");
    println!("\nDocument wallet for citizen-001");
    for card in service.cards(Some("citizen-001"), ViewMode::Service, today)? {
        render_card(&card);
    }

    println!("\nStatus summary");
    for (status, count) in service.summary(Some("citizen-001"), today)? {
        println!("  {:<10} {}", status.badge_text(), count);
    }

    println!("\nRead-only mode: attempting to delete doc-001");
    match service.delete(&DocumentId("doc-001".to_string()), ViewMode::Readonly) {
        Ok(_) => println!("  Deleted (unexpected in read-only mode)"),
        Err(err) => println!("  Dialog: {err}"),
    }

    println!("\nService mode: renewing the expired driver's license doc-003");
    match service.renew(&DocumentId("doc-003".to_string()), ViewMode::Service, today) {
        Ok(card) => println!(
            "  Renewed: now {} until {}",
            card.derived.badge_text, card.expiry_date
        ),
        Err(err) => println!("  Renewal unavailable: {err}"),
    }

    if args.skip_admin {
        return Ok(());
    }

    println!("\nAdmin complaints awaiting review");
    let complaints = ListingService::new(stores.complaints, ListingSettings::default());
    print_listing_page(
        &complaints,
        &ListingParams {
            status: Some("in_review".to_string()),
            ..ListingParams::default()
        },
    )?;

    let target = RecordId("cmp-001".to_string());
    println!("\nMoving cmp-001 into review");
    match complaints.transition_status(&target, ComplaintStatus::InReview) {
        Ok(record) => println!("  cmp-001 is now {}", wire_label(&record.status)),
        Err(err) => println!("  Rejected: {err}"),
    }
    println!("Attempting to resolve cmp-004 without review");
    match complaints.transition_status(&RecordId("cmp-004".to_string()), ComplaintStatus::Resolved)
    {
        Ok(record) => println!("  cmp-004 is now {}", wire_label(&record.status)),
        Err(err) => println!("  Rejected: {err}"),
    }

    Ok(())
}

fn render_card(card: &DocumentCard) {
    let days = card
        .derived
        .days_until_expiry
        .map(|days| format!(" ({days} days)"))
        .unwrap_or_default();
    println!(
        "- {} [{}] {} | expires {}{}",
        card.type_label, card.derived.badge_text, card.id, card.expiry_date, days
    );

    let actions: Vec<String> = card
        .actions
        .iter()
        .map(|view| match view.state {
            ActionState::Enabled => view.action.label().to_string(),
            ActionState::Disabled => format!("{} (disabled)", view.action.label()),
            ActionState::Rejected { .. } => format!("{} (read-only)", view.action.label()),
        })
        .collect();
    println!("    actions: {}", actions.join(", "));

    for detail in &card.details {
        println!("    {}: {}", detail.label, detail.value);
    }
}

/// One-line rendering for admin listing output.
trait AdminLine {
    fn line(&self) -> String;
}

impl AdminLine for Complaint {
    fn line(&self) -> String {
        format!(
            "{} [{}] {} ({}, by {})",
            self.id.0,
            wire_label(&self.status),
            self.title,
            wire_label(&self.category),
            self.submitter_name
        )
    }
}

impl AdminLine for ServiceApplication {
    fn line(&self) -> String {
        format!(
            "{} [{}] {} {} for {}",
            self.id.0,
            wire_label(&self.status),
            self.reference_number,
            wire_label(&self.kind),
            self.applicant_name
        )
    }
}

impl AdminLine for AdminAccount {
    fn line(&self) -> String {
        format!(
            "{} [{}] {} <{}> {} / {}",
            self.id.0,
            wire_label(&self.status),
            self.full_name,
            self.email,
            wire_label(&self.role),
            self.department
        )
    }
}

impl AdminLine for AuditLogEntry {
    fn line(&self) -> String {
        format!(
            "{} [{}] {} {}: {} -> {}",
            self.id.0,
            wire_label(&self.severity),
            self.recorded_at.format("%Y-%m-%d %H:%M"),
            self.actor_name,
            self.action,
            self.target
        )
    }
}

fn print_listing<T>(
    repository: Arc<InMemoryRepository<T>>,
    settings: ListingSettings,
    params: &ListingParams,
) -> Result<(), AppError>
where
    T: AdminLine + Searchable + Keyed + Clone + Send + Sync + 'static,
    T::Status: Serialize + DeserializeOwned,
    T::Category: DeserializeOwned,
{
    let service = ListingService::new(repository, settings);
    print_listing_page(&service, params)
}

fn print_listing_page<T, R>(
    service: &ListingService<T, R>,
    params: &ListingParams,
) -> Result<(), AppError>
where
    T: AdminLine + Searchable + Keyed + Clone + Send + Sync + 'static,
    T::Status: Serialize + DeserializeOwned,
    T::Category: DeserializeOwned,
    R: Repository<T> + 'static,
{
    let query = params.record_query::<T::Status, T::Category>()?;
    let listing = service.list(&query, params.page_request())?;

    let tiles: Vec<String> = listing
        .status_counts
        .iter()
        .map(|(status, count)| format!("{} {}", wire_label(status), count))
        .collect();
    println!("  totals: {}", tiles.join(" | "));

    if listing.items.is_empty() {
        println!("  No matching records");
        return Ok(());
    }
    println!(
        "  page {} of {} ({} matching, {} per page)",
        listing.page, listing.total_pages, listing.total_items, listing.page_size
    );
    for item in &listing.items {
        println!("  - {}", item.line());
    }
    Ok(())
}

fn wire_label<S: Serialize>(value: &S) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::from("?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_id::records::{AdminRole, ApplicationKind, LogSeverity};

    #[test]
    fn wire_label_uses_snake_case_names() {
        assert_eq!(wire_label(&ComplaintStatus::InReview), "in_review");
        assert_eq!(wire_label(&AdminRole::SuperAdmin), "super_admin");
        assert_eq!(wire_label(&ApplicationKind::VoterRegistration), "voter_registration");
        assert_eq!(wire_label(&LogSeverity::Critical), "critical");
    }

    #[test]
    fn admin_args_translate_to_listing_params() {
        let args = AdminArgs {
            entity: AdminEntity::Complaints,
            search: Some("road".to_string()),
            status: Some("pending".to_string()),
            category: None,
            owner: None,
            page: Some(2),
            page_size: Some(5),
        };

        let params = args.listing_params();
        let query = params
            .record_query::<ComplaintStatus, civic_id::records::ComplaintCategory>()
            .expect("labels parse");
        assert_eq!(query.search_term, "road");
        assert!(query.category.is_all());
        assert_eq!(params.page_request().page, Some(2));
    }

    #[test]
    fn demo_runs_against_fixtures() {
        let args = DemoArgs {
            today: NaiveDate::from_ymd_opt(2024, 12, 15),
            skip_admin: false,
        };

        run_demo(args).expect("demo completes");
    }

    #[test]
    fn listing_surfaces_invalid_filters() {
        let stores = Stores::load(None).expect("fixtures load");
        let params = ListingParams {
            status: Some("escalated".to_string()),
            ..ListingParams::default()
        };

        let result = print_listing(stores.complaints, ListingSettings::default(), &params);
        assert!(matches!(result, Err(AppError::Filter(_))));
    }
}
