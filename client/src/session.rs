//! Application session: the composition root handed to the form
//!
//! Owns the current configuration, the signed-in staff id and the
//! in-flight flag. The form holds one session and passes it where needed
//! instead of reaching for globals.

use anyhow::Context;
use chrono::Utc;
use shared::{
    authenticate, require_location, AppConfig, CountSheet, Session, Staff, StocktakePayload,
    Submission, SubmissionKind, TransferPayload, ValidationError, Variance,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::external::{self, ScriptTransport};
use crate::services::{ConfigLoader, SubmissionService};

/// What happened to a submit press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(SubmissionKind),
    /// Sent but not accepted; the form offers a retry
    Failed,
    /// Stopped on the device, nothing sent
    Blocked(ValidationError),
    /// Another submission has not finished yet
    Busy,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }

    pub fn notice(&self) -> String {
        match self {
            SubmitOutcome::Saved(SubmissionKind::Stocktake) => "Stocktake Saved Successfully!".to_string(),
            SubmitOutcome::Saved(SubmissionKind::Transfer) => "Transfer Recorded Successfully!".to_string(),
            SubmitOutcome::Failed => "Failed to save. Check connection.".to_string(),
            SubmitOutcome::Blocked(reason) => reason.to_string(),
            SubmitOutcome::Busy => "Still saving the previous submission.".to_string(),
        }
    }
}

/// Clears the in-flight flag when the request resolves
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AppSession {
    settings: Config,
    loader: ConfigLoader,
    submissions: SubmissionService,
    config: RwLock<Arc<AppConfig>>,
    /// Resolved against the current roster on every read
    signed_in: RwLock<Option<String>>,
    in_flight: AtomicBool,
}

impl AppSession {
    /// Load settings, pick a transport and fetch the event configuration
    pub async fn bootstrap() -> anyhow::Result<Self> {
        let settings = Config::load().context("Failed to load client settings")?;
        tracing::info!("Starting stock form session ({})", settings.environment);

        let transport = external::connect(&settings).context("Failed to build script transport")?;
        Ok(Self::start(settings, transport).await)
    }

    /// Build a session and load the configuration once
    pub async fn start(settings: Config, transport: Arc<dyn ScriptTransport>) -> Self {
        let session = Self::with_transport(settings, transport);
        session.refresh_config().await;
        session
    }

    /// Build a session on the built-in configuration without fetching
    pub fn with_transport(settings: Config, transport: Arc<dyn ScriptTransport>) -> Self {
        let mapper = settings.submission.mapper();
        Self {
            loader: ConfigLoader::new(transport.clone()),
            submissions: SubmissionService::new(transport, mapper),
            settings,
            config: RwLock::new(Arc::new(shared::fallback_config())),
            signed_in: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replace the configuration wholesale with a fresh load
    pub async fn refresh_config(&self) {
        let loaded = Arc::new(self.loader.load().await);
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = loaded;
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<AppConfig> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ========================================================================
    // Staff
    // ========================================================================

    pub fn sign_in(&self, staff_id: &str, pin: Option<&str>) -> Result<Staff, ValidationError> {
        let config = self.config();
        let staff = authenticate(&config, staff_id, pin)?.clone();
        tracing::info!("{} signed in", staff.name);

        *self.signed_in.write().unwrap_or_else(PoisonError::into_inner) = Some(staff.id.clone());
        Ok(staff)
    }

    pub fn sign_out(&self) {
        if let Some(id) = self
            .signed_in
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            tracing::info!("Staff {} signed out", id);
        }
    }

    /// The signed-in staff member as the current roster knows them
    pub fn current_staff(&self) -> Option<Staff> {
        let id = self.signed_in_id()?;
        self.config().staff_member(&id).cloned()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    pub async fn submit_stocktake(
        &self,
        location_id: &str,
        session: Session,
        sheet: &CountSheet,
    ) -> SubmitOutcome {
        let Some(_guard) = self.begin_submission() else {
            return SubmitOutcome::Busy;
        };

        match self.prepare_stocktake(location_id, session, sheet) {
            Ok(submission) => self.transmit(submission).await,
            Err(reason) => Self::blocked(reason),
        }
    }

    pub async fn submit_transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        sheet: &CountSheet,
    ) -> SubmitOutcome {
        let Some(_guard) = self.begin_submission() else {
            return SubmitOutcome::Busy;
        };

        match self.prepare_transfer(source_id, destination_id, sheet) {
            Ok(submission) => self.transmit(submission).await,
            Err(reason) => Self::blocked(reason),
        }
    }

    /// Differences between a count and the opening snapshot for that location
    pub fn opening_variances(
        &self,
        location_id: &str,
        sheet: &CountSheet,
    ) -> Result<Vec<Variance>, ValidationError> {
        let config = self.config();
        let location = require_location(&config, location_id, "stocktake")?;
        Ok(config
            .opening_snapshot
            .as_ref()
            .map(|snapshot| snapshot.variances(&location.name, &sheet.entries()))
            .unwrap_or_default())
    }

    fn prepare_stocktake(
        &self,
        location_id: &str,
        session: Session,
        sheet: &CountSheet,
    ) -> Result<Submission, ValidationError> {
        let config = self.config();
        let staff = self.resolve_staff(&config)?;
        let location = require_location(&config, location_id, "stocktake")?;
        StocktakePayload::build(staff, location, session, sheet, Utc::now()).map(Submission::from)
    }

    fn prepare_transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        sheet: &CountSheet,
    ) -> Result<Submission, ValidationError> {
        let config = self.config();
        let staff = self.resolve_staff(&config)?;
        let source = require_location(&config, source_id, "source")?;
        let destination = require_location(&config, destination_id, "destination")?;
        TransferPayload::build(staff, source, destination, sheet, Utc::now()).map(Submission::from)
    }

    fn signed_in_id(&self) -> Option<String> {
        self.signed_in
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A roster refresh may have dropped or renamed the signed-in member
    fn resolve_staff<'a>(&self, config: &'a AppConfig) -> Result<&'a Staff, ValidationError> {
        let id = self.signed_in_id().ok_or(ValidationError::NoStaffSelected)?;
        config
            .staff_member(&id)
            .ok_or(ValidationError::UnknownStaff(id))
    }

    fn begin_submission(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    async fn transmit(&self, submission: Submission) -> SubmitOutcome {
        if self.submissions.submit(&submission).await {
            SubmitOutcome::Saved(submission.kind())
        } else {
            SubmitOutcome::Failed
        }
    }

    fn blocked(reason: ValidationError) -> SubmitOutcome {
        tracing::info!("Submission blocked: {}", reason);
        SubmitOutcome::Blocked(reason)
    }
}
