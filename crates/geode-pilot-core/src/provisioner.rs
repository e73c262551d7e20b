//! Region provisioner
//!
//! Drives the create-region workflow:
//!
//! ```text
//! Idle -> Submitting -> Succeeded (catalog refresh scheduled)
//!                    -> Failed
//! Succeeded | Failed -> Idle   (form dismissed or reopened)
//! ```
//!
//! Names are validated locally, so an empty name never reaches the network.
//! A successful create does not assume the region is listed yet: it marks
//! the name as awaiting propagation and hands back the delay after which the
//! caller should run exactly one catalog refresh. Nothing here retries.
//!
//! Region deletion lives here too, reporting through the same notice sink.

use crate::constants::EMPTY_REGION_NAME_MESSAGE;
use crate::errors::ConsoleError;
use crate::session::Session;
use crate::types::{ProvisionRequest, RegionType};
use crate::view::{DataView, Notice, ProvisionFormView, ProvisionPhase, Renderer};
use geode_rs::{GeodeClient, MutationResponse, Transport};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionState {
    Idle,
    Submitting(ProvisionRequest),
    Succeeded {
        region: String,
        warning: Option<String>,
    },
    Failed(String),
}

#[derive(Debug)]
pub struct RegionProvisioner {
    state: ProvisionState,
    form_open: bool,
    notice: Option<Notice>,
    reconcile_delay: Duration,
}

impl RegionProvisioner {
    pub fn new(reconcile_delay: Duration) -> Self {
        Self {
            state: ProvisionState::Idle,
            form_open: false,
            notice: None,
            reconcile_delay,
        }
    }

    pub fn state(&self) -> &ProvisionState {
        &self.state
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn reconcile_delay(&self) -> Duration {
        self.reconcile_delay
    }

    pub fn open_form(&mut self, renderer: &mut impl Renderer) {
        self.form_open = true;
        self.reset();
        self.render(renderer);
    }

    /// Close the form; a finished create returns to Idle
    pub fn dismiss(&mut self, renderer: &mut impl Renderer) {
        self.form_open = false;
        self.reset();
        self.render(renderer);
    }

    fn reset(&mut self) {
        if matches!(
            self.state,
            ProvisionState::Succeeded { .. } | ProvisionState::Failed(_)
        ) {
            self.state = ProvisionState::Idle;
        }
        if !matches!(self.state, ProvisionState::Submitting(_)) {
            self.notice = None;
        }
    }

    /// Validate the input and enter Submitting
    pub fn begin_create(
        &mut self,
        name: &str,
        region_type: RegionType,
        renderer: &mut impl Renderer,
    ) -> Result<ProvisionRequest, ConsoleError> {
        let name = name.trim();
        let rejected = if name.is_empty() {
            Some(EMPTY_REGION_NAME_MESSAGE)
        } else if matches!(self.state, ProvisionState::Submitting(_)) {
            Some("A region is already being created")
        } else {
            None
        };
        if let Some(message) = rejected {
            self.notice = Some(Notice::error(message));
            self.render(renderer);
            return Err(ConsoleError::Validation(message.to_string()));
        }

        let request = ProvisionRequest {
            region_name: name.to_string(),
            region_type,
        };
        tracing::info!("Creating region '{}' as {}", name, region_type);
        self.state = ProvisionState::Submitting(request.clone());
        self.notice = Some(Notice::info(format!("Creating region \"{}\"...", name)));
        self.render(renderer);
        Ok(request)
    }

    pub async fn submit<T: Transport>(
        client: &GeodeClient<T>,
        request: &ProvisionRequest,
    ) -> Result<MutationResponse, ConsoleError> {
        let resp = client
            .create_region(&request.region_name, request.region_type.as_str())
            .await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ConsoleError::backend(resp.error))
        }
    }

    /// Apply the create result; returns the reconcile delay on success
    pub fn complete(
        &mut self,
        request: ProvisionRequest,
        outcome: Result<MutationResponse, ConsoleError>,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) -> Option<Duration> {
        let region = request.region_name;
        let delay = match outcome {
            Ok(resp) => {
                tracing::info!("Region '{}' created", region);
                session.mark_awaiting(&region);

                let mut text = format!("Region \"{}\" created successfully!", region);
                if let Some(warning) = &resp.proxy_warning {
                    text.push_str(&format!(" Warning: {}", warning));
                }
                self.notice = Some(Notice::success(text));
                self.form_open = false;
                self.state = ProvisionState::Succeeded {
                    region,
                    warning: resp.proxy_warning,
                };
                Some(self.reconcile_delay)
            }
            Err(e) => {
                tracing::warn!("Creating region '{}' failed: {}", region, e);
                let message = format!("Failed to create region: {}", e);
                self.notice = Some(Notice::error(message.clone()));
                self.state = ProvisionState::Failed(message);
                None
            }
        };
        self.render(renderer);
        delay
    }

    /// One complete create: validate, submit, apply
    pub async fn create<T: Transport>(
        &mut self,
        client: &GeodeClient<T>,
        name: &str,
        region_type: RegionType,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) -> Result<Option<Duration>, ConsoleError> {
        let request = self.begin_create(name, region_type, renderer)?;
        let outcome = Self::submit(client, &request).await;
        Ok(self.complete(request, outcome, session, renderer))
    }

    pub fn begin_drop(&mut self, name: &str, renderer: &mut impl Renderer) {
        tracing::info!("Deleting region '{}'", name);
        self.notice = Some(Notice::info(format!("Deleting region \"{}\"...", name)));
        self.render(renderer);
    }

    pub async fn drop_region<T: Transport>(
        client: &GeodeClient<T>,
        name: &str,
    ) -> Result<MutationResponse, ConsoleError> {
        let resp = client.delete_region(name).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ConsoleError::backend(resp.error))
        }
    }

    /// Apply a delete result; true when the region is gone
    pub fn complete_drop(
        &mut self,
        name: &str,
        outcome: Result<MutationResponse, ConsoleError>,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) -> bool {
        let dropped = match outcome {
            Ok(_) => {
                session.forget_awaiting(name);
                if session.current_region() == Some(name) {
                    session.clear_selection();
                    renderer.data_table(DataView::Idle);
                }
                self.notice = Some(Notice::success(format!("Region \"{}\" deleted", name)));
                true
            }
            Err(e) => {
                tracing::warn!("Deleting region '{}' failed: {}", name, e);
                self.notice = Some(Notice::error(format!("Failed to delete region: {}", e)));
                false
            }
        };
        self.render(renderer);
        dropped
    }

    /// Clear a lingering notice outside the form
    pub fn clear_notice(&mut self, renderer: &mut impl Renderer) {
        if self.notice.take().is_some() {
            self.render(renderer);
        }
    }

    pub fn render(&self, renderer: &mut impl Renderer) {
        let phase = match &self.state {
            ProvisionState::Idle => ProvisionPhase::Idle,
            ProvisionState::Submitting(request) => ProvisionPhase::Submitting {
                region: request.region_name.clone(),
            },
            ProvisionState::Succeeded { region, .. } => ProvisionPhase::Succeeded {
                region: region.clone(),
            },
            ProvisionState::Failed(_) => ProvisionPhase::Failed,
        };
        renderer.provision_form(ProvisionFormView {
            visible: self.form_open,
            phase,
            region_types: RegionType::ALL.to_vec(),
            notice: self.notice.clone(),
        });
    }
}
