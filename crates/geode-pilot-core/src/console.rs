//! Composition root
//!
//! [`Console`] owns the client, the renderer, the [`Session`] and the four
//! components. User actions arrive as [`Command`]s. Every network call runs
//! as a spawned task that reports back a [`Completion`] over a channel, and
//! completions are applied one at a time on the owner's task, so component
//! state is only ever touched from one place.

use crate::catalog::RegionCatalog;
use crate::constants::{DEFAULT_PAGE_LIMIT, refresh_intervals};
use crate::errors::ConsoleError;
use crate::monitor::ClusterStatusMonitor;
use crate::periodic::PeriodicTask;
use crate::provisioner::RegionProvisioner;
use crate::sequence::Ticket;
use crate::session::Session;
use crate::types::{ClusterStatus, DataPage, PageWindow, ProvisionRequest, RegionSummary, RegionType};
use crate::view::{DataView, Renderer, StatusIndicatorView};
use crate::viewer::RegionDataViewer;
use geode_rs::{GeodeClient, MutationResponse, Transport};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Timing and paging knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub poll_interval: Duration,
    pub reconcile_delay: Duration,
    pub page_limit: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(refresh_intervals::STATUS_POLL_SECS),
            reconcile_delay: Duration::from_millis(refresh_intervals::RECONCILE_DELAY_MS),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Cluster,
    Regions,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Cluster, Tab::Regions, Tab::Data];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Cluster => "Cluster",
            Tab::Regions => "Regions",
            Tab::Data => "Data",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Cluster => Tab::Regions,
            Tab::Regions => Tab::Data,
            Tab::Data => Tab::Cluster,
        }
    }
}

/// Operator actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activating the Regions tab refreshes the catalog
    SwitchTab(Tab),
    /// Refresh the catalog and reload the current page
    Refresh,
    /// Choose a region, jump to the data tab and load its first page
    OpenRegion(String),
    ChooseRegion(String),
    ChooseNextRegion,
    ChoosePrevRegion,
    /// Load the first page of the chosen region
    LoadChosen,
    NextPage,
    PrevPage,
    OpenProvisionForm,
    SubmitProvision {
        name: String,
        region_type: RegionType,
    },
    DismissProvisionForm,
    /// Clear the last create/drop notice
    DismissNotice,
    DropRegion(String),
}

/// Results of background work, applied in arrival order
#[derive(Debug)]
pub enum Completion {
    StatusPolled {
        ticket: Ticket,
        status: ClusterStatus,
    },
    RegionsFetched(Result<Vec<RegionSummary>, ConsoleError>),
    PageFetched {
        ticket: Ticket,
        outcome: Result<DataPage, ConsoleError>,
    },
    RegionCreated {
        request: ProvisionRequest,
        outcome: Result<MutationResponse, ConsoleError>,
    },
    /// The post-create delay elapsed
    ReconcileDue { region: String },
    RegionDropped {
        region: String,
        outcome: Result<MutationResponse, ConsoleError>,
    },
}

pub struct Console<T: Transport + 'static, R: Renderer> {
    client: GeodeClient<T>,
    renderer: R,
    session: Session,
    monitor: ClusterStatusMonitor,
    catalog: RegionCatalog,
    viewer: RegionDataViewer,
    provisioner: RegionProvisioner,
    tab: Tab,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    poller: Option<PeriodicTask>,
    /// In-flight page fetch; aborted when a newer load is issued
    page_task: Option<JoinHandle<()>>,
    background: Vec<JoinHandle<()>>,
}

impl<T: Transport + 'static, R: Renderer> Console<T, R> {
    pub fn new(client: GeodeClient<T>, renderer: R, config: ConsoleConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            renderer,
            session: Session::new(config.page_limit),
            monitor: ClusterStatusMonitor::new(config.poll_interval),
            catalog: RegionCatalog::new(),
            viewer: RegionDataViewer::new(),
            provisioner: RegionProvisioner::new(config.reconcile_delay),
            tab: Tab::default(),
            tx,
            rx,
            poller: None,
            page_task: None,
            background: Vec::new(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn monitor(&self) -> &ClusterStatusMonitor {
        &self.monitor
    }

    pub fn provisioner(&self) -> &RegionProvisioner {
        &self.provisioner
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn client(&self) -> &GeodeClient<T> {
        &self.client
    }

    /// Start the status poller and the initial catalog load
    pub fn start(&mut self) {
        if self.poller.is_some() {
            return;
        }
        tracing::info!(
            "Starting console (status poll every {:?})",
            self.monitor.interval()
        );
        self.renderer.status_indicator(StatusIndicatorView::pending());
        self.renderer.data_table(DataView::Idle);
        self.provisioner.render(&mut self.renderer);

        let client = self.client.clone();
        let tx = self.tx.clone();
        let sequencer = self.monitor.sequencer();
        self.poller = Some(PeriodicTask::start(self.monitor.interval(), move || {
            let ticket = sequencer.issue();
            let client = client.clone();
            let reply = tx.clone();
            tokio::spawn(async move {
                let status = ClusterStatusMonitor::fetch(&client).await;
                let _ = reply.send(Completion::StatusPolled { ticket, status });
            });
            !tx.is_closed()
        }));

        self.refresh_catalog();
    }

    /// Stop polling and abort everything in flight
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down console");
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        if let Some(task) = self.page_task.take() {
            task.abort();
        }
        for task in self.background.drain(..) {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.poller.as_ref().is_some_and(PeriodicTask::is_running)
    }

    pub fn handle(&mut self, command: Command) -> Result<(), ConsoleError> {
        tracing::debug!("Command: {:?}", command);
        match command {
            Command::SwitchTab(tab) => {
                self.tab = tab;
                if tab == Tab::Regions {
                    self.refresh_catalog();
                }
            }
            Command::Refresh => {
                self.refresh_catalog();
                if let Some(region) = self.session.current_region().map(str::to_string) {
                    let window = self.session.window();
                    self.load_page(&region, window);
                }
            }
            Command::OpenRegion(name) => {
                self.catalog.choose(&name, &mut self.renderer);
                self.tab = Tab::Data;
                self.load_page(&name, PageWindow::first(self.session.page_limit()));
            }
            Command::ChooseRegion(name) => {
                self.catalog.choose(&name, &mut self.renderer);
            }
            Command::ChooseNextRegion => self.catalog.choose_next(&mut self.renderer),
            Command::ChoosePrevRegion => self.catalog.choose_prev(&mut self.renderer),
            Command::LoadChosen => {
                if let Some(name) = self.catalog.chosen().map(str::to_string) {
                    self.load_page(&name, PageWindow::first(self.session.page_limit()));
                }
            }
            Command::NextPage => {
                if let Some(window) = self.viewer.next_window(&self.session)
                    && let Some(region) = self.session.current_region().map(str::to_string)
                {
                    self.load_page(&region, window);
                }
            }
            Command::PrevPage => {
                if let Some(window) = self.viewer.prev_window(&self.session)
                    && let Some(region) = self.session.current_region().map(str::to_string)
                {
                    self.load_page(&region, window);
                }
            }
            Command::OpenProvisionForm => self.provisioner.open_form(&mut self.renderer),
            Command::SubmitProvision { name, region_type } => {
                let request = self
                    .provisioner
                    .begin_create(&name, region_type, &mut self.renderer)?;
                let client = self.client.clone();
                self.spawn(async move {
                    let outcome = RegionProvisioner::submit(&client, &request).await;
                    Completion::RegionCreated { request, outcome }
                });
            }
            Command::DismissProvisionForm => self.provisioner.dismiss(&mut self.renderer),
            Command::DismissNotice => self.provisioner.clear_notice(&mut self.renderer),
            Command::DropRegion(region) => {
                self.provisioner.begin_drop(&region, &mut self.renderer);
                let client = self.client.clone();
                self.spawn(async move {
                    let outcome = RegionProvisioner::drop_region(&client, &region).await;
                    Completion::RegionDropped { region, outcome }
                });
            }
        }
        Ok(())
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns false only if the channel is closed.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Apply every completion that is ready, without waiting
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::StatusPolled { ticket, status } => {
                self.monitor.apply(ticket, status, &mut self.renderer);
            }
            Completion::RegionsFetched(result) => {
                self.catalog
                    .apply(result, &mut self.session, &mut self.renderer);
            }
            Completion::PageFetched { ticket, outcome } => {
                self.viewer
                    .complete(ticket, outcome, &mut self.session, &mut self.renderer);
            }
            Completion::RegionCreated { request, outcome } => {
                let region = request.region_name.clone();
                let delay = self.provisioner.complete(
                    request,
                    outcome,
                    &mut self.session,
                    &mut self.renderer,
                );
                if let Some(delay) = delay {
                    self.catalog.render_grid(&self.session, &mut self.renderer);
                    self.catalog.track_selection(&self.session, &mut self.renderer);
                    self.spawn(async move {
                        tokio::time::sleep(delay).await;
                        Completion::ReconcileDue { region }
                    });
                }
            }
            Completion::ReconcileDue { region } => {
                tracing::debug!("Reconciling catalog after creating '{}'", region);
                self.refresh_catalog();
            }
            Completion::RegionDropped { region, outcome } => {
                let was_current = self.session.current_region() == Some(region.as_str());
                if self.provisioner.complete_drop(
                    &region,
                    outcome,
                    &mut self.session,
                    &mut self.renderer,
                ) {
                    if was_current {
                        if let Some(task) = self.page_task.take() {
                            task.abort();
                        }
                        self.viewer.cancel();
                        self.catalog.track_selection(&self.session, &mut self.renderer);
                    }
                    self.refresh_catalog();
                }
            }
        }
    }

    fn refresh_catalog(&mut self) {
        self.catalog.begin_refresh(&mut self.renderer);
        let client = self.client.clone();
        self.spawn(async move { Completion::RegionsFetched(RegionCatalog::fetch(&client).await) });
    }

    fn load_page(&mut self, region: &str, window: PageWindow) {
        let ticket = self
            .viewer
            .begin_load(&mut self.session, region, window, &mut self.renderer);
        self.catalog.track_selection(&self.session, &mut self.renderer);
        let client = self.client.clone();
        let region = region.to_string();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let outcome = RegionDataViewer::fetch(&client, &region, window).await;
            let _ = tx.send(Completion::PageFetched { ticket, outcome });
        });
        if let Some(previous) = self.page_task.replace(task) {
            previous.abort();
        }
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.background.retain(|task| !task.is_finished());
        self.background.push(tokio::spawn(async move {
            let _ = tx.send(work.await);
        }));
    }
}

impl<T: Transport + 'static, R: Renderer> Drop for Console<T, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
