//! src/controller/event_loop.rs
//! ============================================================================
//! # EventLoop: Async Coordination of Navigation, File Ops, and Toasts
//!
//! One logical thread of control: actions arrive on a channel, client calls
//! run as spawned tasks and report back as [`TaskResult`]s, and a periodic
//! tick drives toast lifecycles. Listing results are applied through the
//! navigator's epoch check, so a superseded listing is discarded on arrival
//! rather than cancelled in flight.
//!
//! Policy owned here: a settled delete (success, refusal, or transport
//! failure alike) is always followed by exactly one re-listing of the
//! current directory. The server is authoritative; the view resyncs rather
//! than assuming the delete took effect.

use std::io;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::controller::actions::Action;
use crate::controller::navigator::{Activation, ListingApplied, ListingRequest, Navigator};
use crate::error::AppError;
use crate::notify::manager::NotificationManager;
use crate::notify::surface::ToastSurface;
use crate::notify::toast::ToastMessage;
use crate::remote::entry::FileEntry;
use crate::remote::file_client::FileOps;
use crate::settings::token::TokenStore;
use crate::view::printer;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Completion message from a spawned client task.
#[derive(Debug)]
pub enum TaskResult {
    ListingLoaded {
        epoch: u64,
        rel: String,
        result: Result<Vec<FileEntry>, AppError>,
    },
    DeleteSettled {
        rel: String,
        result: Result<(), AppError>,
    },
}

pub struct EventLoop<C, S>
where
    C: FileOps,
    S: ToastSurface,
{
    client: C,
    navigator: Navigator,
    notifier: NotificationManager<S>,
    tokens: TokenStore,
    action_rx: UnboundedReceiver<Action>,
    task_tx: UnboundedSender<TaskResult>,
    task_rx: UnboundedReceiver<TaskResult>,
    echo_listings: bool,
}

impl<C, S> EventLoop<C, S>
where
    C: FileOps,
    S: ToastSurface,
{
    /// Builds the loop and hands back the action sender the UI drives it
    /// with.
    pub fn new(
        client: C,
        notifier: NotificationManager<S>,
        tokens: TokenStore,
    ) -> (Self, UnboundedSender<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let event_loop = Self {
            client,
            navigator: Navigator::new(),
            notifier,
            tokens,
            action_rx,
            task_tx,
            task_rx,
            echo_listings: false,
        };
        (event_loop, action_tx)
    }

    /// Print each applied listing to stdout (the line-oriented driver's
    /// view surface).
    pub fn echo_listings(mut self, on: bool) -> Self {
        self.echo_listings = on;
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn notifier(&self) -> &NotificationManager<S> {
        &self.notifier
    }

    /// Runs until a `Quit` action arrives.
    pub async fn run(&mut self) -> Result<(), AppError> {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        loop {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    if !self.handle_action(action).await {
                        break;
                    }
                }
                Some(task) = self.task_rx.recv() => self.handle_task(task),
                _ = ticker.tick() => self.drive_toasts(Instant::now()),
            }
        }
        Ok(())
    }

    /// Returns false when the loop should stop.
    async fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::NavigateTo(index) => {
                let request = self.navigator.navigate_to(index);
                self.spawn_listing(request);
            }
            Action::Activate(name) => match self.navigator.activate(&name) {
                Ok(Activation::Descend(request)) => self.spawn_listing(request),
                Ok(Activation::Download { rel }) => self.spawn_download(rel),
                Err(err) => self.report(&err),
            },
            Action::Delete(name) => {
                let rel: String = self.navigator.request_delete(&name);
                // The token is read fresh for every delete, never cached.
                let token: Option<String> = match self.tokens.read().await {
                    Ok(token) => token,
                    Err(err) => {
                        warn!("token store unreadable, deleting without token: {err}");
                        None
                    }
                };
                self.spawn_delete(rel, token);
            }
            Action::Refresh => {
                let request = self.navigator.begin_refresh();
                self.spawn_listing(request);
            }
            Action::Tick => self.drive_toasts(Instant::now()),
            Action::Quit => return false,
        }
        true
    }

    fn handle_task(&mut self, task: TaskResult) {
        match task {
            TaskResult::ListingLoaded { epoch, rel, result } => {
                match self.navigator.apply_listing(epoch, result) {
                    Ok(ListingApplied::Current) => {
                        debug!("listing applied for {rel}");
                        self.render();
                    }
                    Ok(ListingApplied::Stale) => {}
                    Err(err) => {
                        warn!("listing {rel} failed: {err}");
                        self.report(&err);
                    }
                }
            }
            TaskResult::DeleteSettled { rel, result } => {
                match result {
                    Ok(()) => {
                        let _ = self.notifier.push(ToastMessage::success("file deleted"));
                    }
                    Err(err) => {
                        warn!("delete of {rel} settled with failure: {err}");
                        self.report(&err);
                    }
                }
                // Always resync afterwards, whatever the outcome.
                let request = self.navigator.begin_refresh();
                self.spawn_listing(request);
            }
        }
    }

    fn spawn_listing(&self, request: ListingRequest) {
        let client = self.client.clone();
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            let ListingRequest { epoch, rel } = request;
            let result = client.list(&rel).await;
            let _ = task_tx.send(TaskResult::ListingLoaded { epoch, rel, result });
        });
    }

    fn spawn_delete(&self, rel: String, token: Option<String>) {
        let client = self.client.clone();
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = client.delete(&rel, token.as_deref()).await;
            let _ = task_tx.send(TaskResult::DeleteSettled { rel, result });
        });
    }

    /// Fire-and-forget: the transfer belongs to whatever the opener
    /// launches, so no result flows back.
    fn spawn_download(&self, rel: String) {
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.download(&rel).await {
                warn!("download hand-off for {rel} failed: {err}");
            }
        });
    }

    fn report(&mut self, err: &AppError) {
        let _ = self.notifier.push(ToastMessage::from_error(err));
    }

    fn drive_toasts(&mut self, now: Instant) {
        self.notifier.on_frame(now);
        let fading = self.notifier.poll(now);
        if S::INSTANT_TRANSITIONS {
            for id in fading {
                self.notifier.on_transition_end(id);
            }
        }
    }

    fn render(&self) {
        if !self.echo_listings {
            return;
        }
        let mut out = io::stdout().lock();
        if let Err(err) = printer::render(&mut out, self.navigator.path(), self.navigator.entries())
        {
            warn!("stdout render failed: {err}");
        }
    }
}
