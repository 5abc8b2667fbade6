//! The sync engine: one task owning the ledger, the crawl session and the
//! scheduler, driven by presence events and completion events.
//!
//! Network work runs in spawned tasks that only post [`Event`]s back, so all
//! state changes happen here, one event at a time.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::SyncConfig;
use crate::crawler::Crawler;
use crate::event::{self, Event, EventReceiver, EventSender, Generation};
use crate::ledger::Ledger;
use crate::presence::PresenceEvent;
use crate::scheduler::Scheduler;
use crate::transfer::Fetcher;

/// Runtime settings derived from [`SyncConfig`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub source_name: String,
    pub output_dir: PathBuf,
    pub concurrent_transfers: usize,
    pub recrawl_interval: Duration,
    pub max_page_size: u32,
}

impl EngineSettings {
    pub fn from_config(cfg: &SyncConfig) -> Result<Self> {
        Ok(Self {
            source_name: cfg.source_name.trim().to_string(),
            output_dir: cfg.resolved_output_dir()?,
            concurrent_transfers: cfg.transfer_limit(),
            recrawl_interval: cfg.recrawl_interval(),
            max_page_size: cfg.page_size(),
        })
    }
}

pub struct SyncEngine {
    settings: EngineSettings,
    ledger: Ledger,
    scheduler: Scheduler,
    session: Option<Crawler>,
    last_generation: Generation,
    events_tx: EventSender,
    events_rx: EventReceiver,
}

impl SyncEngine {
    /// Open the ledger in the configured output directory and build the engine.
    pub async fn open(cfg: &SyncConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let settings = EngineSettings::from_config(cfg)?;
        let ledger_path = cfg.ledger_path()?;
        let ledger = Ledger::open_at(&ledger_path, cfg.ledger_policy())
            .await
            .with_context(|| format!("failed to open ledger {}", ledger_path.display()))?;
        Self::with_ledger(settings, ledger, fetcher).await
    }

    /// Build the engine around an open ledger. Expires old records once.
    pub async fn with_ledger(
        settings: EngineSettings,
        ledger: Ledger,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self> {
        tokio::fs::create_dir_all(&settings.output_dir)
            .await
            .with_context(|| format!("cannot create {}", settings.output_dir.display()))?;
        let expired = ledger.expire().await?;
        if expired > 0 {
            tracing::info!("expired {} old record(s)", expired);
        }
        let (events_tx, events_rx) = event::channel();
        let scheduler = Scheduler::new(
            settings.concurrent_transfers,
            settings.output_dir.clone(),
            fetcher,
            events_tx.clone(),
        );
        Ok(Self {
            settings,
            ledger,
            scheduler,
            session: None,
            last_generation: 0,
            events_tx,
            events_rx,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Process events until the presence channel closes.
    ///
    /// The engine does not discover sources itself. A discovery provider keeps
    /// the sending half of `presence`, and for each device it finds it sends
    /// [`PresenceEvent::Available`] carrying a [`CatalogSource`] for that
    /// device. It sends [`PresenceEvent::Unavailable`] when the device goes
    /// away. Dropping the sender stops the engine.
    ///
    /// [`CatalogSource`]: crate::catalog::CatalogSource
    pub async fn run(mut self, mut presence: mpsc::Receiver<PresenceEvent>) -> Result<()> {
        tracing::info!(
            "waiting for {} (output {})",
            self.settings.source_name,
            self.settings.output_dir.display()
        );
        loop {
            tokio::select! {
                ev = presence.recv() => match ev {
                    Some(ev) => self.handle_presence(ev).await,
                    None => break,
                },
                Some(ev) = self.events_rx.recv() => self.handle_event(ev).await,
            }
        }
        if let Some(mut crawler) = self.session.take() {
            crawler.cancel_recrawl();
        }
        tracing::info!("engine stopped");
        Ok(())
    }

    fn current_generation(&self) -> Option<Generation> {
        self.session.as_ref().map(Crawler::generation)
    }

    async fn handle_presence(&mut self, ev: PresenceEvent) {
        if ev.name() != self.settings.source_name {
            tracing::debug!("ignoring presence of {}", ev.name());
            return;
        }
        match ev {
            PresenceEvent::Available { source, .. } => {
                if let Some(mut old) = self.session.take() {
                    old.cancel_recrawl();
                    tracing::info!("{} announced again, restarting crawl", old.name());
                } else {
                    tracing::info!("{} is available", self.settings.source_name);
                }
                self.last_generation += 1;
                let mut crawler = Crawler::new(
                    self.settings.source_name.clone(),
                    source,
                    self.last_generation,
                    self.events_tx.clone(),
                    self.settings.max_page_size,
                    self.settings.recrawl_interval,
                );
                crawler.start_pass();
                self.session = Some(crawler);
            }
            PresenceEvent::Unavailable { .. } => {
                let Some(mut crawler) = self.session.take() else {
                    return;
                };
                crawler.cancel_recrawl();
                match self.ledger.flush_undone().await {
                    Ok(n) => tracing::info!("{} left, dropped {} pending record(s)", crawler.name(), n),
                    Err(e) => tracing::warn!("could not flush pending records: {:#}", e),
                }
            }
        }
    }

    async fn handle_event(&mut self, ev: Event) {
        let current = self.current_generation();
        match ev {
            Event::PageFetched {
                generation,
                request,
                result,
            } => {
                let Some(crawler) = self.session.as_mut().filter(|c| c.generation() == generation)
                else {
                    tracing::debug!(generation, "stale page ignored");
                    return;
                };
                if crawler.handle_page(&self.ledger, request, result).await {
                    self.on_pass_complete().await;
                }
            }
            Event::ItemResolved {
                generation,
                item_id,
                result,
            } => {
                let Some(crawler) = self.session.as_ref().filter(|c| c.generation() == generation)
                else {
                    tracing::debug!(generation, item = %item_id, "stale metadata ignored");
                    return;
                };
                if crawler.handle_resolved(&self.ledger, &item_id, result).await {
                    self.scheduler.wake();
                }
            }
            Event::RecrawlDue { generation } => {
                if let Some(crawler) = self.session.as_mut().filter(|c| c.generation() == generation) {
                    crawler.on_recrawl_due();
                }
            }
            Event::Drain => {
                self.scheduler.drain(&self.ledger, current).await;
            }
            Event::TransferFinished {
                generation,
                record,
                result,
            } => {
                self.scheduler
                    .on_transfer_finished(&self.ledger, generation, current, record, result)
                    .await;
            }
        }
    }

    async fn on_pass_complete(&mut self) {
        tracing::info!("crawl pass complete on {}", self.settings.source_name);
        self.scheduler.wake();
        match self.ledger.expire().await {
            Ok(0) => {}
            Ok(n) => tracing::info!("expired {} old record(s)", n),
            Err(e) => tracing::warn!("expire failed: {:#}", e),
        }
        if let Some(crawler) = self.session.as_mut() {
            crawler.arm_recrawl();
        }
    }
}
