//! App state and main loop: input handling, draining inbound records into the
//! feed, redrawing the chart after each accepted sample, and drawing.

use std::{io, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::chart::{ChartCanvas, RealtimeChart};
use crate::error::FeedError;
use crate::feed::EmotionFeed;
use crate::mqtt::{Inbound, LinkStatus};
use crate::ui::{chart::draw_emotion_chart, footer::draw_footer, header::draw_header};

const TICK: Duration = Duration::from_millis(100);

pub struct App {
    feed: EmotionFeed,
    chart: RealtimeChart<ChartCanvas>,
    source: String,
    status: LinkStatus,
    last_update: Option<DateTime<Local>>,

    // Quit flag
    should_quit: bool,
}

impl App {
    pub fn new(capacity: i64, source: impl Into<String>) -> Result<Self, FeedError> {
        Ok(Self {
            feed: EmotionFeed::new(capacity)?,
            chart: RealtimeChart::new(ChartCanvas::new()),
            source: source.into(),
            status: LinkStatus::Connecting,
            last_update: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self, rx: UnboundedReceiver<Inbound>) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, rx).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut rx: UnboundedReceiver<Inbound>,
    ) -> anyhow::Result<()> {
        let mut receiver_gone = false;
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if matches!(
                        k.code,
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                    ) {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Drain everything the receive side has queued, in arrival order
            while !receiver_gone {
                match rx.try_recv() {
                    Ok(ev) => self.handle_inbound(ev),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("receive side finished");
                        receiver_gone = true;
                    }
                }
            }

            // Draw
            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(TICK).await;
        }

        Ok(())
    }

    /// Apply one record from the receive side. Redraws only after an accepted
    /// sample, so the chart never sees an empty buffer.
    pub fn handle_inbound(&mut self, ev: Inbound) {
        match ev {
            Inbound::Status(s) => {
                info!(status = ?s, "link status");
                self.status = s;
            }
            Inbound::Message { topic, payload } => {
                if self.feed.on_message(&topic, &payload).is_ok() {
                    // Buffer is non-empty after a successful append
                    if let Err(e) = self.chart.redraw(self.feed.buffer()) {
                        debug!(error = %e, "redraw skipped");
                    }
                    self.last_update = Some(Local::now());
                }
            }
        }
    }

    pub fn feed(&self) -> &EmotionFeed {
        &self.feed
    }

    pub fn canvas(&self) -> &ChartCanvas {
        self.chart.surface()
    }

    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, chart, footer
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(8),    // chart
                Constraint::Length(1), // latest counts
            ])
            .split(area);

        draw_header(f, rows[0], &self.source, &self.status, self.last_update);
        draw_emotion_chart(f, rows[1], self.chart.surface());
        draw_footer(f, rows[2], &self.feed);
    }
}
