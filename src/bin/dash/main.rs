//! Mission Control Dashboard - Live Terminal View
//!
//! Mounts every view consumer on one simulated hub and displays:
//! - Mission board and system health
//! - Notifications and the live activity stream
//! - Focused agent log and reflexion monitor
//! - Execution trace graph
//!
//! Usage:
//!   mission-control-dash [OPTIONS]
//!
//! Examples:
//!   mission-control-dash                     # Default config, random stream
//!   mission-control-dash --seed 7            # Reproducible stream
//!   mission-control-dash --refresh 100       # Faster redraw (ms)
//!   mission-control-dash --agent AGT-004     # Follow another agent

mod colors;
mod panel_manager;
mod panels;
mod widgets;

use anyhow::{Context, Result};
use clap::Parser;
use colors::DashboardColors;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mission_control_core::{
    catalog::{self, Priority},
    hub::ConnectionStatus,
    views::{
        ActivityFeed, AgentLog, HealthMonitor, MissionBoard, Mounted, NotificationCenter,
        ReflexionMonitor, TraceGraph,
    },
    EventHub, MissionControlConfig,
};
use panel_manager::{Column, PanelId, PanelManager};
use panels::{
    ActivityPanel, AgentLogPanel, HealthPanel, MissionsPanel, NotificationsPanel,
    ReflexionPanel, TracePanel,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tokio::{sync::mpsc, time::interval};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "mission-control-dash")]
#[command(about = "Live terminal dashboard for the simulated mission control hub")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "MISSION_CONTROL_CONFIG")]
    config: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long, env = "MISSION_CONTROL_SEED")]
    seed: Option<u64>,

    /// Refresh interval in milliseconds (overrides the config file)
    #[arg(long)]
    refresh: Option<u64>,

    /// Agent shown in the agent log panel
    #[arg(long)]
    agent: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Application state
struct App {
    hub: EventHub,

    missions: Mounted<MissionBoard>,
    health: Mounted<HealthMonitor>,
    notifications: Mounted<NotificationCenter>,
    activity: Mounted<ActivityFeed>,
    agent_log: Mounted<AgentLog>,
    reflexion: Mounted<ReflexionMonitor>,
    trace: Mounted<TraceGraph>,

    agent_log_panel: AgentLogPanel,

    /// Panel manager for visibility/layout
    panel_manager: PanelManager,
}

impl App {
    fn new(hub: EventHub, config: &MissionControlConfig) -> Result<Self> {
        let views = &config.views;
        let seed = config.hub.seed;
        // Each view draws from its own stream so they never correlate
        let derive = |offset: u64| seed.map(|s| s.wrapping_add(offset));

        let profile = catalog::agent_profile(&config.dashboard.focus_agent)
            .with_context(|| format!("Unknown agent: {}", config.dashboard.focus_agent))?;

        Ok(Self {
            missions: MissionBoard::mount(&hub),
            health: HealthMonitor::mount(&hub, views.health_tick, derive(1)),
            notifications: NotificationCenter::mount(&hub, views.notification_capacity),
            activity: ActivityFeed::mount(&hub, views.activity_capacity),
            agent_log: AgentLog::mount(
                AgentLog::for_profile(&profile, views.agent_log_capacity, derive(2)),
                views.agent_log_tick,
            ),
            reflexion: ReflexionMonitor::mount(
                ReflexionMonitor::new(views.anomaly_capacity, derive(3)),
                views.reflexion_tick,
            ),
            trace: TraceGraph::mount(TraceGraph::new(derive(4)), views.trace_tick),
            agent_log_panel: AgentLogPanel::new(profile.name),
            panel_manager: PanelManager::new(),
            hub,
        })
    }

    /// Handle one key press; true means quit
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('0') => self.panel_manager.toggle_all(),
            KeyCode::Char(c @ '1'..='7') => {
                if let Some(panel) = PanelId::from_shortcut(c) {
                    self.panel_manager.toggle_panel(panel);
                }
            }
            KeyCode::Char('c') => self.hub.connect(),
            KeyCode::Char('d') => self.hub.shutdown(),
            KeyCode::Char('r') => self.notifications.update(|n| n.mark_all_read()),
            KeyCode::Char('x') => self.notifications.update(|n| n.clear_all()),
            KeyCode::Char('p') => self.trace.update(|t| t.toggle_playing()),
            KeyCode::Char('f') => self.trace.update(|t| t.cycle_filter()),
            KeyCode::Char('n') => {
                let id = self.missions.update(|board| {
                    board.create_mission(
                        "Ad-hoc mission",
                        "Queued from the dashboard",
                        Priority::Medium,
                    )
                });
                debug!("Created mission {}", id);
            }
            _ => {}
        }
        false
    }

    /// Unmount every view; the hub stops generating
    fn shutdown(&mut self) {
        self.missions.unmount();
        self.health.unmount();
        self.notifications.unmount();
        self.activity.unmount();
        self.agent_log.unmount();
        self.reflexion.unmount();
        self.trace.unmount();
        self.hub.shutdown();
    }

    fn draw(&self, f: &mut Frame) {
        // Header (3) + Panels (dynamic) + Footer (1)
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, main_chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[1]);

        self.draw_column(f, columns[0], Column::Left);
        self.draw_column(f, columns[1], Column::Right);

        let hidden: Vec<String> = PanelId::ALL
            .into_iter()
            .filter(|p| !self.panel_manager.is_panel_visible(*p))
            .map(|p| format!("{}:{}", p.shortcut_key(), p.name()))
            .collect();
        let hidden = if hidden.is_empty() {
            format!("{} panels visible", self.panel_manager.visible_count())
        } else {
            format!("hidden {}", hidden.join(" "))
        };

        let footer = Paragraph::new(format!(
            "'c' connect | 'd' disconnect | '0' all | '1-7' panels | 'r' read | 'x' clear | 'p' play | 'f' filter | 'n' new mission | 'q' quit | {}",
            hidden
        ))
        .style(Style::default().fg(DashboardColors::IDLE));
        f.render_widget(footer, main_chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let status = self.hub.status();
        let last = self
            .hub
            .last_message()
            .map(|event| format!("last: {} ", event.kind()))
            .unwrap_or_default();

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Mission Control ",
                Style::default()
                    .fg(DashboardColors::HEADER)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", status),
                Style::default()
                    .fg(DashboardColors::connection(status))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(last, Style::default().fg(DashboardColors::SECONDARY)),
            Span::styled(
                format!(
                    "| {} events, {} listener failures",
                    self.hub.dispatched_count(),
                    self.hub.failure_count()
                ),
                Style::default().fg(DashboardColors::SECONDARY),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DashboardColors::connection(status))),
        );
        f.render_widget(header, area);
    }

    fn draw_column(&self, f: &mut Frame, area: Rect, column: Column) {
        let visible = self.panel_manager.visible_in(column);
        if visible.is_empty() {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(self.panel_manager.layout_constraints(column, area.height))
            .split(area);

        for (panel, chunk) in visible.into_iter().zip(chunks.iter().copied()) {
            match panel {
                PanelId::Missions => self.missions.read(|v| MissionsPanel.render(f, chunk, v)),
                PanelId::Health => self.health.read(|v| HealthPanel.render(f, chunk, v)),
                PanelId::Notifications => self
                    .notifications
                    .read(|v| NotificationsPanel.render(f, chunk, v)),
                PanelId::Activity => self.activity.read(|v| ActivityPanel.render(f, chunk, v)),
                PanelId::AgentLog => self
                    .agent_log
                    .read(|v| self.agent_log_panel.render(f, chunk, v)),
                PanelId::Reflexion => self.reflexion.read(|v| ReflexionPanel.render(f, chunk, v)),
                PanelId::Trace => self.trace.read(|v| TracePanel.render(f, chunk, v)),
            }
        }
    }
}

/// Forward key presses from a blocking reader thread
fn spawn_key_reader(tx: mpsc::UnboundedSender<KeyCode>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key.code).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Terminal read failed: {}", e);
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    error!("Terminal poll failed: {}", e);
                    return;
                }
            }
        }
    });
}

fn init_logging(level: &str, path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(format!(
        "mission_control_dash={level},mission_control_core={level}"
    ))
    .unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI; everything goes to the file
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = MissionControlConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.hub.seed = Some(seed);
    }
    if let Some(refresh) = args.refresh {
        config.dashboard.refresh = Duration::from_millis(refresh);
    }
    if let Some(agent) = args.agent {
        config.dashboard.focus_agent = agent;
    }
    config.validate()?;

    init_logging(&args.log_level, &config.dashboard.log_file)?;
    info!("Dashboard v{} starting...", env!("CARGO_PKG_VERSION"));

    let hub = EventHub::new(config.hub.clone());
    hub.on_listener_error(|failure| {
        warn!(
            "Listener {:?} on {} failed for {}: {}",
            failure.listener, failure.topic, failure.event_id, failure.message
        );
    });
    let mut app = App::new(hub, &config)?;
    app.hub.connect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, config.dashboard.refresh).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();

    if let Err(err) = result {
        error!("Error: {:?}", err);
        return Err(err);
    }

    info!(
        "Dashboard exiting cleanly after {} events",
        app.hub.dispatched_count()
    );
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    refresh: Duration,
) -> Result<()> {
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    spawn_key_reader(key_tx);

    let mut tick = interval(refresh);
    let mut status = app.hub.status_changes();

    loop {
        terminal.draw(|f| app.draw(f))?;

        tokio::select! {
            _ = tick.tick() => {}
            changed = status.changed() => {
                if changed.is_ok() {
                    let current: ConnectionStatus = *status.borrow_and_update();
                    info!("Connection status: {}", current);
                }
            }
            key = key_rx.recv() => match key {
                Some(code) => {
                    if app.handle_key(code) {
                        return Ok(());
                    }
                }
                None => return Ok(()),
            },
        }
    }
}
