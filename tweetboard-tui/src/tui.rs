use crate::{
    command::{Command, is_command, parse_command},
    feed::{self, FeedLine},
    host::TuiSendButton,
    input::InputLine,
    styles,
    view::{self, ViewSnap},
};
use anyhow::Result;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::Style,
};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tweetboard_page::{PageIds, PageState};
use tweetboard_service::{ComposeBox, Tweet};

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    Submit(String),
    /// Tweets appended to the container, in order.
    Append(Vec<Tweet>),
    /// One send activation finished, successfully or not.
    PostSettled,
    Page(PageState),
    Reported(String),
    OpError(String),
    Shutdown,
}

/// Sending half of the UI loop's mailbox.
#[derive(Clone)]
pub struct TuiHandle {
    tx: mpsc::UnboundedSender<TuiMsg>,
}

impl TuiHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TuiMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` once the UI loop is gone.
    pub fn send(&self, msg: TuiMsg) -> bool {
        self.tx.send(msg).is_ok()
    }
}

pub struct TuiActor<B: Backend = CrosstermBackend<Stdout>> {
    inbox: mpsc::UnboundedReceiver<TuiMsg>,
    ui: TuiHandle,

    // page
    compose: ComposeBox,
    send: Arc<TuiSendButton>,
    ids: PageIds,
    page: PageState,

    // terminal
    term: Terminal<B>,
    tick_rate: Duration,
    last_tick: Instant,

    // ui state
    input: InputLine,
    lines: Vec<FeedLine>,
    tweet_count: usize,
    scroll: usize, // from bottom
    notice: Option<FeedLine>,
    dirty: bool,

    in_flight: u32,
    spin_idx: usize,

    shutdown: CancellationToken,
}

impl TuiActor {
    /// Switch the terminal to raw mode on the alternate screen. [`Self::run`]
    /// restores it, and so does a failure here.
    pub fn new(
        inbox: mpsc::UnboundedReceiver<TuiMsg>,
        ui: TuiHandle,
        compose: ComposeBox,
        send: Arc<TuiSendButton>,
        ids: PageIds,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        let term = setup_or_restore(enter_terminal, restore_terminal)?;
        Ok(Self::with_terminal(term, inbox, ui, compose, send, ids, shutdown))
    }

    /// Process messages until shutdown, then restore the terminal and cancel
    /// `shutdown` so the feeders stop too.
    pub async fn run(mut self) -> Result<()> {
        let result = self.event_loop().await;
        restore_terminal();
        self.shutdown.cancel();
        result
    }
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut term = Terminal::new(CrosstermBackend::new(stdout))?;
    term.clear()?;
    Ok(term)
}

fn restore_terminal() {
    disable_raw_mode().ok();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`; if it fails part way, run `restore` before returning the error.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

impl<B: Backend> TuiActor<B> {
    #[allow(clippy::too_many_arguments)]
    fn with_terminal(
        term: Terminal<B>,
        inbox: mpsc::UnboundedReceiver<TuiMsg>,
        ui: TuiHandle,
        compose: ComposeBox,
        send: Arc<TuiSendButton>,
        ids: PageIds,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            inbox,
            ui,
            compose,
            send,
            ids,
            page: PageState::Loading,
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            input: InputLine::default(),
            lines: Vec::new(),
            tweet_count: 0,
            scroll: 0,
            notice: Some(FeedLine::new("/help for keys", styles::notice())),
            dirty: true,
            in_flight: 0,
            spin_idx: 0,
            shutdown,
        }
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            let msg = tokio::select! {
                _ = self.shutdown.cancelled() => return Ok(()),
                msg = self.inbox.recv() => msg,
            };
            match msg {
                Some(TuiMsg::Shutdown) | None => return Ok(()),
                Some(msg) => self.handle(msg)?,
            }
        }
    }

    fn handle(&mut self, msg: TuiMsg) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev
                    && let Some(next) = self.handle_key(k)
                {
                    self.ui.send(next);
                }
            }
            TuiMsg::Submit(line) => self.route_submit(line),
            TuiMsg::Append(tweets) => {
                for tweet in &tweets {
                    self.lines.extend(feed::tweet_lines(tweet));
                }
                self.tweet_count += tweets.len();
                self.dirty = true;
            }
            TuiMsg::PostSettled => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.dirty = true;
            }
            TuiMsg::Page(state) => {
                self.page = state;
                self.dirty = true;
            }
            TuiMsg::Reported(text) => self.set_notice(format!("× {text}"), styles::error()),
            TuiMsg::OpError(e) => self.set_notice(format!("× Error: {e}"), styles::error()),
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => self.shutdown.cancel(),
        }
        Ok(())
    }

    fn set_notice<S: Into<String>>(&mut self, s: S, style: Style) {
        self.notice = Some(FeedLine::new(s, style));
        self.dirty = true;
    }

    fn busy(&self) -> bool {
        self.in_flight > 0 || self.page == PageState::Loading
    }

    fn spinner(&self) -> &'static str {
        if self.busy() {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.busy() {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap {
            input: self.input.text(),
            caret_col: self.input.caret_col(),
            lines: &self.lines,
            scroll: self.scroll,
            tweet_count: self.tweet_count,
            container_id: &self.ids.container,
            send_control_id: &self.ids.send_control,
            author: self.compose.author(),
            page: page_label(self.page),
            in_flight: self.in_flight,
            spinner: self.spinner(),
            notice: self.notice.as_ref(),
        };
        view::draw(&mut self.term, &snap)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TuiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(TuiMsg::Shutdown),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_add(5),
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_sub(5),
            (KeyCode::Up, _) => self.scroll = self.scroll.saturating_add(1),
            (KeyCode::Down, _) => self.scroll = self.scroll.saturating_sub(1),
            (KeyCode::Enter, _) => {
                self.dirty = true;
                return Some(TuiMsg::Submit(self.input.take()));
            }
            (KeyCode::Left, _) => self.input.left(),
            (KeyCode::Right, _) => self.input.right(),
            (KeyCode::Home, _) => self.input.home(),
            (KeyCode::End, _) => self.input.end(),
            (KeyCode::Backspace, _) => self.input.backspace(),
            (KeyCode::Delete, _) => self.input.delete(),
            (KeyCode::Esc, _) => self.input.clear(),
            (KeyCode::Char(ch), _) => self.input.insert(ch),
            _ => return None,
        }
        self.dirty = true;
        None
    }

    fn route_submit(&mut self, line: String) {
        let s = line.trim().to_string();
        if s.is_empty() {
            return;
        }

        if is_command(&s) {
            self.handle_command(parse_command(&s));
            return;
        }

        // Drafts are only queued when an activation will consume them.
        if !self.send.is_armed() {
            self.set_notice(
                format!(
                    "× #{} is not armed (page {})",
                    self.ids.send_control,
                    page_label(self.page)
                ),
                styles::error(),
            );
            return;
        }

        self.compose.submit(s);
        let started = self.send.click();
        self.in_flight = self.in_flight.saturating_add(started as u32);
        self.notice = None;
        self.dirty = true;
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.shutdown.cancel(),
            Command::Help => self.set_notice(
                "Enter posts · ↑/↓ PgUp/PgDn scroll · Esc clears · /quit or Ctrl-C exits",
                styles::notice(),
            ),
            Command::Unknown(s) => {
                self.set_notice(format!("× Unknown command: {s}"), styles::error())
            }
        }
    }
}

fn page_label(state: PageState) -> &'static str {
    match state {
        PageState::Pending => "Waiting",
        PageState::Loading => "Loading",
        PageState::Initialized => "Ready",
        PageState::Failed => "Failed",
    }
}
