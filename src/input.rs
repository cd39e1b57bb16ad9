use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a key counts as held after its last press when the terminal
/// never reports key releases. Must outlast the OS key-repeat delay.
const HOLD_LATCH: Duration = Duration::from_millis(700);

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Fire,
    PauseToggle,
    Confirm,
    Restart,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::Fire,
        Action::PauseToggle,
        Action::Confirm,
        Action::Restart,
    ];

    pub fn get_name(&self) -> &'static str {
        match self {
            Action::MoveUp => "move-up",
            Action::MoveDown => "move-down",
            Action::Fire => "fire",
            Action::PauseToggle => "pause-toggle",
            Action::Confirm => "confirm",
            Action::Restart => "restart",
        }
    }

    /// Looks up an action by its name. Unknown names yield None.
    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.get_name() == name)
    }

    /// One-shot actions trigger once per press instead of acting while held
    pub fn is_oneshot(&self) -> bool {
        matches!(
            self,
            Action::PauseToggle | Action::Confirm | Action::Restart
        )
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HeldKeys {
    up: bool,
    down: bool,
    fire: bool,
}

/// Per-frame input read by the simulation: held actions plus the one-shot
/// actions pressed since the last frame, in press order.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HeldKeys,
    pressed: Vec<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an action going down (`active = true`) or up
    pub fn set(&mut self, action: Action, active: bool) {
        match action {
            Action::MoveUp => self.held.up = active,
            Action::MoveDown => self.held.down = active,
            Action::Fire => self.held.fire = active,
            Action::PauseToggle | Action::Confirm | Action::Restart => {
                if active && !self.pressed.contains(&action) {
                    self.pressed.push(action);
                }
            }
        }
    }

    /// Same as [`InputState::set`] but by action name. Returns false for unknown names.
    pub fn set_named(&mut self, name: &str, active: bool) -> bool {
        match Action::from_name(name) {
            Some(action) => {
                self.set(action, active);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.held.up,
            Action::MoveDown => self.held.down,
            Action::Fire => self.held.fire,
            _ => false,
        }
    }

    pub fn pressed(&self) -> &[Action] {
        &self.pressed
    }

    pub fn clear_pressed(&mut self) {
        self.pressed.clear();
    }

    pub fn release_all(&mut self) {
        self.held = HeldKeys::default();
        self.pressed.clear();
    }
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    state: InputState,
    quit_requested: bool,
    /// Whether the terminal sends key release events
    reports_release: bool,
    last_press: HashMap<Action, Instant>,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            state: InputState::new(),
            quit_requested: false,
            reports_release,
            last_press: HashMap::new(),
        }
    }

    /// Polls for all pending terminal events without blocking.
    /// Should be called once per frame before reading [`InputManager::input`].
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        // Clear previous one-shot actions
        self.state.clear_pressed();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, Instant::now()),
                Event::FocusLost => self.handle_focus_lost(),
                _ => {}
            }
        }

        if !self.reports_release {
            self.expire_latched(Instant::now());
        }

        Ok(())
    }

    /// Processes a key event and updates held and one-shot state
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        if key_event.kind == KeyEventKind::Press && is_quit_key(&key_event) {
            self.quit_requested = true;
            return;
        }

        let Some(action) = map_key(key_event.code) else {
            return;
        };

        match key_event.kind {
            KeyEventKind::Press => {
                self.state.set(action, true);
                self.last_press.insert(action, now);
            }
            // Repeats keep held keys alive but must not re-trigger one-shots
            KeyEventKind::Repeat if !action.is_oneshot() => {
                self.state.set(action, true);
                self.last_press.insert(action, now);
            }
            KeyEventKind::Release => {
                self.state.set(action, false);
                self.last_press.remove(&action);
            }
            _ => {}
        }
    }

    /// Key releases never arrive once the terminal loses focus, so drop
    /// everything that is currently held
    pub fn handle_focus_lost(&mut self) {
        self.state.release_all();
        self.last_press.clear();
    }

    /// Releases held actions whose last press is older than the latch window
    fn expire_latched(&mut self, now: Instant) {
        let state = &mut self.state;
        self.last_press.retain(|action, pressed_at| {
            let alive = now.saturating_duration_since(*pressed_at) < HOLD_LATCH;
            if !alive && !action.is_oneshot() {
                state.set(*action, false);
            }
            alive
        });
    }

    pub fn input(&self) -> &InputState {
        &self.state
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn is_quit_key(key_event: &KeyEvent) -> bool {
    matches!(
        key_event.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL))
}

fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::PauseToggle),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}
