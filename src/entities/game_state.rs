/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Waiting for the first start trigger
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until an explicit restart
    GameOver,
}

impl GameState {
    /// Whether the simulation advances on a tick in this state
    pub fn is_simulating(&self) -> bool {
        *self == GameState::Running
    }
}
