/// Something noteworthy that happened during a tick or a state transition.
///
/// The simulation only records these; audio and logging react to them after
/// the tick returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    ShotFired,
    /// Enemy removed by a bullet, at its last position
    EnemyDestroyed { x: f32, y: f32 },
    /// Enemy rammed the player
    PlayerHit { lives: u32 },
    GameOver,
}
