use bevy_ecs::prelude::*;

/// Change notifications raised by the engine, buffered in `Events<GameEvent>`
/// right after the mutation that caused them.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Rendered cells changed: a move, rotation, lock or line clear.
    BoardChanged,
    /// A new active piece (and next piece) was spawned.
    PieceChanged,
    ScoreChanged(u32),
    LevelChanged(u32),
    LinesChanged(u32),
    GameOver,
}

pub(crate) fn emit(world: &mut World, event: GameEvent) {
    log::trace!("Emitting {event:?}");
    world.send_event(event);
}

pub(crate) fn drain(world: &mut World) -> Vec<GameEvent> {
    let Some(mut events) = world.get_resource_mut::<Events<GameEvent>>() else {
        return Vec::new();
    };
    events.drain().collect()
}
