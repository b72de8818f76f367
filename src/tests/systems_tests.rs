#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{
        ActivePiece, Board, GameState, NextPiece, Position, Rotation, TetrominoType,
    };
    use crate::events::{self, GameEvent};
    use crate::systems::{
        hard_drop, move_tetromino, reset_world, rotate_tetromino, shadow_position, soft_drop,
        spawn_tetromino,
    };
    use crate::tests::test_utils::{
        create_test_world, fill_row_except, occupied_count, place_piece, set_next_piece,
    };

    #[test]
    fn test_setup_world_resources() {
        let world = create_test_world();

        assert!(world.contains_resource::<Board>());
        assert!(world.contains_resource::<GameState>());
        assert!(world.contains_resource::<NextPiece>());
        assert!(!world.contains_resource::<ActivePiece>());
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut world = create_test_world();
        set_next_piece(&mut world, TetrominoType::T);

        assert!(spawn_tetromino(&mut world));

        let piece = world.resource::<ActivePiece>();
        assert_eq!(piece.tetromino.tetromino_type, TetrominoType::T);
        assert_eq!(piece.tetromino.rotation, Rotation::North);
        assert_eq!(piece.position, Position { x: 4, y: 0 });
        assert_eq!(piece.color, TetrominoType::T.get_color());

        assert_eq!(events::drain(&mut world), vec![GameEvent::PieceChanged]);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut world = create_test_world();
        world.resource_mut::<Board>().set(4, 0, true);
        set_next_piece(&mut world, TetrominoType::O);

        assert!(!spawn_tetromino(&mut world));
        assert!(world.resource::<GameState>().game_over);
        assert_eq!(
            events::drain(&mut world),
            vec![GameEvent::PieceChanged, GameEvent::GameOver]
        );
    }

    #[test]
    fn test_move_against_walls() {
        let mut world = create_test_world();
        place_piece(&mut world, TetrominoType::O, 0, 5);

        // Left wall blocks
        assert!(!move_tetromino(&mut world, -1));
        assert_eq!(
            world.resource::<ActivePiece>().position,
            Position { x: 0, y: 5 }
        );
        assert!(events::drain(&mut world).is_empty());

        assert!(move_tetromino(&mut world, 1));
        assert_eq!(
            world.resource::<ActivePiece>().position,
            Position { x: 1, y: 5 }
        );
        assert_eq!(events::drain(&mut world), vec![GameEvent::BoardChanged]);

        // O is two wide, so x = 8 is the rightmost anchor
        place_piece(&mut world, TetrominoType::O, 8, 5);
        assert!(!move_tetromino(&mut world, 1));
    }

    #[test]
    fn test_move_blocked_by_locked_cells() {
        let mut world = create_test_world();
        world.resource_mut::<Board>().set(3, 6, true);
        place_piece(&mut world, TetrominoType::O, 4, 5);

        assert!(!move_tetromino(&mut world, -1));
        assert!(move_tetromino(&mut world, 1));
    }

    #[test]
    fn test_moves_ignored_while_paused() {
        let mut world = create_test_world();
        place_piece(&mut world, TetrominoType::O, 4, 5);
        world.resource_mut::<GameState>().paused = true;

        assert!(!move_tetromino(&mut world, 1));
        assert!(!rotate_tetromino(&mut world));
        assert!(soft_drop(&mut world).is_none());
        assert!(hard_drop(&mut world).is_none());
        assert_eq!(
            world.resource::<ActivePiece>().position,
            Position { x: 4, y: 5 }
        );
    }

    #[test]
    fn test_rotate_rejected_at_wall() {
        let mut world = create_test_world();
        place_piece(&mut world, TetrominoType::I, 0, 5);

        // East orientation extends left of the anchor, into the wall
        assert!(!rotate_tetromino(&mut world));
        assert_eq!(
            world.resource::<ActivePiece>().tetromino.rotation,
            Rotation::North
        );

        place_piece(&mut world, TetrominoType::I, 4, 5);
        assert!(rotate_tetromino(&mut world));
        let piece = world.resource::<ActivePiece>();
        assert_eq!(piece.tetromino.rotation, Rotation::East);
        assert_eq!(piece.position, Position { x: 4, y: 5 });
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut world = create_test_world();
        place_piece(&mut world, TetrominoType::O, 4, 17);

        assert!(soft_drop(&mut world).is_none());
        assert_eq!(
            world.resource::<ActivePiece>().position,
            Position { x: 4, y: 18 }
        );

        // Resting on the floor, so the next step locks
        let outcome = soft_drop(&mut world).expect("piece should lock");
        assert!(!outcome.game_over);
        assert_eq!(outcome.line_clear.lines, 0);

        let board = world.resource::<Board>();
        assert!(board.is_occupied(4, 18));
        assert!(board.is_occupied(5, 19));
        assert_eq!(occupied_count(board), 4);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut world = create_test_world();
        set_next_piece(&mut world, TetrominoType::O);
        place_piece(&mut world, TetrominoType::I, 4, 0);

        let outcome = hard_drop(&mut world).expect("piece should lock");
        assert!(!outcome.game_over);

        let board = world.resource::<Board>();
        for y in 16..20 {
            assert!(board.is_occupied(4, y));
        }
        assert_eq!(occupied_count(board), 4);

        // The next piece took over at the spawn anchor
        let piece = world.resource::<ActivePiece>();
        assert_eq!(piece.tetromino.tetromino_type, TetrominoType::O);
        assert_eq!(piece.position, Position { x: 4, y: 0 });
    }

    #[test]
    fn test_hard_drop_lands_on_stack() {
        let mut world = create_test_world();
        world.resource_mut::<Board>().set(4, 10, true);
        place_piece(&mut world, TetrominoType::I, 4, 0);

        hard_drop(&mut world);

        let board = world.resource::<Board>();
        for y in 6..10 {
            assert!(board.is_occupied(4, y));
        }
    }

    #[test]
    fn test_shadow_position() {
        let mut world = create_test_world();
        assert_eq!(shadow_position(&world), None);

        place_piece(&mut world, TetrominoType::O, 4, 0);
        assert_eq!(shadow_position(&world), Some(Position { x: 4, y: 18 }));

        world.resource_mut::<Board>().set(5, 10, true);
        assert_eq!(shadow_position(&world), Some(Position { x: 4, y: 8 }));

        // Already resting: the shadow is the piece itself
        place_piece(&mut world, TetrominoType::O, 0, 18);
        assert_eq!(shadow_position(&world), Some(Position { x: 0, y: 18 }));
    }

    #[test]
    fn test_lock_event_order() {
        let mut world = create_test_world();
        for y in 16..20 {
            fill_row_except(&mut world.resource_mut::<Board>(), y, &[4]);
        }
        place_piece(&mut world, TetrominoType::I, 4, 0);

        let outcome = hard_drop(&mut world).expect("piece should lock");

        assert_eq!(outcome.line_clear.lines, 4);
        assert_eq!(outcome.line_clear.points, 800);
        assert_eq!(
            events::drain(&mut world),
            vec![
                GameEvent::ScoreChanged(800),
                GameEvent::LinesChanged(4),
                GameEvent::PieceChanged,
                GameEvent::BoardChanged,
            ]
        );
        assert_eq!(occupied_count(world.resource::<Board>()), 0);
    }

    #[test]
    fn test_reset_world() {
        let mut world = create_test_world();
        fill_row_except(&mut world.resource_mut::<Board>(), 19, &[0]);
        place_piece(&mut world, TetrominoType::S, 2, 3);
        {
            let mut game_state = world.resource_mut::<GameState>();
            game_state.score = 500;
            game_state.lines_cleared = 12;
            game_state.level = 2;
        }

        reset_world(&mut world);

        assert_eq!(occupied_count(world.resource::<Board>()), 0);
        assert_eq!(*world.resource::<GameState>(), GameState::default());
        assert!(!world.contains_resource::<ActivePiece>());
        assert_eq!(
            events::drain(&mut world),
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::LevelChanged(1),
                GameEvent::LinesChanged(0),
            ]
        );
    }
}
