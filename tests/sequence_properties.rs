//! Property tests for frame sequences and their encodings.

use proptest::prelude::*;

use pixel_strip::{
    FrameGrid, FrameSequence, ShiftDirection,
    animation::{decode_sequence_json, encode_sequence_json},
    frame::{FRAME_HEIGHT, FRAME_WIDTH, MAX_FRAMES},
};

fn frame_strategy() -> impl Strategy<Value = FrameGrid> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), FRAME_HEIGHT), FRAME_WIDTH)
        .prop_map(|columns| FrameGrid::try_from(columns).unwrap())
}

fn sequence_strategy() -> impl Strategy<Value = FrameSequence> {
    prop::collection::vec(frame_strategy(), 1..12)
        .prop_map(|frames| FrameSequence::from_frames(frames).unwrap())
}

proptest! {
    #[test]
    fn json_roundtrip_preserves_frames(sequence in sequence_strategy()) {
        let bytes = encode_sequence_json(&sequence).unwrap();
        let decoded = decode_sequence_json(&bytes).unwrap();
        prop_assert_eq!(decoded.frames(), sequence.frames());
    }

    #[test]
    fn horizontal_shift_is_invertible(frame in frame_strategy()) {
        let mut sequence = FrameSequence::with_frame(frame.clone());
        sequence.shift(ShiftDirection::Left);
        sequence.shift(ShiftDirection::Right);
        prop_assert_eq!(sequence.current_frame(), &frame);

        sequence.shift(ShiftDirection::Right);
        sequence.shift(ShiftDirection::Left);
        prop_assert_eq!(sequence.current_frame(), &frame);
    }

    #[test]
    fn vertical_shift_loses_top_row(frame in frame_strategy(), x in 0..FRAME_WIDTH) {
        let mut frame = frame;
        frame.set(x, 0, true).unwrap();

        let mut sequence = FrameSequence::with_frame(frame.clone());
        sequence.shift(ShiftDirection::Up);
        sequence.shift(ShiftDirection::Down);
        prop_assert_ne!(sequence.current_frame(), &frame);
        prop_assert_eq!(sequence.current_frame().get(x, 0), Ok(false));
    }

    #[test]
    fn vertical_shift_loses_bottom_row(frame in frame_strategy(), x in 0..FRAME_WIDTH) {
        let mut frame = frame;
        frame.set(x, FRAME_HEIGHT - 1, true).unwrap();

        let mut sequence = FrameSequence::with_frame(frame.clone());
        sequence.shift(ShiftDirection::Down);
        sequence.shift(ShiftDirection::Up);
        prop_assert_ne!(sequence.current_frame(), &frame);
    }

    #[test]
    fn delete_shrinks_and_keeps_cursor_valid(
        sequence in sequence_strategy(),
        moves in 0usize..20,
    ) {
        let mut sequence = sequence;
        for _ in 0..moves {
            sequence.advance();
        }
        let before = sequence.len();
        let changed = sequence.delete_current();

        if before == 1 {
            prop_assert!(!changed);
            prop_assert_eq!(sequence.len(), 1);
        } else {
            prop_assert!(changed);
            prop_assert_eq!(sequence.len(), before - 1);
            prop_assert!(sequence.current_index() <= before - 2);
        }
    }

    #[test]
    fn navigation_stays_in_range(
        sequence in sequence_strategy(),
        steps in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut sequence = sequence;
        for forward in steps {
            if forward {
                sequence.advance();
            } else {
                sequence.retreat();
            }
            prop_assert!(sequence.current_index() < sequence.len());
        }
    }
}

#[test]
fn clone_at_capacity_leaves_sequence_unchanged() {
    let mut sequence = FrameSequence::new();
    sequence.current_frame_mut().set(7, 7, true).unwrap();
    while sequence.clone_current_to_end() {}
    assert_eq!(sequence.len(), MAX_FRAMES);

    sequence.retreat();
    sequence.current_frame_mut().set(0, 0, true).unwrap();
    let before = sequence.clone();
    assert!(!sequence.clone_current_to_end());
    assert_eq!(sequence, before);
}
