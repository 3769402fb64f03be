mod tests {
    use myrtio_badge::animation::{
        AnimationDescriptor, AnimationId, AnimationSlot, CROSSFADE_COMPLETE, CROSSFADE_STEP,
        Frame, SPARKLE_ACTIVE_GROUPS, SparkleState,
    };
    use myrtio_badge::channel_buffer::ChannelBuffer;
    use myrtio_badge::color::{Rgb, lerp};
    use myrtio_badge::flags::Palette;
    use myrtio_badge::rng::Rng;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    struct Harness {
        palette: Palette,
        current_color: usize,
        rng: Rng,
        buffer: ChannelBuffer,
        slot: AnimationSlot,
    }

    impl Harness {
        fn new(colors: &[Rgb], descriptor: AnimationDescriptor) -> Self {
            Self {
                palette: Palette::new(colors).unwrap(),
                current_color: 0,
                rng: Rng::new(0x5EED),
                buffer: ChannelBuffer::new(),
                slot: descriptor.to_slot(),
            }
        }

        fn step(&mut self) -> bool {
            let mut frame = Frame {
                palette: &self.palette,
                current_color: &mut self.current_color,
                rng: &mut self.rng,
                buffer: &mut self.buffer,
            };
            self.slot.step(&mut frame)
        }

        fn sparkle_state(&self) -> SparkleState {
            match &self.slot {
                AnimationSlot::Sparkle(sparkle) => sparkle.state(),
                _ => panic!("not a sparkle slot"),
            }
        }

        fn active_groups(&self) -> Vec<u8> {
            match &self.slot {
                AnimationSlot::Sparkle(sparkle) => sparkle.active_groups().to_vec(),
                _ => panic!("not a sparkle slot"),
            }
        }

        fn drain(&mut self) -> Vec<Rgb> {
            std::iter::from_fn(|| self.buffer.pop()).collect()
        }
    }

    #[test]
    fn test_animation_id_parse() {
        assert_eq!(AnimationId::parse_from_str("fade"), AnimationId::Fade);
        assert_eq!(AnimationId::parse_from_str("sweep"), AnimationId::Sweep);
        assert_eq!(AnimationId::parse_from_str("sparkle"), AnimationId::Sparkle);
        assert_eq!(AnimationId::parse_from_str("wobble"), AnimationId::Unknown);
        assert_eq!(AnimationId::Sparkle.as_str(), "sparkle");
    }

    #[test]
    fn test_descriptor_to_slot() {
        let slot = AnimationDescriptor::new(AnimationId::Sweep, true, false).to_slot();
        assert_eq!(slot.id(), AnimationId::Sweep);
        let slot = AnimationDescriptor::new(AnimationId::Unknown, false, false).to_slot();
        assert!(matches!(slot, AnimationSlot::Unknown));
    }

    #[test]
    fn test_fade_index_wraps() {
        for len in 1..=5 {
            let colors: Vec<Rgb> = (0..len).map(|i| Rgb::new(i as u8, 0, 0)).collect();
            let mut harness =
                Harness::new(&colors, AnimationDescriptor::new(AnimationId::Fade, false, false));
            for n in 1..=12 {
                assert!(harness.step());
                assert_eq!(harness.current_color, n % len);
            }
        }
    }

    #[test]
    fn test_fade_fills_every_group_with_new_color() {
        let mut harness = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Fade, true, false),
        );
        harness.step();
        let frame = harness.drain();
        assert_eq!(frame.len(), 6);
        assert!(frame.iter().all(|&c| c == GREEN));
    }

    #[test]
    fn test_sweep_matches_fade() {
        let mut fade = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Fade, false, false),
        );
        let mut sweep = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Sweep, false, false),
        );
        for _ in 0..5 {
            fade.step();
            sweep.step();
            assert_eq!(fade.drain(), sweep.drain());
            assert_eq!(fade.current_color, sweep.current_color);
        }
    }

    #[test]
    fn test_unknown_style_is_noop() {
        let mut harness = Harness::new(
            &[RED, GREEN],
            AnimationDescriptor::new(AnimationId::Unknown, true, true),
        );
        harness.buffer.push(BLUE);
        assert!(!harness.step());
        assert_eq!(harness.current_color, 0);
        assert_eq!(harness.drain(), vec![BLUE]);
    }

    #[test]
    fn test_sparkle_picks_three_distinct_groups() {
        let mut harness = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Sparkle, false, false),
        );
        for _ in 0..50 {
            harness.step();
            let mut active = harness.active_groups();
            assert_eq!(active.len(), SPARKLE_ACTIVE_GROUPS);
            active.sort_unstable();
            active.dedup();
            assert_eq!(active.len(), SPARKLE_ACTIVE_GROUPS);
            assert!(active.iter().all(|&g| g < 7));
            harness.drain();
        }
    }

    #[test]
    fn test_sparkle_without_fade_advances_every_tick() {
        let mut harness = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Sparkle, false, true),
        );
        let mut expected_fill = RED;
        for n in 1..=7 {
            harness.step();
            assert_eq!(harness.current_color, n % 3);
            assert_eq!(harness.sparkle_state(), SparkleState::Idle);

            let active = harness.active_groups();
            // Group 0 is evicted by the six-entry buffer
            for (i, color) in harness.drain().into_iter().enumerate() {
                let group = (i + 1) as u8;
                let want = if active.contains(&group) {
                    expected_fill
                } else {
                    BLACK
                };
                assert_eq!(color, want);
            }
            expected_fill = [RED, GREEN, BLUE][n % 3];
        }
    }

    #[test]
    fn test_sparkle_crossfade_progress() {
        let mut harness = Harness::new(
            &[RED, GREEN, BLUE],
            AnimationDescriptor::new(AnimationId::Sparkle, true, true),
        );

        harness.step();
        assert_eq!(
            harness.sparkle_state(),
            SparkleState::Crossfading { progress: 0 }
        );
        assert_eq!(harness.current_color, 0);
        let active = harness.active_groups();
        harness.drain();

        let mut last = 0u8;
        loop {
            harness.step();
            // Active set is kept for the whole crossfade
            assert_eq!(harness.active_groups(), active);
            match harness.sparkle_state() {
                SparkleState::Crossfading { progress } => {
                    assert_eq!(progress, last + CROSSFADE_STEP);
                    assert!(progress < CROSSFADE_COMPLETE);

                    let pct = f32::from(progress) / 100.0;
                    let fill = lerp(RED, GREEN, pct).to_rgb();
                    let frame = harness.drain();
                    for group in active.iter().filter(|&&g| g > 0) {
                        assert_eq!(frame[usize::from(*group) - 1], fill);
                    }
                    last = progress;
                }
                SparkleState::Idle => {
                    assert_eq!(last + CROSSFADE_STEP, CROSSFADE_COMPLETE);
                    break;
                }
            }
        }
        assert_eq!(harness.current_color, 1);
    }

    #[test]
    fn test_sparkle_crossfade_to_black() {
        let mut harness = Harness::new(
            &[RED, GREEN],
            AnimationDescriptor::new(AnimationId::Sparkle, true, false),
        );
        // Pick, then crossfade until committed
        for _ in 0..6 {
            harness.step();
        }
        let active = harness.active_groups();
        let frame = harness.drain();
        // Final crossfade frame has fully faded out
        assert!(frame.iter().all(|&c| c == BLACK));
        assert!(!active.is_empty());
        assert_eq!(harness.current_color, 1);
        assert_eq!(harness.sparkle_state(), SparkleState::Idle);
    }

    #[test]
    fn test_sparkle_next_color_wraps() {
        let mut harness = Harness::new(
            &[RED, BLUE],
            AnimationDescriptor::new(AnimationId::Sparkle, true, true),
        );
        // Two full cycles: pick + five crossfade ticks each
        for _ in 0..12 {
            harness.step();
            harness.drain();
        }
        assert_eq!(harness.current_color, 0);
    }

    #[test]
    fn test_slot_reset_returns_to_idle() {
        let mut harness = Harness::new(
            &[RED, GREEN],
            AnimationDescriptor::new(AnimationId::Sparkle, true, true),
        );
        harness.step();
        harness.step();
        harness.slot.reset();
        assert_eq!(harness.sparkle_state(), SparkleState::Idle);
        assert!(harness.active_groups().is_empty());
    }
}
