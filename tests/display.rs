mod common;

mod tests {
    use myrtio_badge::display::{DisplayDriver, Panel};
    use myrtio_badge::font::encode;

    use crate::common::{PinId, Strobe, decode_strobes, display_pins};

    #[test]
    fn test_new_parks_pins() {
        let (pins, log) = display_pins();
        let _display = DisplayDriver::new(pins).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                (PinId::A0, false),
                (PinId::A1, false),
                (PinId::Wr0, true),
                (PinId::Wr1, true),
            ]
        );
    }

    #[test]
    fn test_print_char_strobes_one_display() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        log.borrow_mut().clear();

        display.print_char(Panel::First, 'A', 2).unwrap();

        let log = log.borrow();
        assert_eq!(
            decode_strobes(&log),
            vec![Strobe {
                panel: 0,
                address: 2,
                pattern: encode(b'A'),
            }]
        );
        // Write enable wraps the latch pulse; the other display is untouched
        assert_eq!(
            &log[log.len() - 4..],
            &[
                (PinId::Wr0, false),
                (PinId::Latch, true),
                (PinId::Latch, false),
                (PinId::Wr0, true),
            ]
        );
        assert!(!log.iter().any(|&(id, _)| id == PinId::Wr1));
        assert_eq!(log.iter().filter(|&&(id, l)| id == PinId::Clock && l).count(), 7);
    }

    #[test]
    fn test_position_four_keeps_address_lines() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        display.print_char(Panel::Second, 'x', 3).unwrap();
        display.print_char(Panel::Second, 'y', 4).unwrap();
        display.print_char(Panel::Second, 'z', 1).unwrap();
        display.print_char(Panel::Second, 'w', 4).unwrap();

        let addresses: Vec<u8> = decode_strobes(&log.borrow())
            .iter()
            .map(|s| s.address)
            .collect();
        assert_eq!(addresses, vec![3, 3, 1, 1]);
    }

    #[test]
    fn test_five_characters_fill_last_position() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        display.print_text(Panel::First, "their").unwrap();

        let strobes = decode_strobes(&log.borrow());
        let addresses: Vec<u8> = strobes.iter().map(|s| s.address).collect();
        assert_eq!(addresses, vec![0, 1, 2, 3, 3]);
        // The first character is the last one written, so it stays visible
        assert_eq!(strobes[4].pattern, encode(b't'));
        assert_eq!(strobes[0].pattern, encode(b'r'));
    }

    #[test]
    fn test_print_text_right_aligned() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        display.print_text(Panel::Second, "she").unwrap();

        let strobes = decode_strobes(&log.borrow());
        let expected: Vec<Strobe> = [(0, b'e'), (1, b'h'), (2, b's')]
            .into_iter()
            .map(|(address, ch)| Strobe {
                panel: 1,
                address,
                pattern: encode(ch),
            })
            .collect();
        assert_eq!(strobes, expected);
    }

    #[test]
    fn test_print_text_truncates_to_positions() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        display.print_text(Panel::First, "abcdefg").unwrap();

        let patterns: Vec<u8> = decode_strobes(&log.borrow())
            .iter()
            .map(|s| s.pattern)
            .collect();
        let expected: Vec<u8> = b"gfedc".iter().map(|&c| encode(c)).collect();
        assert_eq!(patterns, expected);
    }

    #[test]
    fn test_clear_display() {
        let (pins, log) = display_pins();
        let mut display = DisplayDriver::new(pins).unwrap();
        display.clear_display(Panel::First).unwrap();

        let strobes = decode_strobes(&log.borrow());
        assert_eq!(strobes.len(), 5);
        assert!(strobes.iter().all(|s| s.pattern == encode(b' ') && s.panel == 0));
        let addresses: Vec<u8> = strobes.iter().map(|s| s.address).collect();
        assert_eq!(addresses, vec![0, 1, 2, 3, 3]);
    }
}
