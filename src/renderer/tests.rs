// src/renderer/tests.rs

#[cfg(test)]
mod render_tests {
    use crate::buffer::TextBuffer;
    use crate::os::mock::MockTerminal;
    use crate::renderer::*;
    use crate::viewport::{CursorState, ViewportState};
    use test_log::test; // For logging within tests

    fn style() -> RenderStyle {
        RenderStyle {
            placeholder: b"~".to_vec(),
            welcome_message: b"hi".to_vec(),
        }
    }

    fn buffer_of(lines: &[&str]) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for line in lines {
            buffer.append_row(line.as_bytes());
        }
        buffer
    }

    /// The text of each screen row, with the frame's control sequences removed.
    fn screen_lines(frame: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(frame).into_owned();
        let body = text
            .strip_prefix("\x1b[?25l\x1b[H")
            .expect("frame starts by hiding and homing the cursor");
        let end = body.rfind("\x1b[K").expect("at least one row") + 3;
        body[..end]
            .split("\r\n")
            .map(|line| {
                line.strip_suffix("\x1b[K")
                    .expect("every row ends with clear-to-eol")
                    .to_string()
            })
            .collect()
    }

    fn cursor_suffix(frame: &[u8]) -> String {
        let text = String::from_utf8_lossy(frame).into_owned();
        let start = text.rfind("\x1b[K").unwrap() + 3;
        text[start..].to_string()
    }

    #[test]
    fn draws_rows_and_placeholders() {
        let buffer = buffer_of(&["alpha", "beta"]);
        let frame = render_frame(
            &buffer,
            &ViewportState::new(4, 10),
            CursorState::default(),
            &style(),
        );
        assert_eq!(screen_lines(&frame), vec!["alpha", "beta", "~", "~"]);
        assert_eq!(cursor_suffix(&frame), "\x1b[1;1H\x1b[?25h");
    }

    #[test]
    fn last_row_has_no_trailing_line_break() {
        let buffer = buffer_of(&["x"]);
        let frame = render_frame(
            &buffer,
            &ViewportState::new(3, 10),
            CursorState::default(),
            &style(),
        );
        let text = String::from_utf8(frame).unwrap();
        assert_eq!(text.matches("\r\n").count(), 2);
        assert_eq!(text.matches("\x1b[K").count(), 3);
    }

    #[test]
    fn rows_are_clipped_to_screen_width_and_horizontal_offset() {
        let buffer = buffer_of(&["0123456789", "ab", ""]);
        let viewport = ViewportState {
            row_offset: 0,
            col_offset: 3,
            screen_rows: 3,
            screen_cols: 4,
        };
        let frame = render_frame(&buffer, &viewport, CursorState::new(0, 3), &style());
        assert_eq!(screen_lines(&frame), vec!["3456", "", ""]);
        assert_eq!(cursor_suffix(&frame), "\x1b[1;1H\x1b[?25h");
    }

    #[test]
    fn vertical_offset_selects_rows() {
        let buffer = buffer_of(&["r0", "r1", "r2", "r3"]);
        let viewport = ViewportState {
            row_offset: 2,
            ..ViewportState::new(3, 10)
        };
        let frame = render_frame(&buffer, &viewport, CursorState::new(3, 1), &style());
        assert_eq!(screen_lines(&frame), vec!["r2", "r3", "~"]);
        assert_eq!(cursor_suffix(&frame), "\x1b[2;2H\x1b[?25h");
    }

    #[test]
    fn empty_buffer_shows_centered_welcome_at_one_third() {
        let frame = render_frame(
            &TextBuffer::new(),
            &ViewportState::new(6, 10),
            CursorState::default(),
            &style(),
        );
        assert_eq!(screen_lines(&frame), vec!["~", "~", "~   hi", "~", "~", "~"]);
    }

    #[test]
    fn welcome_banner_is_clipped_to_narrow_screens() {
        let style = RenderStyle {
            placeholder: b"~".to_vec(),
            welcome_message: b"a long welcome".to_vec(),
        };
        let frame = render_frame(
            &TextBuffer::new(),
            &ViewportState::new(3, 5),
            CursorState::default(),
            &style,
        );
        assert_eq!(screen_lines(&frame), vec!["~", "a lon", "~"]);
    }

    #[test]
    fn welcome_banner_only_for_empty_buffer() {
        let buffer = buffer_of(&["text"]);
        let frame = render_frame(
            &buffer,
            &ViewportState::new(6, 10),
            CursorState::default(),
            &style(),
        );
        assert_eq!(screen_lines(&frame), vec!["text", "~", "~", "~", "~", "~"]);
    }

    #[test]
    fn identical_inputs_render_identical_frames() {
        let buffer = buffer_of(&["one", "two", "three"]);
        let viewport = ViewportState {
            row_offset: 1,
            col_offset: 1,
            screen_rows: 5,
            screen_cols: 3,
        };
        let cursor = CursorState::new(2, 2);
        let first = render_frame(&buffer, &viewport, cursor, &style());
        let second = render_frame(&buffer, &viewport, cursor, &style());
        assert_eq!(first, second);
    }

    #[test]
    fn flush_issues_exactly_one_write() {
        let buffer = buffer_of(&["one", "two"]);
        let frame = render_frame(
            &buffer,
            &ViewportState::new(24, 80),
            CursorState::default(),
            &style(),
        );
        let mut io = MockTerminal::new();
        flush(&mut io, &frame).unwrap();
        assert_eq!(io.frames().len(), 1);
        assert_eq!(io.last_frame(), Some(frame.as_slice()));
    }

    #[test]
    fn clear_screen_writes_once() {
        let mut io = MockTerminal::new();
        clear_screen(&mut io).unwrap();
        assert_eq!(io.frames(), &[b"\x1b[2J\x1b[H".to_vec()]);
    }

    #[test]
    fn append_buffer_accumulates() {
        let mut out = AppendBuffer::default();
        assert!(out.is_empty());
        out.append(b"ab");
        out.append(b"c");
        assert_eq!(out.len(), 3);
        assert_eq!(out.into_bytes(), b"abc");
    }
}
