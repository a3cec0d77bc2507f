use interrupt_trace::parser::{parse_line, read_trace, TraceEvent};
use interrupt_trace::utils::error::ParseError;
use std::io::Cursor;

#[test]
fn test_both_delimiters_supported() {
    for line in ["SYSCALL, 2", "SYSCALL 2", "SYSCALL,2", "SYSCALL ,  2"] {
        assert_eq!(parse_line(line).unwrap(), TraceEvent::SyscallDevice(2), "{}", line);
    }
}

#[test]
fn test_label_mapping() {
    assert_eq!(parse_line("CPU, 50").unwrap(), TraceEvent::CpuBurst(50));
    assert_eq!(parse_line("END_IO, 11").unwrap(), TraceEvent::EndIoDevice(11));
    assert_eq!(
        parse_line("EXEC, 3").unwrap(),
        TraceEvent::Unknown("EXEC".to_string())
    );
}

#[test]
fn test_malformed_lines() {
    assert!(matches!(parse_line("FOO"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(parse_line("CPU,"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(
        parse_line("SYSCALL, two"),
        Err(ParseError::InvalidOperand { .. })
    ));
    assert!(matches!(
        parse_line("CPU, 1.5"),
        Err(ParseError::InvalidOperand { .. })
    ));
}

#[test]
fn test_event_display_round_trips_labels() {
    let event = TraceEvent::SyscallDevice(7);
    assert_eq!(event.to_string(), "SYSCALL, 7");
    assert_eq!(parse_line(&event.to_string()).unwrap(), event);
}

#[test]
fn test_read_trace_keeps_blank_lines_for_numbering() {
    let lines = read_trace(Cursor::new("CPU, 1\n\nEND_IO, 0")).unwrap();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].is_blank());
    assert_eq!(lines[2].number, 3);
    assert_eq!(lines[2].text, "END_IO, 0");
}
