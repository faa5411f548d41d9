use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures this file and a real position.
///
/// **WHY THIS MATTERS**: Every error in the workspace embeds an ErrorLocation. If capture
/// breaks, every session and decode error loses its debugging value.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated or if
/// file/line/column extraction breaks.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Creating ErrorLocation from the current caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(location.file.contains("error_location.rs"));
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the "[file:line:column]" Display format.
///
/// **WHY THIS MATTERS**: Error messages end with this suffix; log scrapers and humans both
/// rely on it.
///
/// **BUG THIS CATCHES**: Would catch if brackets or separators are dropped from Display.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A location
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Bracketed, two colons, includes line
    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert!(formatted.contains(&location.line.to_string()));
    assert_eq!(formatted.matches(':').count(), 2);
}

/// **VALUE**: Verifies `#[track_caller]` gives distinct lines for distinct call sites.
///
/// **WHY THIS MATTERS**: Error constructors are `#[track_caller]`; without propagation every
/// error would point at the constructor instead of the failing site.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[track_caller]` from helper constructors.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    let loc1 = capture_location();
    let loc2 = capture_location();

    assert_eq!(loc1.file, loc2.file);
    assert_eq!(loc1.line + 1, loc2.line, "Lines should be sequential");
}

/// **VALUE**: Verifies `file_name()` strips directories.
///
/// **BUG THIS CATCHES**: Would catch a split on the wrong separator.
#[test]
fn given_nested_path_when_file_name_called_then_returns_last_component() {
    let location = ErrorLocation {
        file: "backend/client-core/src/session/mod.rs",
        line: 1,
        column: 1,
    };

    assert_eq!(location.file_name(), "mod.rs");
}
