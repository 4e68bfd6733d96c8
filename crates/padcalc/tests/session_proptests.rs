//! Property-based tests for the evaluator and the button session

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use padcalc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

fn button_strategy() -> impl Strategy<Value = ButtonEvent> {
    prop_oneof![
        4 => (0u8..=9).prop_map(ButtonEvent::Digit),
        2 => operation_strategy().prop_map(ButtonEvent::Operator),
        1 => Just(ButtonEvent::DecimalPoint),
        1 => Just(ButtonEvent::Evaluate),
        1 => Just(ButtonEvent::Clear),
        1 => Just(ButtonEvent::Backspace),
        1 => Just(ButtonEvent::Percent),
        1 => Just(ButtonEvent::SquareRoot),
        1 => Just(ButtonEvent::ClearHistory),
    ]
}

fn session_after(events: &[ButtonEvent]) -> CalculatorSession {
    let mut session = CalculatorSession::new();
    session.handle_all(events.iter().copied());
    session
}

fn is_valid_result(result: &str) -> bool {
    result == "0" || result == "Error" || result.parse::<f64>().is_ok_and(f64::is_finite)
}

// ===== Evaluator properties =====

proptest! {
    /// `a op b` matches IEEE arithmetic for non-negative literals
    #[test]
    fn prop_binary_matches_f64(
        a in 0.0f64..1e6,
        b in 1e-3f64..1e6,
        op in operation_strategy(),
    ) {
        let expected = match op {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
        };
        let expr = format!("{a}{}{b}", op.symbol());
        prop_assert_eq!(evaluate(&expr), Ok(expected));
    }

    /// `*` and `/` bind tighter than `+` and `-`
    #[test]
    fn prop_precedence(a in 0u32..10_000, b in 0u32..10_000, c in 1u32..10_000) {
        let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(evaluate(&format!("{a}+{b}*{c}")), Ok(a + b * c));
        prop_assert_eq!(evaluate(&format!("{a}-{b}/{c}")), Ok(a - b / c));
    }

    /// Equal precedence groups left to right
    #[test]
    fn prop_left_associative(a in 0u32..10_000, b in 0u32..10_000, c in 0u32..10_000) {
        let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(evaluate(&format!("{a}-{b}-{c}")), Ok((a - b) - c));
    }

    /// Dividing by a literal zero always fails
    #[test]
    fn prop_division_by_zero(a in 0u32..1_000_000) {
        prop_assert_eq!(evaluate(&format!("{a}/0")), Err(CalcError::DivisionByZero));
    }

    /// Arbitrary text never panics and always yields a displayable result
    #[test]
    fn prop_arbitrary_text_is_total(text in "[0-9+*/.() -]{0,24}") {
        let display = evaluate_display(&text);
        prop_assert!(is_valid_result(&display), "{text:?} -> {display:?}");
    }
}

// ===== Session properties =====

proptest! {
    /// Result is always "0", "Error" or a finite number
    #[test]
    fn prop_result_always_valid(events in prop::collection::vec(button_strategy(), 0..40)) {
        let session = session_after(&events);
        prop_assert!(is_valid_result(session.current_result()));
    }

    /// Evaluate grows history by one on success and leaves it alone on failure
    #[test]
    fn prop_evaluate_history_delta(events in prop::collection::vec(button_strategy(), 0..30)) {
        let mut session = session_after(&events);
        let before = session.history_entries().len();
        session.handle(ButtonEvent::Evaluate);
        let after = session.history_entries().len();

        if session.is_error() {
            prop_assert_eq!(after, before);
        } else {
            prop_assert_eq!(after, before + 1);
            let last = session.history_entries().last().unwrap();
            prop_assert_eq!(last.input.as_str(), session.current_input());
            prop_assert_eq!(last.result.as_str(), session.current_result());
        }
    }

    /// Clear twice is the same as clear once
    #[test]
    fn prop_clear_idempotent(events in prop::collection::vec(button_strategy(), 0..30)) {
        let mut once = session_after(&events);
        once.handle(ButtonEvent::Clear);
        let mut twice = once.clone();
        twice.handle(ButtonEvent::Clear);
        prop_assert_eq!(once, twice);
    }

    /// ClearHistory always empties the log and touches nothing else
    #[test]
    fn prop_clear_history(events in prop::collection::vec(button_strategy(), 0..30)) {
        let mut session = session_after(&events);
        let input = session.current_input().to_string();
        let result = session.current_result().to_string();
        session.handle(ButtonEvent::ClearHistory);
        prop_assert!(session.history_entries().is_empty());
        prop_assert_eq!(session.current_input(), input);
        prop_assert_eq!(session.current_result(), result);
    }

    /// Backspace removes exactly one trailing character, or nothing on empty input
    #[test]
    fn prop_backspace(events in prop::collection::vec(button_strategy(), 0..30)) {
        let mut session = session_after(&events);
        let mut expected = session.current_input().to_string();
        expected.pop();
        session.handle(ButtonEvent::Backspace);
        prop_assert_eq!(session.current_input(), expected);
    }

    /// Input-building buttons only ever append
    #[test]
    fn prop_input_buttons_append(
        events in prop::collection::vec(button_strategy(), 0..30),
        d in 0u8..=9,
    ) {
        let mut session = session_after(&events);
        let before = session.current_input().to_string();
        let result = session.current_result().to_string();
        session.handle(ButtonEvent::Digit(d));
        prop_assert_eq!(session.current_input(), format!("{before}{d}"));
        prop_assert_eq!(session.current_result(), result);
    }
}
