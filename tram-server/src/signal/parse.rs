//! Wait-message parsing.

use super::Countdown;

/// Message the provider shows when a vehicle is about to arrive.
const ARRIVING_NOW: &str = "in arrivo";

/// Messages meaning "no estimate right now".
const UPDATING: &[&str] = &["updating", "aggiornamento"];

/// Convert a provider wait message into a countdown.
///
/// The message is trimmed and lower-cased, then:
/// - anything mentioning minutes with a number in it yields that number,
/// - the "arriving now" phrase yields 1 (under two minutes),
/// - everything else, including empty or missing text, is unavailable.
pub fn parse_wait_message(message: Option<&str>) -> Countdown {
    let Some(message) = message else {
        return Countdown::Unavailable;
    };

    let msg = message.trim().to_lowercase();

    if msg.is_empty() || UPDATING.contains(&msg.as_str()) {
        return Countdown::Unavailable;
    }

    if msg == ARRIVING_NOW {
        return Countdown::Minutes(1);
    }

    if msg.contains("min") {
        return first_integer(&msg)
            .map(Countdown::Minutes)
            .unwrap_or(Countdown::Unavailable);
    }

    Countdown::Unavailable
}

/// First run of ASCII digits in `s`, if it fits in a `u32`.
fn first_integer(s: &str) -> Option<u32> {
    s.split(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())
        .and_then(|digits| digits.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes() {
        assert_eq!(parse_wait_message(Some("4 min")), Countdown::Minutes(4));
        assert_eq!(parse_wait_message(Some("12 minutes")), Countdown::Minutes(12));
        assert_eq!(parse_wait_message(Some("  7 MIN ")), Countdown::Minutes(7));
        assert_eq!(parse_wait_message(Some("min 3")), Countdown::Minutes(3));
        assert_eq!(parse_wait_message(Some("0 min")), Countdown::Minutes(0));
    }

    #[test]
    fn arriving_now_is_one_minute() {
        assert_eq!(parse_wait_message(Some("in arrivo")), Countdown::Minutes(1));
        assert_eq!(parse_wait_message(Some(" In Arrivo ")), Countdown::Minutes(1));
    }

    #[test]
    fn updating_is_unavailable() {
        assert_eq!(parse_wait_message(Some("updating")), Countdown::Unavailable);
        assert_eq!(parse_wait_message(Some("Aggiornamento")), Countdown::Unavailable);
    }

    #[test]
    fn empty_and_missing_are_unavailable() {
        assert_eq!(parse_wait_message(None), Countdown::Unavailable);
        assert_eq!(parse_wait_message(Some("")), Countdown::Unavailable);
        assert_eq!(parse_wait_message(Some("   ")), Countdown::Unavailable);
    }

    #[test]
    fn minutes_without_number_is_unavailable() {
        assert_eq!(parse_wait_message(Some("min")), Countdown::Unavailable);
    }

    #[test]
    fn unrecognised_text_is_unavailable() {
        assert_eq!(parse_wait_message(Some("sciopero")), Countdown::Unavailable);
        assert_eq!(parse_wait_message(Some("5")), Countdown::Unavailable);
        assert_eq!(parse_wait_message(Some("in arrivo tra poco")), Countdown::Unavailable);
    }

    #[test]
    fn huge_number_is_unavailable() {
        assert_eq!(
            parse_wait_message(Some("99999999999 min")),
            Countdown::Unavailable
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// "N min" always parses to N
        #[test]
        fn n_min_roundtrip(n in 0u32..10_000) {
            prop_assert_eq!(parse_wait_message(Some(&format!("{n} min"))), Countdown::Minutes(n));
        }

        /// Arbitrary text never panics
        #[test]
        fn never_panics(s in ".*") {
            let _ = parse_wait_message(Some(&s));
        }
    }
}
