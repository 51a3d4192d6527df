use serde::{Deserialize, Serialize};

use crate::store::{keys, Store};
use crate::time::ClockTime;

/// The three meal times that medication schedules are anchored to.
///
/// There is one set of anchors per patient. No ordering is enforced between
/// the three times; breakfast before lunch before dinner is expected usage,
/// not a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAnchors {
    pub breakfast: ClockTime,
    pub lunch: ClockTime,
    pub dinner: ClockTime,
}

impl MealAnchors {
    /// Defaults applied the first time meal times are set up:
    /// breakfast 8:00am, lunch 1:00pm, dinner 7:00pm.
    pub fn defaults() -> Self {
        MealAnchors {
            breakfast: ClockTime::from_minutes(8 * 60),
            lunch: ClockTime::from_minutes(13 * 60),
            dinner: ClockTime::from_minutes(19 * 60),
        }
    }
}

impl Default for MealAnchors {
    fn default() -> Self {
        MealAnchors::defaults()
    }
}

/// Derives the clock times a medication should be taken at from its daily
/// frequency, its drowsiness flag, and the patient's meal anchors.
///
/// The drowsy flag pushes doses later in the day (toward dinner) so the
/// patient is not sedated during active daytime hours:
///
/// - 1x: breakfast, or dinner when drowsy
/// - 2x: breakfast + dinner, or lunch + dinner when drowsy
/// - 3x: breakfast + lunch + dinner (drowsy has no effect; the schedule
///   already spans the day)
/// - 4x: breakfast + lunch + midpoint + dinner, where the midpoint is the
///   truncated average of the lunch and dinner HOURS, on the hour
///
/// Any other frequency yields an empty schedule; the CLI rejects those before
/// a record is ever created, so an empty result here only shows up for
/// records that were stored misconfigured.
///
/// Pure and deterministic: no clock access, no stored state.
pub fn compute_schedule(frequency: u32, is_drowsy: bool, anchors: &MealAnchors) -> Vec<ClockTime> {
    let MealAnchors {
        breakfast,
        lunch,
        dinner,
    } = *anchors;

    match frequency {
        1 => {
            if is_drowsy {
                vec![dinner]
            } else {
                vec![breakfast]
            }
        }
        2 => {
            if is_drowsy {
                vec![lunch, dinner]
            } else {
                vec![breakfast, dinner]
            }
        }
        3 => vec![breakfast, lunch, dinner],
        4 => {
            // Hour-only midpoint between lunch and dinner: minutes are
            // discarded before averaging, so the extra dose always lands on
            // the hour. Kept for compatibility with existing stored schedules.
            let midpoint_hour = (lunch.hour() + dinner.hour()) / 2;
            let midpoint = ClockTime::from_minutes(midpoint_hour * 60);
            vec![breakfast, lunch, midpoint, dinner]
        }
        _ => Vec::new(),
    }
}

/// Shows or updates the stored meal anchors.
///
/// With no arguments, prints the current anchors (or the defaults, flagged as
/// unsaved). With any argument, updates that anchor starting from the stored
/// anchors or the defaults, then saves. Existing medication schedules are not
/// recomputed; they keep the times they were created with.
pub fn configure_meals(
    store: &Store,
    breakfast: Option<ClockTime>,
    lunch: Option<ClockTime>,
    dinner: Option<ClockTime>,
) {
    let saved: Option<MealAnchors> = store.get(keys::MEAL_ANCHORS);

    if breakfast.is_none() && lunch.is_none() && dinner.is_none() {
        match saved {
            Some(anchors) => print_anchors(&anchors),
            None => {
                println!("Meal times are not set up yet. Defaults would be:");
                print_anchors(&MealAnchors::defaults());
                println!("Save them with: nutricare meals --breakfast 08:00 --lunch 13:00 --dinner 19:00");
            }
        }
        return;
    }

    let mut anchors = saved.unwrap_or_default();
    if let Some(time) = breakfast {
        anchors.breakfast = time;
    }
    if let Some(time) = lunch {
        anchors.lunch = time;
    }
    if let Some(time) = dinner {
        anchors.dinner = time;
    }

    store.set(keys::MEAL_ANCHORS, &anchors);
    println!("Saved meal times:");
    print_anchors(&anchors);
}

fn print_anchors(anchors: &MealAnchors) {
    println!("  Breakfast: {}", anchors.breakfast.to_12h());
    println!("  Lunch:     {}", anchors.lunch.to_12h());
    println!("  Dinner:    {}", anchors.dinner.to_12h());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn anchors(breakfast: &str, lunch: &str, dinner: &str) -> MealAnchors {
        MealAnchors {
            breakfast: t(breakfast),
            lunch: t(lunch),
            dinner: t(dinner),
        }
    }

    #[test]
    fn test_defaults() {
        let defaults = MealAnchors::defaults();
        assert_eq!(defaults.breakfast.to_string(), "08:00");
        assert_eq!(defaults.lunch.to_string(), "13:00");
        assert_eq!(defaults.dinner.to_string(), "19:00");
    }

    #[test]
    fn test_once_a_day() {
        let anchors = MealAnchors::defaults();
        assert_eq!(compute_schedule(1, false, &anchors), vec![t("08:00")]);
        assert_eq!(compute_schedule(1, true, &anchors), vec![t("19:00")]);
    }

    #[test]
    fn test_twice_a_day() {
        let anchors = MealAnchors::defaults();
        assert_eq!(
            compute_schedule(2, false, &anchors),
            vec![t("08:00"), t("19:00")]
        );
        assert_eq!(
            compute_schedule(2, true, &anchors),
            vec![t("13:00"), t("19:00")]
        );
    }

    #[test]
    fn test_three_times_a_day_ignores_drowsy() {
        let anchors = MealAnchors::defaults();
        let expected = vec![t("08:00"), t("13:00"), t("19:00")];
        assert_eq!(compute_schedule(3, false, &anchors), expected);
        assert_eq!(compute_schedule(3, true, &anchors), expected);
    }

    #[test]
    fn test_four_times_a_day_midpoint() {
        let defaults = MealAnchors::defaults();
        // floor((13 + 19) / 2) = 16
        let expected = vec![t("08:00"), t("13:00"), t("16:00"), t("19:00")];
        assert_eq!(compute_schedule(4, false, &defaults), expected);
        assert_eq!(compute_schedule(4, true, &defaults), expected);
    }

    #[test]
    fn test_midpoint_discards_minutes() {
        // Minutes never contribute: 13:30 and 18:45 average as hours 13 and
        // 18, truncating to 15:00.
        let anchors = anchors("07:15", "13:30", "18:45");
        assert_eq!(
            compute_schedule(4, false, &anchors),
            vec![t("07:15"), t("13:30"), t("15:00"), t("18:45")]
        );
    }

    #[test]
    fn test_midpoint_truncates_odd_sum() {
        // floor((12 + 19) / 2) = 15
        let anchors = anchors("08:00", "12:00", "19:00");
        let schedule = compute_schedule(4, false, &anchors);
        assert_eq!(schedule[2], t("15:00"));
    }

    #[test]
    fn test_unsupported_frequency_is_empty() {
        let anchors = MealAnchors::defaults();
        assert_eq!(compute_schedule(0, false, &anchors), Vec::new());
        assert_eq!(compute_schedule(5, false, &anchors), Vec::new());
        assert_eq!(compute_schedule(100, true, &anchors), Vec::new());
    }

    #[test]
    fn test_length_matches_frequency() {
        let anchors = anchors("06:30", "11:45", "20:10");
        for frequency in 1..=4 {
            for is_drowsy in [false, true] {
                let schedule = compute_schedule(frequency, is_drowsy, &anchors);
                assert_eq!(schedule.len(), frequency as usize);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let anchors = MealAnchors::defaults();
        for frequency in 0..=5 {
            for is_drowsy in [false, true] {
                assert_eq!(
                    compute_schedule(frequency, is_drowsy, &anchors),
                    compute_schedule(frequency, is_drowsy, &anchors)
                );
            }
        }
    }

    #[test]
    fn test_anchors_serialize_as_strings() {
        let json = serde_json::to_string(&MealAnchors::defaults()).unwrap();
        assert_eq!(
            json,
            r#"{"breakfast":"08:00","lunch":"13:00","dinner":"19:00"}"#
        );
    }
}
