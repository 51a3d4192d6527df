use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::schedule::{compute_schedule, MealAnchors};
use crate::store::{keys, Store};
use crate::time::ClockTime;

/// Whether a medication must be taken around food.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FoodRequirement {
    WithFood,
    EmptyStomach,
    NoRestriction,
}

impl FoodRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            FoodRequirement::WithFood => "Take with Food",
            FoodRequirement::EmptyStomach => "Empty Stomach",
            FoodRequirement::NoRestriction => "Doesn't Matter",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub frequency: u32,
    pub is_drowsy: bool,
    pub food_requirement: FoodRequirement,
    /// None when the caregiver is not tracking capsules for this medication.
    pub capsule_count: Option<u32>,
    /// Derived from frequency, drowsiness, and the meal anchors at creation
    /// time; stored verbatim as HH:MM strings.
    pub scheduled_times: Vec<ClockTime>,
    pub created_at: String,
}

fn load_medications(store: &Store) -> Vec<Medication> {
    store.get(keys::MEDICATION_LIST).unwrap_or_default()
}

fn save_medications(store: &Store, meds: &[Medication]) {
    store.set(keys::MEDICATION_LIST, &meds);
}

/// Adds a medication, deriving its dosing schedule from the meal anchors.
///
/// Meal times must be set up first; the schedule is computed once here and
/// stored on the record. Names are unique, case-insensitive.
pub fn add_medication(
    store: &Store,
    name: String,
    frequency: u32,
    is_drowsy: bool,
    food_requirement: FoodRequirement,
    capsule_count: Option<u32>,
) {
    let name = name.trim().to_string();
    if name.is_empty() {
        eprintln!("Error: Medication name cannot be empty!");
        return;
    }

    let Some(anchors) = store.get::<MealAnchors>(keys::MEAL_ANCHORS) else {
        eprintln!("Error: Please set up meal times first.");
        eprintln!("Run: nutricare meals --breakfast 08:00 --lunch 13:00 --dinner 19:00");
        return;
    };

    let mut meds = load_medications(store);
    let name_lower = name.to_lowercase();
    if meds.iter().any(|m| m.name.to_lowercase() == name_lower) {
        eprintln!("Error: Medication '{}' already exists!", name);
        return;
    }

    let scheduled_times = compute_schedule(frequency, is_drowsy, &anchors);

    let now = Local::now();
    let med = Medication {
        id: now.timestamp_millis(),
        name: name.clone(),
        frequency,
        is_drowsy,
        food_requirement,
        capsule_count,
        scheduled_times,
        created_at: now.to_rfc3339(),
    };

    println!("Added medication: {}", name);
    print!("  Scheduled times:");
    for time in &med.scheduled_times {
        print!(" {}", time.to_12h());
    }
    println!();
    if is_drowsy {
        println!("  Causes drowsiness - doses are scheduled later in the day");
    }

    meds.push(med);
    save_medications(store, &meds);
}

/// Removes a medication by name (case-insensitive).
pub fn remove_medication(store: &Store, name: String) {
    let mut meds = load_medications(store);
    let name_lower = name.to_lowercase();
    let before = meds.len();

    meds.retain(|m| m.name.to_lowercase() != name_lower);

    if meds.len() == before {
        println!("Medication '{}' not found!", name);
        return;
    }

    save_medications(store, &meds);
    println!("Removed medication: {}", name);
}

/// Lists all medications with their schedules in 12-hour form.
pub fn list_medications(store: &Store) {
    let meds = load_medications(store);

    if meds.is_empty() {
        println!("No medications found.");
        return;
    }

    println!("\nMedications:");
    println!("{}", "=".repeat(60));

    for med in &meds {
        if med.is_drowsy {
            println!("\n{} [drowsy]", med.name);
        } else {
            println!("\n{}", med.name);
        }

        let times: Vec<String> = med.scheduled_times.iter().map(ClockTime::to_12h).collect();
        if times.is_empty() {
            println!("  Times:     No times scheduled");
        } else {
            println!("  Times:     {}", times.join(", "));
        }

        println!("  How:       {}", med.food_requirement.label());
        println!("  Frequency: {}x per day", med.frequency);

        match med.capsule_count {
            Some(count) => println!("  Capsules:  {} left", count),
            None => println!("  Capsules:  not tracked"),
        }
    }
    println!();
}

/// Records a dose being taken, decrementing the capsule count when tracked.
pub fn take_dose(store: &Store, name: String) {
    let mut meds = load_medications(store);
    let name_lower = name.to_lowercase();

    let Some(med) = meds.iter_mut().find(|m| m.name.to_lowercase() == name_lower) else {
        eprintln!("Error: Medication '{}' not found!", name);
        return;
    };

    match med.capsule_count {
        Some(0) => {
            println!("'{}' is out of capsules. Refill with: nutricare refill {} <COUNT>",
                med.name, name);
            return;
        }
        Some(count) => {
            med.capsule_count = Some(count - 1);
            let left = count - 1;
            println!("Took {}. {} capsule(s) left.", med.name, left);
            if left == 0 {
                println!("That was the last capsule - time to refill.");
            }
        }
        None => {
            println!("Took {} (capsules not tracked).", med.name);
            return;
        }
    }

    save_medications(store, &meds);
}

/// Sets the capsule count after a refill.
pub fn refill_medication(store: &Store, name: String, count: u32) {
    let mut meds = load_medications(store);
    let name_lower = name.to_lowercase();

    let Some(med) = meds.iter_mut().find(|m| m.name.to_lowercase() == name_lower) else {
        eprintln!("Error: Medication '{}' not found!", name);
        return;
    };

    med.capsule_count = Some(count);
    println!("Refilled {}: {} capsule(s).", med.name, count);
    save_medications(store, &meds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_requirement_wire_format() {
        assert_eq!(
            serde_json::to_string(&FoodRequirement::WithFood).unwrap(),
            "\"with-food\""
        );
        assert_eq!(
            serde_json::to_string(&FoodRequirement::EmptyStomach).unwrap(),
            "\"empty-stomach\""
        );
        assert_eq!(
            serde_json::to_string(&FoodRequirement::NoRestriction).unwrap(),
            "\"no-restriction\""
        );
    }

    #[test]
    fn test_medication_wire_format() {
        let anchors = MealAnchors::defaults();
        let med = Medication {
            id: 1700000000000,
            name: "Aspirin".to_string(),
            frequency: 2,
            is_drowsy: true,
            food_requirement: FoodRequirement::WithFood,
            capsule_count: Some(30),
            scheduled_times: compute_schedule(2, true, &anchors),
            created_at: "2026-01-05T09:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&med).unwrap();
        assert_eq!(json["name"], "Aspirin");
        assert_eq!(json["isDrowsy"], true);
        assert_eq!(json["foodRequirement"], "with-food");
        assert_eq!(json["capsuleCount"], 30);
        assert_eq!(
            json["scheduledTimes"],
            serde_json::json!(["13:00", "19:00"])
        );
    }

    #[test]
    fn test_medication_round_trips_through_json() {
        let med = Medication {
            id: 42,
            name: "Metformin".to_string(),
            frequency: 4,
            is_drowsy: false,
            food_requirement: FoodRequirement::NoRestriction,
            capsule_count: None,
            scheduled_times: compute_schedule(4, false, &MealAnchors::defaults()),
            created_at: "2026-01-05T09:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&med).unwrap();
        let back: Medication = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scheduled_times, med.scheduled_times);
        assert_eq!(back.capsule_count, None);
        assert_eq!(back.food_requirement, FoodRequirement::NoRestriction);
    }
}
