use std::collections::BTreeMap;

use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::store::{keys, Store};

/// Patient types used to pick a diet preset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SurgeryType {
    Cardiac,
    Orthopedic,
    General,
    Chronic,
}

impl SurgeryType {
    pub fn label(&self) -> &'static str {
        match self {
            SurgeryType::Cardiac => "Cardiac Surgery",
            SurgeryType::Orthopedic => "Orthopedic Surgery",
            SurgeryType::General => "General Surgery",
            SurgeryType::Chronic => "Chronic Condition",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryRecord {
    #[serde(rename = "type")]
    pub surgery_type: SurgeryType,
    pub label: String,
    pub selected_at: String,
}

/// The tracked food categories. Storage keys are fixed camelCase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoodCategory {
    GreenVegetables,
    NonGreenVegetables,
    Fish,
    RedMeat,
    Fruits,
    Carbs,
    Dairy,
    FriedFood,
}

pub const ALL_CATEGORIES: [FoodCategory; 8] = [
    FoodCategory::GreenVegetables,
    FoodCategory::NonGreenVegetables,
    FoodCategory::Fish,
    FoodCategory::RedMeat,
    FoodCategory::Fruits,
    FoodCategory::Carbs,
    FoodCategory::Dairy,
    FoodCategory::FriedFood,
];

impl FoodCategory {
    pub fn key(&self) -> &'static str {
        match self {
            FoodCategory::GreenVegetables => "greenVegetables",
            FoodCategory::NonGreenVegetables => "nonGreenVegetables",
            FoodCategory::Fish => "fish",
            FoodCategory::RedMeat => "redMeat",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Carbs => "carbs",
            FoodCategory::Dairy => "dairy",
            FoodCategory::FriedFood => "friedFood",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FoodCategory::GreenVegetables => "Green Vegetables",
            FoodCategory::NonGreenVegetables => "Non-Green Vegetables",
            FoodCategory::Fish => "Fish/White Meat",
            FoodCategory::RedMeat => "Red Meat",
            FoodCategory::Fruits => "Fruits",
            FoodCategory::Carbs => "Carbs/Grains",
            FoodCategory::Dairy => "Dairy",
            FoodCategory::FriedFood => "Fried/Oily Food",
        }
    }
}

/// A weekly target for one food category. `value: None` means no limit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DietTarget {
    pub value: Option<u32>,
    pub unit: String,
}

impl DietTarget {
    fn new(value: Option<u32>, unit: &str) -> Self {
        DietTarget {
            value,
            unit: unit.to_string(),
        }
    }
}

/// Default weekly targets following healthy eating guidelines for adults
/// aged 60 and above. Amounts should be adjusted per the doctor's advice.
pub fn default_targets() -> BTreeMap<String, DietTarget> {
    let mut targets = BTreeMap::new();
    targets.insert(
        FoodCategory::GreenVegetables.key().to_string(),
        DietTarget::new(Some(5), "cups/week"),
    );
    targets.insert(
        FoodCategory::NonGreenVegetables.key().to_string(),
        DietTarget::new(None, "no limit"),
    );
    targets.insert(
        FoodCategory::Fish.key().to_string(),
        DietTarget::new(Some(4), "servings/week"),
    );
    targets.insert(
        FoodCategory::RedMeat.key().to_string(),
        DietTarget::new(Some(2), "servings/week"),
    );
    targets.insert(
        FoodCategory::Fruits.key().to_string(),
        DietTarget::new(Some(14), "servings/week"),
    );
    targets.insert(
        FoodCategory::Carbs.key().to_string(),
        DietTarget::new(Some(21), "servings/week"),
    );
    targets.insert(
        FoodCategory::Dairy.key().to_string(),
        DietTarget::new(Some(7), "servings/week"),
    );
    targets.insert(
        FoodCategory::FriedFood.key().to_string(),
        DietTarget::new(Some(2), "servings/week"),
    );
    targets
}

/// Progress thresholds for one category's weekly count against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStatus {
    /// Count reached the target.
    TargetMet,
    /// Count reached 75% of the target.
    AlmostThere,
}

/// Threshold comparison used by the progress display. `None` when the
/// category has no limit or the count is below 75% of the target.
pub fn intake_status(count: u32, target: &DietTarget) -> Option<IntakeStatus> {
    let value = target.value?;
    if count >= value {
        Some(IntakeStatus::TargetMet)
    } else if count * 4 >= value * 3 {
        Some(IntakeStatus::AlmostThere)
    } else {
        None
    }
}

/// Progress toward a target as a percentage, capped at 100.
pub fn progress_percent(count: u32, target: &DietTarget) -> u32 {
    match target.value {
        Some(value) if value > 0 => (count * 100 / value).min(100),
        _ => 0,
    }
}

fn load_targets(store: &Store) -> BTreeMap<String, DietTarget> {
    store.get(keys::DIET_TARGETS).unwrap_or_else(default_targets)
}

fn load_intake(store: &Store) -> BTreeMap<String, u32> {
    store.get(keys::DIET_INTAKE).unwrap_or_default()
}

/// Records the surgery type and applies its diet preset.
///
/// All presets currently share the 60+ defaults; the selection is stored so
/// recommendations can diverge per type later.
pub fn set_surgery_type(store: &Store, surgery_type: SurgeryType) {
    let record = SurgeryRecord {
        surgery_type,
        label: surgery_type.label().to_string(),
        selected_at: Local::now().to_rfc3339(),
    };

    store.set(keys::SURGERY_TYPE, &record);
    store.set(keys::DIET_TARGETS, &default_targets());

    println!("Patient type set to: {}", surgery_type.label());
    println!("Applied weekly diet targets. View them with: nutricare diet");
}

/// Adds servings to a category's weekly intake count.
pub fn log_serving(store: &Store, category: FoodCategory, servings: u32) {
    if servings == 0 {
        eprintln!("Error: Servings must be at least 1");
        return;
    }

    let mut intake = load_intake(store);
    let count = intake.entry(category.key().to_string()).or_insert(0);
    *count += servings;
    let total = *count;

    store.set(keys::DIET_INTAKE, &intake);

    println!(
        "Logged {} serving(s) of {} ({} this week)",
        servings,
        category.display_name(),
        total
    );

    let targets = load_targets(store);
    if let Some(target) = targets.get(category.key()) {
        match intake_status(total, target) {
            Some(IntakeStatus::TargetMet) => {
                if let Some(value) = target.value {
                    println!("  Weekly target reached ({} {}).", value, target.unit);
                }
            }
            Some(IntakeStatus::AlmostThere) => {
                if let Some(value) = target.value {
                    println!("  Almost there: {}/{} {}.", total, value, target.unit);
                }
            }
            None => {}
        }
    }
}

/// Shows weekly intake against targets for every category.
pub fn show_diet(store: &Store) {
    let targets = load_targets(store);
    let intake = load_intake(store);

    println!("\nWeekly Diet Tracking");
    println!("{}", "=".repeat(60));
    println!("General guidelines for adults aged 60+, measured weekly.");
    println!("Adjust the amounts according to the doctor's advice.\n");

    for category in ALL_CATEGORIES {
        let count = intake.get(category.key()).copied().unwrap_or(0);
        let target = targets.get(category.key());

        match target.and_then(|t| t.value.map(|v| (t, v))) {
            Some((target, value)) => {
                let percent = progress_percent(count, target);
                let status = match intake_status(count, target) {
                    Some(IntakeStatus::TargetMet) => "  [target met]",
                    Some(IntakeStatus::AlmostThere) => "  [almost there]",
                    None => "",
                };
                println!(
                    "  {:<22} {:>3} / {} {} ({}%){}",
                    category.display_name(),
                    count,
                    value,
                    target.unit,
                    percent,
                    status
                );
            }
            None => {
                println!(
                    "  {:<22} {:>3} (no limit)",
                    category.display_name(),
                    count
                );
            }
        }
    }
    println!();
}

/// Zeroes every category's weekly intake.
pub fn reset_week(store: &Store) {
    let mut intake: BTreeMap<String, u32> = BTreeMap::new();
    for category in ALL_CATEGORIES {
        intake.insert(category.key().to_string(), 0);
    }
    store.set(keys::DIET_INTAKE, &intake);
    println!("Weekly intake counters reset.");
}
