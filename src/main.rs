use clap::{Parser, Subcommand};

use diet::{FoodCategory, SurgeryType};
use medication::FoodRequirement;
use store::Store;
use time::ClockTime;

pub mod diet;
pub mod medication;
pub mod profile;
pub mod schedule;
pub mod store;
pub mod time;

#[derive(Parser)]
#[command(name = "nutricare")]
#[command(
    about = "CLI caregiving companion for medications and diet",
    long_about = "A simple CLI tool for caregivers: schedules a patient's medications around meal times and tracks weekly dietary intake against recommended targets. Everything is saved as JSON on this device for easy import/export."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up (or edit) the patient profile
    Setup {
        /// Patient name
        name: String,
        /// Patient age (18-120)
        #[arg(short, long)]
        age: u32,
        /// Medical notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Show the patient profile
    #[command(visible_alias = "p")]
    Profile,
    /// Show or set meal times (schedules are anchored to these)
    #[command(visible_alias = "m")]
    Meals {
        /// Breakfast time (e.g., "08:00")
        #[arg(short, long)]
        breakfast: Option<ClockTime>,
        /// Lunch time (e.g., "13:00")
        #[arg(short, long)]
        lunch: Option<ClockTime>,
        /// Dinner time (e.g., "19:00")
        #[arg(short, long)]
        dinner: Option<ClockTime>,
    },
    /// Select the patient type and apply its diet preset
    Surgery {
        /// Patient type
        #[arg(value_enum)]
        kind: SurgeryType,
    },
    #[command(visible_aliases = ["a", "ad"])]
    /// Add a new medication
    Add {
        /// Name of the medication
        name: String,
        /// Times per day (1-4)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=4))]
        freq: u32,
        /// Medication causes drowsiness (doses shift later in the day)
        #[arg(long)]
        drowsy: bool,
        /// Food requirement
        #[arg(long, value_enum)]
        food: FoodRequirement,
        /// Capsules in the bottle (omit if not tracking capsules)
        #[arg(short, long)]
        capsules: Option<u32>,
    },
    /// Remove a medication
    #[command(visible_alias = "r")]
    Remove {
        /// Name of the medication
        name: String,
    },
    /// List all medications
    #[command(visible_aliases = ["l", "s", "show"])]
    List,
    /// Record a dose taken (decrements the capsule count)
    #[command(visible_alias = "t")]
    Take { name: String },
    /// Set the capsule count after a refill
    Refill {
        name: String,
        /// New capsule count
        count: u32,
    },
    /// Log servings of a food category
    Log {
        /// Food category
        #[arg(value_enum)]
        category: FoodCategory,
        /// Number of servings
        #[arg(short, long, default_value_t = 1)]
        servings: u32,
    },
    /// Show weekly diet intake against targets
    #[command(visible_alias = "d")]
    Diet,
    /// Reset all weekly intake counters
    #[command(visible_alias = "rw")]
    ResetWeek,
}

fn main() {
    let cli = Cli::parse();
    let store = Store::open_default();

    match cli.command {
        Commands::Setup { name, age, notes } => {
            profile::setup_profile(&store, name, age, notes);
        }
        Commands::Profile => {
            profile::show_profile(&store);
        }
        Commands::Meals {
            breakfast,
            lunch,
            dinner,
        } => {
            schedule::configure_meals(&store, breakfast, lunch, dinner);
        }
        Commands::Surgery { kind } => {
            diet::set_surgery_type(&store, kind);
        }
        Commands::Add {
            name,
            freq,
            drowsy,
            food,
            capsules,
        } => {
            medication::add_medication(&store, name, freq, drowsy, food, capsules);
        }
        Commands::Remove { name } => {
            medication::remove_medication(&store, name);
        }
        Commands::List => {
            medication::list_medications(&store);
        }
        Commands::Take { name } => {
            medication::take_dose(&store, name);
        }
        Commands::Refill { name, count } => {
            medication::refill_medication(&store, name, count);
        }
        Commands::Log { category, servings } => {
            diet::log_serving(&store, category, servings);
        }
        Commands::Diet => {
            diet::show_diet(&store);
        }
        Commands::ResetWeek => {
            diet::reset_week(&store);
        }
    }
}
