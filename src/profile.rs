use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::store::{keys, Store};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: String,
    pub age: u32,
    pub medical_notes: String,
    pub created_at: String,
}

/// Creates or replaces the patient profile.
///
/// Name must be non-empty and age must be 18-120. Running setup again
/// overwrites the existing profile; this is the edit flow.
pub fn setup_profile(store: &Store, name: String, age: u32, medical_notes: Option<String>) {
    let name = name.trim().to_string();
    if name.is_empty() {
        eprintln!("Error: Patient name cannot be empty!");
        return;
    }

    if !(18..=120).contains(&age) {
        eprintln!("Error: Please enter a valid age (18-120)");
        return;
    }

    let profile = PatientProfile {
        name: name.clone(),
        age,
        medical_notes: medical_notes.unwrap_or_default().trim().to_string(),
        created_at: Local::now().to_rfc3339(),
    };

    store.set(keys::PROFILE, &profile);
    println!("Saved profile for {}", name);
}

/// Prints the stored patient profile.
pub fn show_profile(store: &Store) {
    let Some(profile) = store.get::<PatientProfile>(keys::PROFILE) else {
        println!("No profile set up yet.");
        println!("Create one with: nutricare setup <NAME> --age <AGE>");
        return;
    };

    println!("\nPatient Profile");
    println!("{}", "=".repeat(60));
    println!("  Name: {}", profile.name);
    println!("  Age:  {}", profile.age);
    if !profile.medical_notes.is_empty() {
        println!("  Notes: {}", profile.medical_notes);
    }
    println!();
}
