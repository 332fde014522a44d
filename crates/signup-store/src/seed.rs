//! Fake record generation for demo stores
//!
//! Seeded ages span `0..=125`, so seeded stores may hold records the form
//! itself would refuse (age 0).

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use signup_schema::Record;

const FIRST_NAMES: &[&str] = &[
    "Duane", "Maria", "Kenji", "Amara", "Lukas", "Priya", "Omar", "Sofia", "Tariq", "Elena",
    "Jonah", "Mei", "Rafael", "Ingrid", "Kofi", "Lena",
];

const LAST_NAMES: &[&str] = &[
    "Okafor", "Lindqvist", "Tanaka", "Moreau", "Silva", "Novak", "Haddad", "Kowalski", "Reyes",
    "Brandt",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "inbox.test"];

/// Oldest seeded age
pub const MAX_SEED_AGE: i64 = 125;

/// Generate `count` fake records with unique emails
///
/// The same `seed` always yields the same records.
#[must_use]
pub fn fake_records(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| fake_record(&mut rng, i)).collect()
}

fn fake_record(rng: &mut StdRng, index: usize) -> Record {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Duane");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Okafor");
    let domain = DOMAINS.choose(rng).copied().unwrap_or("example.com");

    // The index suffix keeps emails unique within one batch
    let email = format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        index,
        domain
    );

    Record::new(
        format!("{first} {last}"),
        email,
        rng.random_range(0..=MAX_SEED_AGE),
    )
}
