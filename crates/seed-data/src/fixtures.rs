//! Sample records to seed.
//!
//! Records refer to each other by natural key (owner email, amenity name,
//! place title) and the seeder resolves those to real ids at run time.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ConfigError;

const WIFI_ID: Uuid = Uuid::from_u128(0x2767d121_c1b4_4d16_a816_0f5113ab06d0);
const SWIMMING_POOL_ID: Uuid = Uuid::from_u128(0xbcf813cf_1fd0_4a7f_b69d_d4167331aaa1);
const AIR_CONDITIONING_ID: Uuid = Uuid::from_u128(0x32561383_c728_4ba3_9fd2_cb7ceab79fca);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext; hashed before insertion.
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenitySeed {
    /// Fixed id to create the amenity with. Generated when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSeed {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_email: String,
    /// Amenity names.
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSeed {
    pub place_title: String,
    pub author_email: String,
    pub text: String,
    pub rating: i32,
}

/// A complete set of records for one seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedData {
    pub users: Vec<UserSeed>,
    pub amenities: Vec<AmenitySeed>,
    pub places: Vec<PlaceSeed>,
    pub reviews: Vec<ReviewSeed>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self::sample()
    }
}

fn user(first_name: &str, last_name: &str, email: &str, password: &str, is_admin: bool) -> UserSeed {
    UserSeed {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        is_admin,
    }
}

fn amenity(id: Option<Uuid>, name: &str) -> AmenitySeed {
    AmenitySeed {
        id,
        name: name.to_string(),
    }
}

fn place(
    title: &str,
    description: &str,
    price: f64,
    (latitude, longitude): (f64, f64),
    owner_email: &str,
    amenities: &[&str],
) -> PlaceSeed {
    PlaceSeed {
        title: title.to_string(),
        description: description.to_string(),
        price,
        latitude,
        longitude,
        owner_email: owner_email.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn review(place_title: &str, author_email: &str, text: &str, rating: i32) -> ReviewSeed {
    ReviewSeed {
        place_title: place_title.to_string(),
        author_email: author_email.to_string(),
        text: text.to_string(),
        rating,
    }
}

impl SeedData {
    /// The built-in sample set: 5 users, 5 amenities, 5 places, 7 reviews.
    pub fn sample() -> Self {
        const ALICE: &str = "alice@hbnb.io";
        const BOB: &str = "bob@hbnb.io";
        const CHARLIE: &str = "charlie@hbnb.io";
        const DIANA: &str = "diana@hbnb.io";
        const EMMA: &str = "emma@hbnb.io";

        const PARIS: &str = "Cozy Apartment in Paris";
        const MIAMI: &str = "Beachfront Villa in Miami";
        const COLORADO: &str = "Mountain Cabin in Colorado";
        const NEW_YORK: &str = "Modern Loft in New York";
        const LONDON: &str = "Charming Cottage in London";

        Self {
            users: vec![
                user("Alice", "Johnson", ALICE, "alice1234", true),
                user("Bob", "Smith", BOB, "bob1234", false),
                user("Charlie", "Brown", CHARLIE, "charlie1234", false),
                user("Diana", "Martinez", DIANA, "diana1234", false),
                user("Emma", "Wilson", EMMA, "emma1234", false),
            ],
            amenities: vec![
                amenity(Some(WIFI_ID), "WiFi"),
                amenity(Some(SWIMMING_POOL_ID), "Swimming Pool"),
                amenity(Some(AIR_CONDITIONING_ID), "Air Conditioning"),
                amenity(None, "Kitchen"),
                amenity(None, "Parking"),
            ],
            places: vec![
                place(
                    PARIS,
                    "Beautiful apartment in the heart of Paris with amazing views of the Eiffel Tower. Perfect for couples or small families.",
                    95.0,
                    (48.8566, 2.3522),
                    ALICE,
                    &["WiFi", "Air Conditioning", "Kitchen"],
                ),
                place(
                    MIAMI,
                    "Luxurious villa right on the beach with private pool and stunning ocean views. Ideal for a relaxing vacation.",
                    350.0,
                    (25.7617, -80.1918),
                    ALICE,
                    &["WiFi", "Swimming Pool", "Air Conditioning", "Parking"],
                ),
                place(
                    COLORADO,
                    "Rustic cabin surrounded by nature with breathtaking mountain views. Great for hiking enthusiasts.",
                    45.0,
                    (39.7392, -104.9903),
                    BOB,
                    &["WiFi", "Kitchen", "Parking"],
                ),
                place(
                    NEW_YORK,
                    "Stylish loft in Manhattan with contemporary design and close to all major attractions.",
                    200.0,
                    (40.7128, -74.0060),
                    BOB,
                    &["WiFi", "Air Conditioning"],
                ),
                place(
                    LONDON,
                    "Quaint cottage in a quiet neighborhood with easy access to public transport and city center.",
                    9.0,
                    (51.5074, -0.1278),
                    ALICE,
                    &["WiFi", "Kitchen"],
                ),
            ],
            reviews: vec![
                review(
                    PARIS,
                    BOB,
                    "Amazing apartment with stunning views! The location is perfect for exploring Paris.",
                    5,
                ),
                review(
                    PARIS,
                    CHARLIE,
                    "Great place, very clean and comfortable. Highly recommend!",
                    5,
                ),
                review(
                    MIAMI,
                    DIANA,
                    "Absolutely beautiful villa! The pool and beach access are incredible.",
                    5,
                ),
                review(
                    COLORADO,
                    ALICE,
                    "Perfect getaway for nature lovers. The mountain views are breathtaking!",
                    5,
                ),
                review(
                    COLORADO,
                    EMMA,
                    "Cozy and rustic, exactly what we were looking for. Great hiking trails nearby.",
                    4,
                ),
                review(
                    NEW_YORK,
                    CHARLIE,
                    "Modern and stylish loft in a great location. Walking distance to everything!",
                    5,
                ),
                review(
                    LONDON,
                    DIANA,
                    "Charming cottage in a quiet area. Easy to get around London from here.",
                    4,
                ),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a fixture set from a JSON file with the same shape as [`SeedData`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_counts() {
        let data = SeedData::sample();
        assert_eq!(data.users.len(), 5);
        assert_eq!(data.amenities.len(), 5);
        assert_eq!(data.places.len(), 5);
        assert_eq!(data.reviews.len(), 7);
    }

    #[test]
    fn test_sample_natural_keys_unique() {
        let data = SeedData::sample();

        let emails: HashSet<_> = data.users.iter().map(|u| &u.email).collect();
        assert_eq!(emails.len(), data.users.len());

        let names: HashSet<_> = data.amenities.iter().map(|a| &a.name).collect();
        assert_eq!(names.len(), data.amenities.len());

        let titles: HashSet<_> = data.places.iter().map(|p| &p.title).collect();
        assert_eq!(titles.len(), data.places.len());

        let pairs: HashSet<_> = data
            .reviews
            .iter()
            .map(|r| (&r.place_title, &r.author_email))
            .collect();
        assert_eq!(pairs.len(), data.reviews.len());
    }

    #[test]
    fn test_sample_references_resolve() {
        let data = SeedData::sample();
        let emails: HashSet<_> = data.users.iter().map(|u| u.email.as_str()).collect();
        let names: HashSet<_> = data.amenities.iter().map(|a| a.name.as_str()).collect();
        let titles: HashSet<_> = data.places.iter().map(|p| p.title.as_str()).collect();

        for place in &data.places {
            assert!(emails.contains(place.owner_email.as_str()));
            for name in &place.amenities {
                assert!(names.contains(name.as_str()), "unknown amenity {name}");
            }
        }
        for review in &data.reviews {
            assert!(titles.contains(review.place_title.as_str()));
            assert!(emails.contains(review.author_email.as_str()));
        }
    }

    #[test]
    fn test_pinned_amenity_ids() {
        let data = SeedData::sample();
        let pinned: Vec<_> = data.amenities.iter().filter_map(|a| a.id).collect();

        assert_eq!(pinned.len(), 3);
        assert_eq!(
            pinned[0].to_string(),
            "2767d121-c1b4-4d16-a816-0f5113ab06d0"
        );
        assert_eq!(data.amenities[0].name, "WiFi");
    }

    #[test]
    fn test_only_alice_is_admin() {
        let data = SeedData::sample();
        let admins: Vec<_> = data.users.iter().filter(|u| u.is_admin).collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "alice@hbnb.io");
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{
            "users": [
                {"first_name": "Zoe", "last_name": "Park", "email": "zoe@hbnb.io", "password": "zoe1234"}
            ],
            "amenities": [{"name": "Sauna"}],
            "places": [{
                "title": "Lake House",
                "description": "By the lake.",
                "price": 120.0,
                "latitude": 46.0,
                "longitude": 8.9,
                "owner_email": "zoe@hbnb.io"
            }],
            "reviews": []
        }"#;

        let data = SeedData::from_json_str(json).unwrap();
        assert!(!data.users[0].is_admin);
        assert!(data.amenities[0].id.is_none());
        assert!(data.places[0].amenities.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SeedData::from_json_file(Path::new("/nonexistent/fixtures.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
