//! Idempotent insertion of the sample records.

use hbnb::{
    Amenity, AmenityAttribute, ModelError, Place, PlaceAttribute, RepoError, Repositories,
    Review, User, UserAttribute,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::fixtures::{AmenitySeed, PlaceSeed, ReviewSeed, SeedData, UserSeed};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepoError),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Fixture references unknown {kind} '{key}'")]
    UnknownReference { kind: &'static str, key: String },
}

/// Created/already-present counts for one entity type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub created: usize,
    pub existing: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.created + self.existing
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: Tally,
    pub amenities: Tally,
    pub places: Tally,
    pub reviews: Tally,
}

impl SeedReport {
    pub fn created(&self) -> usize {
        self.users.created + self.amenities.created + self.places.created + self.reviews.created
    }

    pub fn existing(&self) -> usize {
        self.users.existing
            + self.amenities.existing
            + self.places.existing
            + self.reviews.existing
    }
}

/// Looks up an entity seeded earlier in the run by a natural key.
fn resolve<'a, E>(
    entities: &'a [E],
    kind: &'static str,
    key: &str,
    matches: impl Fn(&E) -> bool,
) -> Result<&'a E, SeedError> {
    entities
        .iter()
        .find(|e| matches(e))
        .ok_or_else(|| SeedError::UnknownReference {
            kind,
            key: key.to_string(),
        })
}

/// Inserts sample records that are not present yet.
///
/// Existence is decided by natural key: email for users, name for amenities,
/// title for places, and the (place, author) pair for reviews. Records that
/// already exist are reused, so places and reviews always point at the ids
/// actually stored. A repository failure aborts the run; records inserted
/// before it stay in place.
pub struct Seeder<'a> {
    repos: &'a Repositories,
}

impl<'a> Seeder<'a> {
    pub fn new(repos: &'a Repositories) -> Self {
        Self { repos }
    }

    /// Seeds users, amenities, places and reviews, in that order.
    pub async fn run(&self, data: &SeedData) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        let users = self.seed_users(&data.users, &mut report.users).await?;
        let amenities = self
            .seed_amenities(&data.amenities, &mut report.amenities)
            .await?;
        let places = self
            .seed_places(&data.places, &users, &amenities, &mut report.places)
            .await?;
        self.seed_reviews(&data.reviews, &users, &places, &mut report.reviews)
            .await?;

        info!("Test data insertion completed!");
        Ok(report)
    }

    /// Seeds users, hashing each new user's password.
    pub async fn seed_users(
        &self,
        seeds: &[UserSeed],
        tally: &mut Tally,
    ) -> Result<Vec<User>, SeedError> {
        let mut users = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let existing = self
                .repos
                .users
                .get_by_attribute(&UserAttribute::Email(seed.email.clone()))
                .await?;

            match existing {
                Some(user) => {
                    info!("User already exists: {}", user.full_name());
                    tally.existing += 1;
                    users.push(user);
                }
                None => {
                    let mut user =
                        User::new(&seed.first_name, &seed.last_name, &seed.email, seed.is_admin)?;
                    user.hash_password(&seed.password)?;
                    self.repos.users.add(&user).await?;

                    info!("User created: {} ({})", user.full_name(), user.email);
                    tally.created += 1;
                    users.push(user);
                }
            }
        }

        Ok(users)
    }

    pub async fn seed_amenities(
        &self,
        seeds: &[AmenitySeed],
        tally: &mut Tally,
    ) -> Result<Vec<Amenity>, SeedError> {
        let mut amenities = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let existing = self
                .repos
                .amenities
                .get_by_attribute(&AmenityAttribute::Name(seed.name.clone()))
                .await?;

            match existing {
                Some(amenity) => {
                    info!("Amenity already exists: {}", amenity.name);
                    tally.existing += 1;
                    amenities.push(amenity);
                }
                None => {
                    let amenity = match seed.id {
                        Some(id) => Amenity::with_id(id, &seed.name)?,
                        None => Amenity::new(&seed.name)?,
                    };
                    self.repos.amenities.add(&amenity).await?;

                    info!("Amenity created: {}", amenity.name);
                    tally.created += 1;
                    amenities.push(amenity);
                }
            }
        }

        Ok(amenities)
    }

    /// Seeds places owned by `users`, attaching amenities from `amenities`.
    ///
    /// An existing place is reused even when its amenities differ from the
    /// fixture; reset the places first to pick up amenity changes.
    pub async fn seed_places(
        &self,
        seeds: &[PlaceSeed],
        users: &[User],
        amenities: &[Amenity],
        tally: &mut Tally,
    ) -> Result<Vec<Place>, SeedError> {
        let mut places = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let existing = self
                .repos
                .places
                .get_by_attribute(&PlaceAttribute::Title(seed.title.clone()))
                .await?;

            if let Some(place) = existing {
                info!("Place already exists: {}", place.title);
                tally.existing += 1;
                places.push(place);
                continue;
            }

            let owner = resolve(users, "user", &seed.owner_email, |u| {
                u.email == seed.owner_email
            })?;

            let mut place_amenities = Vec::with_capacity(seed.amenities.len());
            for name in &seed.amenities {
                let id = resolve(amenities, "amenity", name, |a| &a.name == name)?.id;
                let amenity = self
                    .repos
                    .amenities
                    .get(id)
                    .await?
                    .ok_or(RepoError::NotFound {
                        kind: "Amenity",
                        id,
                    })?;
                place_amenities.push(amenity);
            }

            let place = Place::new(
                &seed.title,
                &seed.description,
                seed.price,
                seed.latitude,
                seed.longitude,
                owner.id,
            )?
            .with_amenities(place_amenities);
            self.repos.places.add(&place).await?;

            info!(
                "Place created: {} (${:.2}/night) with {} amenities",
                place.title,
                place.price,
                place.amenities.len()
            );
            tally.created += 1;
            places.push(place);
        }

        Ok(places)
    }

    /// Seeds reviews, skipping any (place, author) pair that already has one.
    pub async fn seed_reviews(
        &self,
        seeds: &[ReviewSeed],
        users: &[User],
        places: &[Place],
        tally: &mut Tally,
    ) -> Result<(), SeedError> {
        for seed in seeds {
            let place = resolve(places, "place", &seed.place_title, |p| {
                p.title == seed.place_title
            })?;
            let author = resolve(users, "user", &seed.author_email, |u| {
                u.email == seed.author_email
            })?;

            let already_reviewed = self
                .repos
                .reviews
                .get_all()
                .await?
                .iter()
                .any(|r| r.place_id == place.id && r.user_id == author.id);

            if already_reviewed {
                info!("Review already exists");
                tally.existing += 1;
                continue;
            }

            let review = Review::new(place.id, author.id, &seed.text, seed.rating)?;
            self.repos.reviews.add(&review).await?;

            info!("Review created: {} reviewed {}", author.first_name, place.title);
            tally.created += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_data() -> SeedData {
        let json = r#"{
            "users": [
                {"first_name": "Alice", "last_name": "Johnson", "email": "alice@hbnb.io", "password": "alice1234", "is_admin": true},
                {"first_name": "Bob", "last_name": "Smith", "email": "bob@hbnb.io", "password": "bob1234"}
            ],
            "amenities": [
                {"id": "2767d121-c1b4-4d16-a816-0f5113ab06d0", "name": "WiFi"},
                {"name": "Kitchen"}
            ],
            "places": [{
                "title": "Cozy Apartment in Paris",
                "description": "Central.",
                "price": 95.0,
                "latitude": 48.8566,
                "longitude": 2.3522,
                "owner_email": "alice@hbnb.io",
                "amenities": ["WiFi", "Kitchen"]
            }],
            "reviews": [{
                "place_title": "Cozy Apartment in Paris",
                "author_email": "bob@hbnb.io",
                "text": "Lovely stay.",
                "rating": 5
            }]
        }"#;
        SeedData::from_json_str(json).unwrap()
    }

    /// Stores users directly so seeding skips password hashing.
    async fn preload_users(repos: &Repositories, data: &SeedData) -> Vec<User> {
        let mut users = Vec::new();
        for seed in &data.users {
            let user =
                User::new(&seed.first_name, &seed.last_name, &seed.email, seed.is_admin).unwrap();
            repos.users.add(&user).await.unwrap();
            users.push(user);
        }
        users
    }

    #[tokio::test]
    async fn test_seed_empty_database() {
        let repos = Repositories::in_memory();
        let data = SeedData::sample();

        let report = Seeder::new(&repos).run(&data).await.unwrap();

        assert_eq!(report.users.created, 5);
        assert_eq!(report.amenities.created, 5);
        assert_eq!(report.places.created, 5);
        assert_eq!(report.reviews.created, 7);
        assert_eq!(report.existing(), 0);

        let users = repos.users.get_all().await.unwrap();
        let places = repos.places.get_all().await.unwrap();
        let reviews = repos.reviews.get_all().await.unwrap();
        assert_eq!(users.len(), 5);
        assert_eq!(repos.amenities.get_all().await.unwrap().len(), 5);
        assert_eq!(places.len(), 5);
        assert_eq!(reviews.len(), 7);

        // Foreign keys point at stored ids
        let user_ids: HashSet<_> = users.iter().map(|u| u.id).collect();
        let place_ids: HashSet<_> = places.iter().map(|p| p.id).collect();
        for place in &places {
            assert!(user_ids.contains(&place.owner_id));
        }
        for review in &reviews {
            assert!(place_ids.contains(&review.place_id));
            assert!(user_ids.contains(&review.user_id));
        }

        let alice = users.iter().find(|u| u.email == "alice@hbnb.io").unwrap();
        assert!(alice.is_admin);
        assert!(alice.verify_password("alice1234").unwrap());

        let miami = places
            .iter()
            .find(|p| p.title == "Beachfront Villa in Miami")
            .unwrap();
        assert_eq!(miami.owner_id, alice.id);
        let names: HashSet<_> = miami.amenities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            HashSet::from(["WiFi", "Swimming Pool", "Air Conditioning", "Parking"])
        );
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let repos = Repositories::in_memory();
        let data = SeedData::sample();
        preload_users(&repos, &data).await;

        let first = Seeder::new(&repos).run(&data).await.unwrap();
        assert_eq!(first.users.existing, 5);
        assert_eq!(first.places.created, 5);

        let second = Seeder::new(&repos).run(&data).await.unwrap();
        assert_eq!(second.created(), 0);
        assert_eq!(second.users.existing, 5);
        assert_eq!(second.amenities.existing, 5);
        assert_eq!(second.places.existing, 5);
        assert_eq!(second.reviews.existing, 7);

        assert_eq!(repos.users.get_all().await.unwrap().len(), 5);
        assert_eq!(repos.places.get_all().await.unwrap().len(), 5);
        assert_eq!(repos.reviews.get_all().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_amenity_names_stay_unique() {
        let repos = Repositories::in_memory();
        let data = SeedData::sample();
        preload_users(&repos, &data).await;

        for _ in 0..3 {
            Seeder::new(&repos).run(&data).await.unwrap();
        }

        let amenities = repos.amenities.get_all().await.unwrap();
        let names: HashSet<_> = amenities.iter().map(|a| a.name.clone()).collect();
        assert_eq!(names.len(), amenities.len());
        assert_eq!(amenities.len(), 5);

        let wifi = amenities.iter().find(|a| a.name == "WiFi").unwrap();
        assert_eq!(wifi.id.to_string(), "2767d121-c1b4-4d16-a816-0f5113ab06d0");
    }

    #[tokio::test]
    async fn test_review_pairs_stay_unique() {
        let repos = Repositories::in_memory();
        let data = SeedData::sample();
        preload_users(&repos, &data).await;

        Seeder::new(&repos).run(&data).await.unwrap();
        Seeder::new(&repos).run(&data).await.unwrap();

        let reviews = repos.reviews.get_all().await.unwrap();
        let pairs: HashSet<_> = reviews.iter().map(|r| (r.place_id, r.user_id)).collect();
        assert_eq!(pairs.len(), reviews.len());
    }

    #[tokio::test]
    async fn test_existing_records_are_reused() {
        let repos = Repositories::in_memory();
        let data = small_data();
        let preloaded = preload_users(&repos, &data).await;
        let alice_id = preloaded[0].id;

        let report = Seeder::new(&repos).run(&data).await.unwrap();
        assert_eq!(report.users, Tally { created: 0, existing: 2 });

        let place = repos
            .places
            .get_by_attribute(&PlaceAttribute::Title("Cozy Apartment in Paris".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(place.owner_id, alice_id);
        assert_eq!(place.amenities.len(), 2);

        let review = &repos.reviews.get_all().await.unwrap()[0];
        assert_eq!(review.place_id, place.id);
        assert_eq!(review.user_id, preloaded[1].id);
    }

    #[tokio::test]
    async fn test_existing_place_keeps_its_amenities() {
        let repos = Repositories::in_memory();
        let mut data = small_data();
        preload_users(&repos, &data).await;
        Seeder::new(&repos).run(&data).await.unwrap();

        data.places[0].amenities = vec!["WiFi".to_string()];
        let report = Seeder::new(&repos).run(&data).await.unwrap();
        assert_eq!(report.places.existing, 1);

        let places = repos.places.get_all().await.unwrap();
        assert_eq!(places[0].amenities.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_owner_aborts() {
        let repos = Repositories::in_memory();
        let mut data = small_data();
        preload_users(&repos, &data).await;
        data.places[0].owner_email = "nobody@hbnb.io".to_string();

        let err = Seeder::new(&repos).run(&data).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::UnknownReference { kind: "user", ref key } if key == "nobody@hbnb.io"
        ));

        // Earlier steps are not rolled back
        assert_eq!(repos.amenities.get_all().await.unwrap().len(), 2);
        assert!(repos.places.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_amenity_aborts() {
        let repos = Repositories::in_memory();
        let mut data = small_data();
        preload_users(&repos, &data).await;
        data.places[0].amenities.push("Sauna".to_string());

        let err = Seeder::new(&repos).run(&data).await.unwrap_err();
        assert!(matches!(err, SeedError::UnknownReference { kind: "amenity", .. }));
    }

    #[tokio::test]
    async fn test_invalid_fixture_is_model_error() {
        let repos = Repositories::in_memory();
        let mut data = small_data();
        preload_users(&repos, &data).await;
        data.reviews[0].rating = 9;

        let err = Seeder::new(&repos).run(&data).await.unwrap_err();
        assert!(matches!(err, SeedError::Model(_)));
        assert!(repos.reviews.get_all().await.unwrap().is_empty());
    }
}
