use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth;
use crate::errors::ModelError;
use crate::repository::{Attribute, AttributeValue, Entity};

const MAX_NAME_LEN: usize = 50;
const MAX_TITLE_LEN: usize = 100;

fn require_text(field: &'static str, value: &str, max_len: Option<usize>) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(field, "must not be empty"));
    }
    match max_len {
        Some(max) if value.chars().count() > max => Err(ModelError::invalid(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Creates a user without a password. Call [`User::hash_password`] before
    /// persisting.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        is_admin: bool,
    ) -> Result<Self, ModelError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let email = email.into();

        require_text("first_name", &first_name, Some(MAX_NAME_LEN))?;
        require_text("last_name", &last_name, Some(MAX_NAME_LEN))?;
        require_text("email", &email, None)?;
        if !email.contains('@') {
            return Err(ModelError::invalid("email", "must contain '@'"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash: String::new(),
            is_admin,
        })
    }

    /// Replaces the stored hash with an Argon2 hash of `plaintext`.
    pub fn hash_password(&mut self, plaintext: &str) -> Result<(), ModelError> {
        self.password_hash = auth::hash_password(plaintext)?;
        Ok(())
    }

    pub fn verify_password(&self, plaintext: &str) -> Result<bool, ModelError> {
        auth::verify_password(plaintext, &self.password_hash)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAttribute {
    Email(String),
    FirstName(String),
    IsAdmin(bool),
}

impl Attribute for UserAttribute {
    fn column(&self) -> &'static str {
        match self {
            UserAttribute::Email(_) => "email",
            UserAttribute::FirstName(_) => "first_name",
            UserAttribute::IsAdmin(_) => "is_admin",
        }
    }

    fn value(&self) -> AttributeValue {
        match self {
            UserAttribute::Email(v) | UserAttribute::FirstName(v) => AttributeValue::Text(v.clone()),
            UserAttribute::IsAdmin(v) => AttributeValue::Flag(*v),
        }
    }
}

impl Entity for User {
    const KIND: &'static str = "User";
    type Attribute = UserAttribute;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, attribute: &UserAttribute) -> bool {
        match attribute {
            UserAttribute::Email(v) => &self.email == v,
            UserAttribute::FirstName(v) => &self.first_name == v,
            UserAttribute::IsAdmin(v) => self.is_admin == *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an amenity with a caller-chosen id.
    pub fn with_id(id: Uuid, name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        require_text("name", &name, Some(MAX_NAME_LEN))?;
        Ok(Self { id, name })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmenityAttribute {
    Name(String),
}

impl Attribute for AmenityAttribute {
    fn column(&self) -> &'static str {
        match self {
            AmenityAttribute::Name(_) => "name",
        }
    }

    fn value(&self) -> AttributeValue {
        match self {
            AmenityAttribute::Name(v) => AttributeValue::Text(v.clone()),
        }
    }
}

impl Entity for Amenity {
    const KIND: &'static str = "Amenity";
    type Attribute = AmenityAttribute;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, attribute: &AmenityAttribute) -> bool {
        match attribute {
            AmenityAttribute::Name(v) => &self.name == v,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    /// Stored in `place_amenity`, loaded separately.
    #[sqlx(skip)]
    pub amenities: Vec<Amenity>,
}

impl Place {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        latitude: f64,
        longitude: f64,
        owner_id: Uuid,
    ) -> Result<Self, ModelError> {
        let title = title.into();
        require_text("title", &title, Some(MAX_TITLE_LEN))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ModelError::invalid("price", "must be a non-negative number"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ModelError::invalid("latitude", "must be within -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ModelError::invalid("longitude", "must be within -180 and 180"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: description.into(),
            price,
            latitude,
            longitude,
            owner_id,
            amenities: Vec::new(),
        })
    }

    /// Attaches amenities, ignoring any already attached.
    pub fn with_amenities(mut self, amenities: impl IntoIterator<Item = Amenity>) -> Self {
        for amenity in amenities {
            self.add_amenity(amenity);
        }
        self
    }

    pub fn add_amenity(&mut self, amenity: Amenity) {
        if !self.amenities.iter().any(|a| a.id == amenity.id) {
            self.amenities.push(amenity);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceAttribute {
    Title(String),
    OwnerId(Uuid),
}

impl Attribute for PlaceAttribute {
    fn column(&self) -> &'static str {
        match self {
            PlaceAttribute::Title(_) => "title",
            PlaceAttribute::OwnerId(_) => "owner_id",
        }
    }

    fn value(&self) -> AttributeValue {
        match self {
            PlaceAttribute::Title(v) => AttributeValue::Text(v.clone()),
            PlaceAttribute::OwnerId(v) => AttributeValue::Id(*v),
        }
    }
}

impl Entity for Place {
    const KIND: &'static str = "Place";
    type Attribute = PlaceAttribute;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, attribute: &PlaceAttribute) -> bool {
        match attribute {
            PlaceAttribute::Title(v) => &self.title == v,
            PlaceAttribute::OwnerId(v) => self.owner_id == *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
}

impl Review {
    pub fn new(
        place_id: Uuid,
        user_id: Uuid,
        text: impl Into<String>,
        rating: i32,
    ) -> Result<Self, ModelError> {
        let text = text.into();
        require_text("text", &text, None)?;
        if !(1..=5).contains(&rating) {
            return Err(ModelError::invalid("rating", "must be between 1 and 5"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text,
            rating,
            place_id,
            user_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAttribute {
    PlaceId(Uuid),
    UserId(Uuid),
}

impl Attribute for ReviewAttribute {
    fn column(&self) -> &'static str {
        match self {
            ReviewAttribute::PlaceId(_) => "place_id",
            ReviewAttribute::UserId(_) => "user_id",
        }
    }

    fn value(&self) -> AttributeValue {
        match self {
            ReviewAttribute::PlaceId(v) | ReviewAttribute::UserId(v) => AttributeValue::Id(*v),
        }
    }
}

impl Entity for Review {
    const KIND: &'static str = "Review";
    type Attribute = ReviewAttribute;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, attribute: &ReviewAttribute) -> bool {
        match attribute {
            ReviewAttribute::PlaceId(v) => self.place_id == *v,
            ReviewAttribute::UserId(v) => self.user_id == *v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_validation() {
        assert!(User::new("Alice", "Johnson", "alice@hbnb.io", true).is_ok());

        let err = User::new("", "Johnson", "alice@hbnb.io", false).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidField {
                field: "first_name",
                ..
            }
        ));

        let err = User::new("Alice", "Johnson", "alice.hbnb.io", false).unwrap_err();
        assert!(matches!(err, ModelError::InvalidField { field: "email", .. }));

        let long = "x".repeat(51);
        assert!(User::new("Alice", long, "alice@hbnb.io", false).is_err());
    }

    #[test]
    fn test_user_password() {
        let mut user = User::new("Bob", "Smith", "bob@hbnb.io", false).unwrap();
        assert!(user.password_hash.is_empty());

        user.hash_password("bob1234").unwrap();
        assert_ne!(user.password_hash, "bob1234");
        assert!(user.verify_password("bob1234").unwrap());
        assert!(!user.verify_password("alice1234").unwrap());
    }

    #[test]
    fn test_place_bounds() {
        let owner = Uuid::new_v4();
        assert!(Place::new("Loft", "", 200.0, 40.7128, -74.006, owner).is_ok());
        assert!(Place::new("Loft", "", -1.0, 40.7128, -74.006, owner).is_err());
        assert!(Place::new("Loft", "", f64::NAN, 40.7128, -74.006, owner).is_err());
        assert!(Place::new("Loft", "", 200.0, 90.5, -74.006, owner).is_err());
        assert!(Place::new("Loft", "", 200.0, 40.7128, -180.5, owner).is_err());
        assert!(Place::new(" ", "", 200.0, 40.7128, -74.006, owner).is_err());
    }

    #[test]
    fn test_place_amenities_are_a_set() {
        let wifi = Amenity::new("WiFi").unwrap();
        let pool = Amenity::new("Swimming Pool").unwrap();
        let place = Place::new("Villa", "", 350.0, 25.7617, -80.1918, Uuid::new_v4())
            .unwrap()
            .with_amenities([wifi.clone(), pool, wifi]);

        assert_eq!(place.amenities.len(), 2);
    }

    #[test]
    fn test_review_rating_range() {
        let (place, user) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(Review::new(place, user, "Great", 1).is_ok());
        assert!(Review::new(place, user, "Great", 5).is_ok());
        assert!(Review::new(place, user, "Great", 0).is_err());
        assert!(Review::new(place, user, "Great", 6).is_err());
        assert!(Review::new(place, user, "", 4).is_err());
    }

    #[test]
    fn test_attribute_columns() {
        let attr = UserAttribute::Email("alice@hbnb.io".into());
        assert_eq!(attr.column(), "email");
        assert_eq!(attr.value(), AttributeValue::Text("alice@hbnb.io".into()));

        let id = Uuid::new_v4();
        let attr = ReviewAttribute::PlaceId(id);
        assert_eq!(attr.column(), "place_id");
        assert_eq!(attr.value(), AttributeValue::Id(id));
    }
}
