//! Home-page pet filter.

use super::model::{Gender, Pet};

/// Criteria combined with AND. Empty criteria match every pet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetFilter {
    /// Case-insensitive substring of the pet name.
    pub name: Option<String>,
    pub gender: Option<Gender>,
    /// Inclusive upper bound in kilograms.
    pub max_weight: Option<f64>,
}

impl PetFilter {
    pub fn is_active(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
            || self.gender.is_some()
            || self.max_weight.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, pet: &Pet) -> bool {
        let matches_name = self
            .name
            .as_deref()
            .is_none_or(|needle| pet.name.to_lowercase().contains(&needle.to_lowercase()));
        let matches_gender = self
            .gender
            .is_none_or(|gender| pet.gender.eq_ignore_ascii_case(gender.as_ref()));
        let matches_weight = self.max_weight.is_none_or(|max| pet.weight <= max);

        matches_name && matches_gender && matches_weight
    }

    pub fn apply<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
        pets.iter().filter(|pet| self.matches(pet)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PetId;

    fn pet(id: i64, name: &str, gender: &str, weight: f64) -> Pet {
        Pet {
            id: PetId(id),
            user_id: None,
            name: name.to_string(),
            breed: "beagle".to_string(),
            gender: gender.to_string(),
            weight,
            birthday: None,
            photo: String::new(),
        }
    }

    fn pets() -> Vec<Pet> {
        vec![
            pet(1, "Luna", "female", 12.0),
            pet(2, "Lucas", "Male", 30.5),
            pet(3, "Toby", "male", 8.0),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = PetFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&pets()).len(), 3);
    }

    #[test]
    fn criteria_are_combined() {
        let pets = pets();
        let filter = PetFilter {
            name: Some("LU".to_string()),
            gender: Some(Gender::Male),
            max_weight: None,
        };
        let ids: Vec<_> = filter.apply(&pets).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PetId(2)]);
    }

    #[test]
    fn max_weight_is_inclusive() {
        let pets = pets();
        let filter = PetFilter {
            max_weight: Some(12.0),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&pets).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PetId(1), PetId(3)]);
    }
}
