use std::fmt;

use serde::{Deserialize, Serialize};

/// A single catalog entry as returned by the remote character API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub species: String,
    pub gender: String,
    pub status: String,
    pub image: String,
    /// Episode URIs in order of appearance. The trailing path segment is the episode number.
    pub episode: Vec<String>,
}

impl Character {
    /// The first episode reference, if any.
    pub fn first_episode(&self) -> Option<&str> {
        self.episode.first().map(String::as_str)
    }
}

/// One of the three independent category attributes a character can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Species,
    Gender,
    Status,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Species => write!(f, "species"),
            Self::Gender => write!(f, "gender"),
            Self::Status => write!(f, "status"),
        }
    }
}

impl Dimension {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "species" => Some(Self::Species),
            "gender" | "genders" => Some(Self::Gender),
            "status" | "statuses" => Some(Self::Status),
            _ => None,
        }
    }

    /// All dimensions in display order.
    pub fn all() -> [Dimension; 3] {
        [Self::Species, Self::Gender, Self::Status]
    }

    /// Human-readable label for display.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Species => "Species",
            Self::Gender => "Gender",
            Self::Status => "Status",
        }
    }

    /// The character's value along this dimension.
    pub fn value_of<'a>(&self, character: &'a Character) -> &'a str {
        match self {
            Self::Species => &character.species,
            Self::Gender => &character.gender,
            Self::Status => &character.status,
        }
    }

    /// The fixed option set offered for this dimension.
    pub fn known_values(&self) -> &'static [&'static str] {
        match self {
            Self::Species => &[
                "Human",
                "Alien",
                "Humanoid",
                "Poopybutthole",
                "Mythological Creature",
                "Animal",
                "Robot",
                "Cronenberg",
                "unknown",
            ],
            Self::Gender => &["Male", "Female", "unknown"],
            Self::Status => &["Alive", "Dead", "unknown"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_shape_ignoring_extra_fields() {
        let json = r#"{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": [
                "https://rickandmortyapi.com/api/episode/1",
                "https://rickandmortyapi.com/api/episode/2"
            ],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }"#;

        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.species, "Human");
        assert_eq!(character.episode.len(), 2);
        assert_eq!(
            character.first_episode(),
            Some("https://rickandmortyapi.com/api/episode/1")
        );
    }

    #[test]
    fn dimension_parse_is_case_insensitive() {
        assert_eq!(Dimension::parse("Species"), Some(Dimension::Species));
        assert_eq!(Dimension::parse("GENDER"), Some(Dimension::Gender));
        assert_eq!(Dimension::parse("statuses"), Some(Dimension::Status));
        assert_eq!(Dimension::parse("origin"), None);
    }

    #[test]
    fn value_of_reads_matching_field() {
        let character = Character {
            id: 7,
            name: "Abradolf Lincler".into(),
            species: "Human".into(),
            gender: "Male".into(),
            status: "unknown".into(),
            image: String::new(),
            episode: vec![],
        };

        assert_eq!(Dimension::Species.value_of(&character), "Human");
        assert_eq!(Dimension::Gender.value_of(&character), "Male");
        assert_eq!(Dimension::Status.value_of(&character), "unknown");
        assert_eq!(character.first_episode(), None);
    }

    #[test]
    fn every_dimension_offers_unknown() {
        for dimension in Dimension::all() {
            assert!(dimension.known_values().contains(&"unknown"), "{dimension}");
        }
    }
}
