use crate::{Character, CharacterSource, SourceError};

/// In-memory source for testing. Serves a fixed collection or a fixed error.
pub struct InMemorySource {
    label: String,
    result: Result<Vec<Character>, SourceError>,
}

impl InMemorySource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            result: Ok(Vec::new()),
        }
    }

    pub fn failing(label: impl Into<String>, error: SourceError) -> Self {
        Self {
            label: label.into(),
            result: Err(error),
        }
    }

    pub fn add(&mut self, character: Character) {
        if let Ok(characters) = &mut self.result {
            characters.push(character);
        }
    }
}

#[async_trait::async_trait]
impl CharacterSource for InMemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_all(&self) -> Result<Vec<Character>, SourceError> {
        self.result.clone()
    }
}

/// Build a character with the given first-episode number.
pub fn character(id: u64, name: &str, species: &str, first_episode: u32) -> Character {
    Character {
        id,
        name: name.to_owned(),
        species: species.to_owned(),
        gender: "Male".to_owned(),
        status: "Alive".to_owned(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        episode: vec![format!(
            "https://rickandmortyapi.com/api/episode/{first_episode}"
        )],
    }
}
