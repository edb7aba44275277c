// Selectable character catalog

/// A selectable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Position in the character-select carousel.
    pub index: usize,
}

/// All selectable characters, in carousel order.
pub const CHARACTERS: [CharacterInfo; 6] = [
    CharacterInfo {
        id: "bacon",
        name: "Bacon",
        index: 0,
    },
    CharacterInfo {
        id: "brent",
        name: "Brent Vatne",
        index: 1,
    },
    CharacterInfo {
        id: "avocoder",
        name: "Avocoder",
        index: 2,
    },
    CharacterInfo {
        id: "wheeler",
        name: "Wheeler",
        index: 3,
    },
    CharacterInfo {
        id: "palmer",
        name: "Palmer",
        index: 4,
    },
    CharacterInfo {
        id: "juwan",
        name: "Juwan",
        index: 5,
    },
];

/// Look up a character by its id.
pub fn by_id(id: &str) -> Option<&'static CharacterInfo> {
    CHARACTERS.iter().find(|c| c.id == id)
}

/// The character selected when the player has not picked one.
pub fn default_character() -> &'static CharacterInfo {
    &CHARACTERS[5] // juwan
}
