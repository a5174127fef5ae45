use std::fmt;

/// Independently refreshed slices of a world view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataClass {
    Players,
    LooseLoot,
    Containers,
    Corpses,
    Exfils,
    Quests,
}

impl DataClass {
    pub const ALL: [DataClass; 6] = [
        DataClass::Players,
        DataClass::LooseLoot,
        DataClass::Containers,
        DataClass::Corpses,
        DataClass::Exfils,
        DataClass::Quests,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataClass::Players => "players",
            DataClass::LooseLoot => "loose_loot",
            DataClass::Containers => "containers",
            DataClass::Corpses => "corpses",
            DataClass::Exfils => "exfils",
            DataClass::Quests => "quests",
        };
        f.write_str(name)
    }
}
