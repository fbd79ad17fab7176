//! Static game content: characters, perks, bosses and stages.
//!
//! The simulation only reads these tables, keyed by identifier or stage
//! index.

/// An sRGB colour hint for front ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Perks ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PerkKind {
    /// Shortens the auto-fire cooldown.
    RapidFire,
    /// Every auto-fire shot is paired with a second, higher one.
    DoubleShoot,
    /// Enemy contact no longer costs health.
    Shield,
    /// Heavier and wider shots.
    PowerUp,
}

impl PerkKind {
    pub const ALL: [PerkKind; 4] = [
        PerkKind::RapidFire,
        PerkKind::DoubleShoot,
        PerkKind::Shield,
        PerkKind::PowerUp,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PerkKind::RapidFire => "rapidfire",
            PerkKind::DoubleShoot => "doubleshoot",
            PerkKind::Shield => "shield",
            PerkKind::PowerUp => "powerup",
        }
    }

    pub fn info(self) -> &'static PerkInfo {
        // PERKS is indexed in ALL order.
        &PERKS[self as usize]
    }
}

#[derive(Debug)]
pub struct PerkInfo {
    pub kind: PerkKind,
    pub name: &'static str,
    pub description: &'static str,
    pub color: Rgb,
}

pub const PERKS: &[PerkInfo] = &[
    PerkInfo {
        kind: PerkKind::RapidFire,
        name: "Rapid Fire",
        description: "Increases fire rate",
        color: Rgb(0xFF, 0x6B, 0x6B),
    },
    PerkInfo {
        kind: PerkKind::DoubleShoot,
        name: "Double Shot",
        description: "Fires two projectiles at once",
        color: Rgb(0x4E, 0xCD, 0xC4),
    },
    PerkInfo {
        kind: PerkKind::Shield,
        name: "Shield",
        description: "Temporary invincibility",
        color: Rgb(0xFF, 0xE6, 0x6D),
    },
    PerkInfo {
        kind: PerkKind::PowerUp,
        name: "Power Up",
        description: "Increases damage",
        color: Rgb(0x6B, 0x9E, 0xFF),
    },
];

// ── Characters ────────────────────────────────────────────────────────────────

/// Flavour stats shown on the select screen; the simulation ignores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterStats {
    pub speed: u8,
    pub power: u8,
    pub defense: u8,
}

#[derive(Debug)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub color: Rgb,
    pub special_weapon: &'static str,
    pub special_ability: &'static str,
    pub stats: CharacterStats,
}

pub const CHARACTERS: &[Character] = &[
    Character {
        id: "1",
        name: "Tra",
        description: "The main protagonist",
        color: Rgb(0xFF, 0x6B, 0x6B),
        special_weapon: "Rapid Fire",
        special_ability: "Double Jump",
        stats: CharacterStats { speed: 8, power: 6, defense: 5 },
    },
    Character {
        id: "2",
        name: "Chef",
        description: "Master of the kitchen",
        color: Rgb(0x4E, 0xCD, 0xC4),
        special_weapon: "Flying Pan",
        special_ability: "Food Shield",
        stats: CharacterStats { speed: 5, power: 8, defense: 7 },
    },
    Character {
        id: "3",
        name: "Barista",
        description: "Coffee-powered runner",
        color: Rgb(0x6B, 0x9E, 0xFF),
        special_weapon: "Steam Blast",
        special_ability: "Caffeine Boost",
        stats: CharacterStats { speed: 7, power: 5, defense: 6 },
    },
    Character {
        id: "4",
        name: "Waiter",
        description: "Agile and quick",
        color: Rgb(0xFF, 0xE6, 0x6D),
        special_weapon: "Plate Throw",
        special_ability: "Quick Step",
        stats: CharacterStats { speed: 9, power: 4, defense: 4 },
    },
];

pub fn character(id: &str) -> Option<&'static Character> {
    CHARACTERS.iter().find(|c| c.id == id)
}

// ── Bosses & stages ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct BossInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Nominal health from the content sheet.  Session boss health is
    /// always tracked on a 0–100 scale.
    pub health: u32,
    pub attacks: &'static [&'static str],
}

pub const BOSSES: &[BossInfo] = &[
    BossInfo {
        id: "bigcheese",
        name: "Big Cheese",
        description: "The godfather of dairy",
        health: 100,
        attacks: &["Cheese Bomb", "Mozzarella Missile", "Parmesan Punch"],
    },
    BossInfo {
        id: "pastadonna",
        name: "Pasta Donna",
        description: "She'll make you an offer you can't refuse",
        health: 120,
        attacks: &["Spaghetti Lasso", "Ravioli Rain", "Linguine Lash"],
    },
    BossInfo {
        id: "baristaboss",
        name: "Barista Boss",
        description: "Extremely bitter and highly pressurized",
        health: 150,
        attacks: &["Espresso Shot", "Steam Blast", "Bean Barrage"],
    },
];

pub fn boss(id: &str) -> Option<&'static BossInfo> {
    BOSSES.iter().find(|b| b.id == id)
}

#[derive(Debug)]
pub struct Stage {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub boss_id: &'static str,
}

impl Stage {
    /// `None` when the stage names a boss that is not in `BOSSES`.
    pub fn boss(&self) -> Option<&'static BossInfo> {
        boss(self.boss_id)
    }
}

pub const STAGES: &[Stage] = &[
    Stage {
        id: "kitchen",
        name: "The Kitchen",
        description: "Watch out for flying meatballs!",
        boss_id: "bigcheese",
    },
    Stage {
        id: "restaurant",
        name: "The Restaurant",
        description: "Dodge the waiters and flying plates!",
        boss_id: "pastadonna",
    },
    Stage {
        id: "cafe",
        name: "The Cafe",
        description: "Beware of the steam and hot coffee!",
        boss_id: "baristaboss",
    },
];
