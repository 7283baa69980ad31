//! Star systems: typed attributes, starports, bases and trade classifications.
//!
//! A [`World`] is an immutable record. Trade codes and the travel zone are
//! derived once from its profile; tag strings only exist for output.

use serde::{Deserialize, Serialize, Serializer};

use crate::uwp::{ehex, Uwp};

/// Starport quality, A (excellent) through E (frontier), X (none).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Starport {
    A,
    B,
    C,
    D,
    E,
    X,
}

/// 2d6 thresholds (roll >= value) for each base type at a starport class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseThresholds {
    pub scout: Option<i32>,
    pub naval: Option<i32>,
    pub research: Option<i32>,
    pub pirate: Option<i32>,
}

impl Starport {
    /// Classify a 2d6 starport roll.
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            ..=4 => Starport::A,
            5..=6 => Starport::B,
            7..=8 => Starport::C,
            9 => Starport::D,
            10..=11 => Starport::E,
            _ => Starport::X,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Starport::A => 'A',
            Starport::B => 'B',
            Starport::C => 'C',
            Starport::D => 'D',
            Starport::E => 'E',
            Starport::X => 'X',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'A' => Some(Starport::A),
            'B' => Some(Starport::B),
            'C' => Some(Starport::C),
            'D' => Some(Starport::D),
            'E' => Some(Starport::E),
            'X' => Some(Starport::X),
            _ => None,
        }
    }

    pub fn tech_bonus(self) -> i32 {
        match self {
            Starport::A => 6,
            Starport::B => 4,
            Starport::C => 2,
            Starport::D | Starport::E => 0,
            Starport::X => -4,
        }
    }

    pub fn base_thresholds(self) -> BaseThresholds {
        match self {
            Starport::A => BaseThresholds { scout: Some(10), naval: Some(8), research: Some(8), pirate: None },
            Starport::B => BaseThresholds { scout: Some(9), naval: Some(8), research: Some(10), pirate: None },
            Starport::C => BaseThresholds { scout: Some(8), naval: None, research: Some(10), pirate: Some(12) },
            Starport::D => BaseThresholds { scout: Some(7), naval: None, research: None, pirate: Some(10) },
            Starport::E => BaseThresholds { scout: None, naval: None, research: None, pirate: Some(10) },
            Starport::X => BaseThresholds::default(),
        }
    }

    /// Whether ships can refuel and trade here at all.
    pub fn is_usable(self) -> bool {
        self != Starport::X
    }

    /// Class A and B ports anchor communication routes.
    pub fn is_major(self) -> bool {
        matches!(self, Starport::A | Starport::B)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    pub naval: bool,
    pub scout: bool,
    pub research: bool,
    pub pirate: bool,
}

impl Bases {
    pub fn any(&self) -> bool {
        self.naval || self.scout || self.research || self.pirate
    }
}

/// Derived world classification, listed in tag emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeCode {
    Asteroid,
    Vacuum,
    Water,
    Desert,
    Ice,
    Fluid,
    Barren,
    Low,
    High,
    Agricultural,
    NonAgricultural,
    Industrial,
    NonIndustrial,
    Rich,
    Poor,
}

impl TradeCode {
    pub const ALL: [TradeCode; 15] = [
        TradeCode::Asteroid,
        TradeCode::Vacuum,
        TradeCode::Water,
        TradeCode::Desert,
        TradeCode::Ice,
        TradeCode::Fluid,
        TradeCode::Barren,
        TradeCode::Low,
        TradeCode::High,
        TradeCode::Agricultural,
        TradeCode::NonAgricultural,
        TradeCode::Industrial,
        TradeCode::NonIndustrial,
        TradeCode::Rich,
        TradeCode::Poor,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            TradeCode::Asteroid => "asteroid",
            TradeCode::Vacuum => "vacuum",
            TradeCode::Water => "water",
            TradeCode::Desert => "desert",
            TradeCode::Ice => "ice",
            TradeCode::Fluid => "fluid",
            TradeCode::Barren => "barren",
            TradeCode::Low => "low",
            TradeCode::High => "high",
            TradeCode::Agricultural => "agriculture",
            TradeCode::NonAgricultural => "non-agriculture",
            TradeCode::Industrial => "industrial",
            TradeCode::NonIndustrial => "non-industrial",
            TradeCode::Rich => "rich",
            TradeCode::Poor => "poor",
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of trade classifications held by one world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeCodes(u16);

impl TradeCodes {
    /// Classify a profile by the trade-code thresholds.
    pub fn classify(uwp: &Uwp) -> Self {
        let size = uwp.size;
        let atmo = uwp.atmosphere;
        let hydro = uwp.hydrographics;
        let pop = uwp.population;
        let gov = uwp.government;
        let law = uwp.law;

        let mut codes = TradeCodes::default();
        let mut set = |code: TradeCode, holds: bool| {
            if holds {
                codes.insert(code);
            }
        };
        set(TradeCode::Asteroid, size == 0);
        set(TradeCode::Vacuum, atmo == 0);
        set(TradeCode::Water, hydro == 10);
        set(TradeCode::Desert, atmo >= 2 && hydro == 0);
        set(TradeCode::Ice, hydro >= 1 && atmo <= 1);
        set(TradeCode::Fluid, hydro >= 1 && atmo >= 10);
        set(TradeCode::Barren, pop == 0 && gov == 0 && law == 0);
        set(TradeCode::Low, (1..=3).contains(&pop));
        set(TradeCode::High, pop >= 9);
        set(
            TradeCode::Agricultural,
            (4..=9).contains(&atmo) && (4..=8).contains(&hydro) && (5..=7).contains(&pop),
        );
        set(TradeCode::NonAgricultural, atmo <= 3 && hydro <= 3 && pop >= 6);
        set(TradeCode::Industrial, matches!(atmo, 0 | 1 | 2 | 4 | 7 | 9) && pop >= 9);
        set(TradeCode::NonIndustrial, pop <= 6);
        set(
            TradeCode::Rich,
            (4..=9).contains(&gov) && matches!(atmo, 6 | 8) && (6..=8).contains(&pop),
        );
        set(TradeCode::Poor, (2..=5).contains(&atmo) && hydro <= 3);
        codes
    }

    pub fn insert(&mut self, code: TradeCode) {
        self.0 |= code.bit();
    }

    pub fn contains(&self, code: TradeCode) -> bool {
        self.0 & code.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Held codes in emission order.
    pub fn iter(&self) -> impl Iterator<Item = TradeCode> + '_ {
        TradeCode::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<TradeCode> for TradeCodes {
    fn from_iter<I: IntoIterator<Item = TradeCode>>(iter: I) -> Self {
        let mut codes = TradeCodes::default();
        for code in iter {
            codes.insert(code);
        }
        codes
    }
}

impl Serialize for TradeCodes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(TradeCode::tag))
    }
}

/// One generated star system.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct World {
    pub name: String,
    pub uwp: Uwp,
    pub bases: Bases,
    pub gas_giant: bool,
    pub trade_codes: TradeCodes,
    pub amber_zone: bool,
}

impl World {
    /// Assemble a world, clamping the profile and deriving its classifications.
    ///
    /// Starport X worlds never carry bases.
    pub fn new(name: impl Into<String>, uwp: Uwp, bases: Bases, gas_giant: bool) -> Self {
        let uwp = uwp.clamped();
        let bases = if uwp.starport.is_usable() { bases } else { Bases::default() };
        let trade_codes = TradeCodes::classify(&uwp);
        let amber_zone = !bases.pirate && is_amber(&uwp);
        Self {
            name: name.into(),
            uwp,
            bases,
            gas_giant,
            trade_codes,
            amber_zone,
        }
    }

    pub fn has(&self, code: TradeCode) -> bool {
        self.trade_codes.contains(code)
    }

    /// Output tags in their fixed emission order.
    pub fn tags(&self) -> Vec<String> {
        let uwp = &self.uwp;
        let mut tags = Vec::with_capacity(32);
        let flag = |tags: &mut Vec<String>, code: TradeCode| {
            if self.has(code) {
                tags.push(code.tag().to_string());
            }
        };

        if self.gas_giant {
            tags.push("gasgiant".to_string());
        }
        tags.push(format!("size-{}", ehex(uwp.size)));
        flag(&mut tags, TradeCode::Asteroid);
        tags.push(format!("atmosphere-{}", ehex(uwp.atmosphere)));
        flag(&mut tags, TradeCode::Vacuum);
        tags.push(format!("hydro-{}", ehex(uwp.hydrographics)));
        for code in [TradeCode::Water, TradeCode::Desert, TradeCode::Ice, TradeCode::Fluid] {
            flag(&mut tags, code);
        }
        tags.push(format!("population-{}", ehex(uwp.population)));
        for code in [
            TradeCode::Barren,
            TradeCode::Low,
            TradeCode::High,
            TradeCode::Agricultural,
            TradeCode::NonAgricultural,
            TradeCode::Industrial,
            TradeCode::NonIndustrial,
            TradeCode::Rich,
            TradeCode::Poor,
        ] {
            flag(&mut tags, code);
        }
        tags.push(format!("tech-{}", ehex(uwp.tech_level)));
        tags.push(format!("government-{}", ehex(uwp.government)));
        tags.push(format!("starport-{}", uwp.starport.letter()));
        tags.push(format!("law-{}", ehex(uwp.law)));
        if self.bases.naval {
            tags.push("naval".to_string());
        }
        if self.bases.scout {
            tags.push("scout".to_string());
        }
        if self.bases.research {
            tags.push("research".to_string());
        }
        if self.bases.pirate {
            tags.push("pirate".to_string());
            tags.push("hazard".to_string());
        }
        if self.amber_zone {
            tags.push("amber".to_string());
        }
        tags.push(format!("\"{}\"", self.name));
        tags.push(uwp.to_string());
        tags
    }
}

fn is_amber(uwp: &Uwp) -> bool {
    uwp.atmosphere >= 10
        || (uwp.population > 0 && uwp.government == 0)
        || (uwp.population > 0 && uwp.law == 0)
        || uwp.government == 7
        || uwp.government == 10
        || uwp.law >= 9
}
