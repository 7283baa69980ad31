//! Rolls a single star system through the world-building rule chain.
//!
//! Each step may depend on earlier results, so the rolls happen in a fixed
//! order: size, atmosphere, hydrographics, population, government, law,
//! starport and bases, tech level, gas giant, then the name.

use rand::Rng;

use crate::dice::{d6, two_d6};
use crate::names::DigraphTable;
use crate::uwp::{clamp_code, Uwp};
use crate::world::{Bases, Starport, World};

/// Default gas-giant threshold. A d6 never exceeds it, so every system has one.
pub const DEFAULT_GAS_GIANT_THRESHOLD: i32 = 9;

/// Rolled attributes before naming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldProfile {
    pub uwp: Uwp,
    pub bases: Bases,
    pub gas_giant: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct SystemGenerator {
    /// A system has a gas giant when 1d6 <= this value
    pub gas_giant_threshold: i32,
}

impl Default for SystemGenerator {
    fn default() -> Self {
        Self {
            gas_giant_threshold: DEFAULT_GAS_GIANT_THRESHOLD,
        }
    }
}

impl SystemGenerator {
    pub fn new(gas_giant_threshold: i32) -> Self {
        Self { gas_giant_threshold }
    }

    /// Roll and name one system from a single random stream.
    pub fn generate(&self, table: &DigraphTable, rng: &mut impl Rng) -> World {
        let profile = self.roll_profile(rng);
        let name = table.generate_name(rng);
        self.assemble(name, profile)
    }

    /// Roll a system with names drawn from a separate stream.
    pub fn generate_split(
        &self,
        table: &DigraphTable,
        rng: &mut impl Rng,
        name_rng: &mut impl Rng,
    ) -> World {
        let profile = self.roll_profile(rng);
        let name = table.generate_name(name_rng);
        self.assemble(name, profile)
    }

    /// Name a rolled profile. Populous worlds (9+) are written in capitals.
    pub fn assemble(&self, name: String, profile: WorldProfile) -> World {
        let name = if profile.uwp.population >= 9 {
            name.to_uppercase()
        } else {
            name
        };
        World::new(name, profile.uwp, profile.bases, profile.gas_giant)
    }

    pub fn roll_profile(&self, rng: &mut impl Rng) -> WorldProfile {
        let size = two_d6(rng) - 2;

        let mut atmosphere = (two_d6(rng) - 7 + size).max(0);
        if size == 0 {
            atmosphere = 0;
        }

        let mut hydrographics = two_d6(rng) - 7 + atmosphere;
        if atmosphere < 2 || atmosphere >= 10 {
            hydrographics -= 4;
        }
        if hydrographics < 0 || size < 2 {
            hydrographics = 0;
        }
        hydrographics = hydrographics.min(10);

        let population = two_d6(rng) - 2;
        let government = (two_d6(rng) - 7 + population).max(0);
        let law = (two_d6(rng) - 7 + government).max(0);

        let starport = Starport::from_roll(two_d6(rng));
        let bases = roll_bases(starport, rng);

        let tech_level = (d6(rng)
            + starport.tech_bonus()
            + tech_modifier(size, atmosphere, hydrographics, population, government))
        .max(0);

        let gas_giant = d6(rng) <= self.gas_giant_threshold;

        let uwp = Uwp {
            starport,
            size: clamp_code(size),
            atmosphere: clamp_code(atmosphere),
            hydrographics: clamp_code(hydrographics),
            population: clamp_code(population),
            government: clamp_code(government),
            law: clamp_code(law),
            tech_level: clamp_code(tech_level),
        };
        WorldProfile { uwp, bases, gas_giant }
    }
}

/// Independent 2d6 checks for each base the starport class allows.
fn roll_bases(starport: Starport, rng: &mut impl Rng) -> Bases {
    let thresholds = starport.base_thresholds();
    let mut check = |threshold: Option<i32>| match threshold {
        Some(t) => two_d6(&mut *rng) >= t,
        None => false,
    };
    let scout = check(thresholds.scout);
    let naval = check(thresholds.naval);
    let research = check(thresholds.research);
    let pirate = check(thresholds.pirate);
    Bases { naval, scout, research, pirate }
}

/// Tech level adjustments from the physical and social profile.
fn tech_modifier(size: i32, atmosphere: i32, hydrographics: i32, population: i32, government: i32) -> i32 {
    let mut tech = 0;
    if size <= 4 {
        tech += 1;
    }
    if size <= 1 {
        tech += 1;
    }
    if atmosphere <= 3 || atmosphere >= 10 {
        tech += 1;
    }
    if hydrographics >= 9 {
        tech += 1;
    }
    if hydrographics >= 10 {
        tech += 1;
    }
    if (1..=5).contains(&population) {
        tech += 1;
    }
    if population >= 9 {
        tech += 2;
    }
    if population >= 10 {
        tech += 2;
    }
    if government == 0 || government == 5 {
        tech += 1;
    }
    if government == 13 {
        tech -= 2;
    }
    tech
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uwp::MAX_CODE;
    use crate::world::TradeCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn worlds(n: usize, seed: u64) -> Vec<World> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let table = DigraphTable::build(&mut rng);
        let generator = SystemGenerator::default();
        (0..n).map(|_| generator.generate(&table, &mut rng)).collect()
    }

    #[test]
    fn test_codes_in_range() {
        for world in worlds(10000, 42) {
            let uwp = world.uwp;
            assert!(uwp.size <= 10, "size {}", uwp.size);
            assert!(uwp.atmosphere <= MAX_CODE);
            assert!(uwp.hydrographics <= 10);
            assert!(uwp.population <= 10);
            assert!(uwp.government <= MAX_CODE);
            assert!(uwp.law <= MAX_CODE);
            assert!(uwp.tech_level <= MAX_CODE);
            if uwp.size == 0 {
                assert_eq!(uwp.atmosphere, 0);
            }
            if uwp.size < 2 {
                assert_eq!(uwp.hydrographics, 0);
            }
        }
    }

    #[test]
    fn test_starport_x_has_no_bases() {
        let mut seen = 0;
        for world in worlds(10000, 42) {
            if world.uwp.starport == Starport::X {
                seen += 1;
                assert!(!world.bases.any());
            }
        }
        assert!(seen > 0, "no starport X in 10000 systems");
    }

    #[test]
    fn test_starport_x_tech_penalty() {
        // Removing the modifiers and the -4 penalty must leave a bare d6 roll
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let generator = SystemGenerator::default();
        for _ in 0..10000 {
            let profile = generator.roll_profile(&mut rng);
            let uwp = profile.uwp;
            if uwp.starport != Starport::X {
                continue;
            }
            let modifier = tech_modifier(
                uwp.size as i32,
                uwp.atmosphere as i32,
                uwp.hydrographics as i32,
                uwp.population as i32,
                uwp.government as i32,
            );
            let raw = uwp.tech_level as i32 - modifier + 4;
            if uwp.tech_level > 0 {
                assert!((1..=6).contains(&raw), "die roll {} implied by {}", raw, uwp);
            }
        }
    }

    #[test]
    fn test_base_frequencies_follow_table() {
        let mut counts: HashMap<Starport, (u32, u32, u32, u32, u32)> = HashMap::new();
        for world in worlds(20000, 7) {
            let entry = counts.entry(world.uwp.starport).or_default();
            entry.0 += 1;
            entry.1 += world.bases.naval as u32;
            entry.2 += world.bases.scout as u32;
            entry.3 += world.bases.research as u32;
            entry.4 += world.bases.pirate as u32;
        }
        let rate = |n: u32, total: u32| n as f64 / total as f64;

        let (a, a_naval, a_scout, _, a_pirate) = counts[&Starport::A];
        // 2d6 >= 8 is 15/36, 2d6 >= 10 is 6/36
        assert!((rate(a_naval, a) - 15.0 / 36.0).abs() < 0.06);
        assert!((rate(a_scout, a) - 6.0 / 36.0).abs() < 0.06);
        assert_eq!(a_pirate, 0);

        let (c, c_naval, _, _, c_pirate) = counts[&Starport::C];
        assert_eq!(c_naval, 0);
        assert!((rate(c_pirate, c) - 1.0 / 36.0).abs() < 0.03);

        let (d, _, d_scout, d_research, _) = counts[&Starport::D];
        assert!((rate(d_scout, d) - 21.0 / 36.0).abs() < 0.06);
        assert_eq!(d_research, 0);

        let (_, e_naval, e_scout, e_research, _) = counts[&Starport::E];
        assert_eq!(e_naval + e_scout + e_research, 0);
    }

    #[test]
    fn test_gas_giant_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let always = SystemGenerator::default();
        assert!((0..1000).all(|_| always.roll_profile(&mut rng).gas_giant));

        let never = SystemGenerator::new(0);
        assert!((0..1000).all(|_| !never.roll_profile(&mut rng).gas_giant));

        let half = SystemGenerator::new(3);
        let present = (0..10000).filter(|_| half.roll_profile(&mut rng).gas_giant).count();
        assert!((4000..6000).contains(&present), "{}", present);
    }

    #[test]
    fn test_uwp_round_trip() {
        for world in worlds(1000, 11) {
            let parsed: Uwp = world.uwp.to_string().parse().unwrap();
            assert_eq!(parsed, world.uwp);
        }
    }

    #[test]
    fn test_populous_worlds_shout() {
        for world in worlds(2000, 5) {
            if world.uwp.population >= 9 {
                assert_eq!(world.name, world.name.to_uppercase());
                assert!(world.has(TradeCode::High));
            }
        }
    }

    #[test]
    fn test_tech_modifier() {
        assert_eq!(tech_modifier(8, 6, 5, 6, 4), 0);
        assert_eq!(tech_modifier(0, 0, 0, 10, 0), 1 + 1 + 1 + 4 + 1);
        assert_eq!(tech_modifier(8, 6, 10, 3, 13), 2 + 1 - 2);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(worlds(50, 99), worlds(50, 99));
    }
}
