//! Interstellar route networks.
//!
//! Candidate edges are enumerated over every pair of systems and sorted into
//! three classes (communication, trade, rich trade) by starport, base and
//! trade-code compatibility within a distance limit. Each class is then thinned
//! to a minimum spanning forest with Kruskal's algorithm.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::disjoint_set::DisjointSet;
use crate::grid::{Coord, GridGeometry, Position};
use crate::world::{TradeCode, World};

pub const COMMUNICATION_RANGE: u32 = 2;
pub const TRADE_RANGE: u32 = 2;
pub const RICH_TRADE_RANGE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    Communication,
    Trade,
    RichTrade,
}

impl RouteClass {
    pub const ALL: [RouteClass; 3] = [RouteClass::Communication, RouteClass::Trade, RouteClass::RichTrade];

    /// Class name used in route labels.
    pub fn tag(self) -> &'static str {
        match self {
            RouteClass::Communication => "communication",
            RouteClass::Trade => "trade",
            RouteClass::RichTrade => "rich",
        }
    }
}

/// Candidate link between two systems. `from` precedes `to` in map order
/// (column by column), so labels read left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: Coord,
    pub to: Coord,
    pub from_pos: Position,
    pub to_pos: Position,
    pub distance: u32,
    pub class: RouteClass,
}

impl Edge {
    /// Map label, e.g. "0102-0203 trade".
    pub fn label(&self) -> String {
        format!("{}-{} {}", self.from_pos.label(), self.to_pos.label(), self.class.tag())
    }
}

/// Matches a world holding any of the listed trade codes.
#[derive(Clone, Copy, Debug)]
pub struct Pattern(pub &'static [TradeCode]);

impl Pattern {
    pub fn matches(&self, world: &World) -> bool {
        self.0.iter().any(|code| world.has(*code))
    }
}

/// True when `a` satisfies `first` and `b` satisfies `second`, or the other way round.
pub fn symmetric(a: &World, b: &World, first: impl Fn(&World) -> bool, second: impl Fn(&World) -> bool) -> bool {
    (first(a) && second(b)) || (first(b) && second(a))
}

/// Pair of patterns describing goods one world sells and the other buys.
#[derive(Clone, Copy, Debug)]
pub struct TradeRule {
    pub first: Pattern,
    pub second: Pattern,
}

impl TradeRule {
    pub fn matches(&self, a: &World, b: &World) -> bool {
        symmetric(a, b, |w| self.first.matches(w), |w| self.second.matches(w))
    }
}

const fn rule(first: &'static [TradeCode], second: &'static [TradeCode]) -> TradeRule {
    TradeRule {
        first: Pattern(first),
        second: Pattern(second),
    }
}

pub const TRADE_RULES: [TradeRule; 13] = {
    use TradeCode::*;
    [
        rule(&[Agricultural], &[Agricultural, Desert, High, Industrial, Low, NonAgricultural, Rich]),
        rule(&[Asteroid], &[Asteroid, Industrial, NonAgricultural, Rich, Vacuum]),
        rule(&[Desert], &[Desert, NonAgricultural]),
        rule(&[Fluid], &[Fluid, Industrial]),
        rule(&[High], &[High, Low, Rich]),
        rule(&[Ice], &[Industrial]),
        rule(
            &[Industrial],
            &[Agricultural, Asteroid, Desert, Fluid, High, Industrial, NonIndustrial, Poor, Rich, Vacuum, Water],
        ),
        rule(&[Low], &[Industrial, Rich]),
        rule(&[NonAgricultural], &[Asteroid, Desert, Vacuum]),
        rule(&[NonIndustrial], &[Industrial]),
        rule(&[Rich], &[Agricultural, Desert, High, Industrial, NonAgricultural, Rich]),
        rule(&[Vacuum], &[Asteroid, Industrial, Vacuum]),
        rule(&[Water], &[Industrial, Rich, Water]),
    ]
};

pub const RICH_TRADE_RULE: TradeRule = {
    use TradeCode::*;
    rule(&[Rich], &[Asteroid, Agricultural, Desert, High, Industrial, NonAgricultural, Water, Rich, Low])
};

/// Either end has a class A/B starport or a naval base.
pub fn is_communication(a: &World, b: &World) -> bool {
    let anchor = |w: &World| w.uwp.starport.is_major() || w.bases.naval;
    anchor(a) || anchor(b)
}

pub fn is_trade(a: &World, b: &World) -> bool {
    TRADE_RULES.iter().any(|r| r.matches(a, b))
}

pub fn is_rich_trade(a: &World, b: &World) -> bool {
    RICH_TRADE_RULE.matches(a, b)
}

/// Sorted route labels per class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Routes {
    pub communication: Vec<String>,
    pub trade: Vec<String>,
    pub rich_trade: Vec<String>,
}

impl Routes {
    pub fn class(&self, class: RouteClass) -> &[String] {
        match class {
            RouteClass::Communication => &self.communication,
            RouteClass::Trade => &self.trade,
            RouteClass::RichTrade => &self.rich_trade,
        }
    }

    pub fn is_empty(&self) -> bool {
        RouteClass::ALL.iter().all(|c| self.class(*c).is_empty())
    }
}

/// Every qualifying edge, in pair enumeration order.
///
/// Systems without a usable starport take part in rich trade only.
pub fn candidate_edges<G: GridGeometry + ?Sized>(geometry: &G, worlds: &BTreeMap<Coord, World>) -> Vec<Edge> {
    let mut systems: Vec<(Coord, Position, &World)> = worlds
        .iter()
        .map(|(coord, world)| (*coord, geometry.index_to_xy(*coord), world))
        .collect();
    systems.sort_by_key(|(_, pos, _)| (pos.x, pos.y));

    let mut edges = Vec::new();
    for (i, &(from, from_pos, a)) in systems.iter().enumerate() {
        for &(to, to_pos, b) in &systems[i + 1..] {
            let distance = geometry.distance(from_pos, to_pos);
            let mut push = |class: RouteClass| {
                edges.push(Edge { from, to, from_pos, to_pos, distance, class });
            };

            let ported = a.uwp.starport.is_usable() && b.uwp.starport.is_usable();
            if ported && distance <= COMMUNICATION_RANGE && is_communication(a, b) {
                push(RouteClass::Communication);
            }
            if ported && distance <= TRADE_RANGE && is_trade(a, b) {
                push(RouteClass::Trade);
            }
            if distance <= RICH_TRADE_RANGE && is_rich_trade(a, b) {
                push(RouteClass::RichTrade);
            }
        }
    }
    edges
}

/// Kruskal's minimum spanning forest.
///
/// Ties keep their input order. Only edges that join two separate components
/// are kept, so the result is acyclic.
pub fn minimum_spanning_forest(edges: &[Edge]) -> Vec<Edge> {
    let Some(max_index) = edges.iter().map(|e| e.from.0.max(e.to.0)).max() else {
        return Vec::new();
    };
    let mut clusters = DisjointSet::new(max_index + 1);

    let mut sorted = edges.to_vec();
    sorted.sort_by_key(|e| e.distance);

    sorted
        .into_iter()
        .filter(|e| clusters.union(e.from.0, e.to.0))
        .collect()
}

/// Build the three route networks for a populated map.
pub fn synthesize<G: GridGeometry + ?Sized>(geometry: &G, worlds: &BTreeMap<Coord, World>) -> Routes {
    let candidates = candidate_edges(geometry, worlds);

    let reduce = |class: RouteClass| -> Vec<String> {
        let class_edges: Vec<Edge> = candidates.iter().filter(|e| e.class == class).copied().collect();
        let forest = minimum_spanning_forest(&class_edges);
        debug!(
            class = class.tag(),
            candidates = class_edges.len(),
            retained = forest.len(),
            "reduced route class"
        );
        let mut labels: Vec<String> = forest.iter().map(Edge::label).collect();
        labels.sort();
        labels
    };

    Routes {
        communication: reduce(RouteClass::Communication),
        trade: reduce(RouteClass::Trade),
        rich_trade: reduce(RouteClass::RichTrade),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SquareGrid;
    use crate::uwp::Uwp;
    use crate::world::Bases;

    fn world(uwp: &str) -> World {
        World::new("Test", uwp.parse::<Uwp>().unwrap(), Bases::default(), true)
    }

    fn naval(uwp: &str) -> World {
        let bases = Bases { naval: true, ..Bases::default() };
        World::new("Test", uwp.parse::<Uwp>().unwrap(), bases, true)
    }

    fn edge(from: usize, to: usize, distance: u32) -> Edge {
        let grid = SquareGrid::new(8, 10);
        Edge {
            from: Coord(from),
            to: Coord(to),
            from_pos: grid.index_to_xy(Coord(from)),
            to_pos: grid.index_to_xy(Coord(to)),
            distance,
            class: RouteClass::Trade,
        }
    }

    // Agricultural + rich (atmosphere 6, hydro 5, pop 6, gov 5)
    const GARDEN: &str = "C865653-7";
    // Industrial + high (atmosphere 7, pop 9)
    const FORGE: &str = "C7779A6-9";
    // Poor, non-industrial
    const SCRUB: &str = "D542434-5";

    #[test]
    fn test_label_format() {
        let e = Edge { class: RouteClass::RichTrade, ..edge(0, 9, 2) };
        assert_eq!(e.label(), "0101-0202 rich");
    }

    #[test]
    fn test_symmetric_rule_matching() {
        let garden = world(GARDEN);
        let forge = world(FORGE);
        let scrub = world(SCRUB);
        assert!(is_trade(&garden, &forge));
        assert!(is_trade(&forge, &garden));
        // Industrial buys from poor worlds
        assert!(is_trade(&scrub, &forge));
        // Poor/non-industrial vs agricultural/rich has no rule
        assert!(!is_trade(&scrub, &garden));
    }

    /// World carrying exactly one trade classification.
    fn coded(code: TradeCode) -> World {
        World {
            trade_codes: [code].into_iter().collect(),
            ..world("C000000-0")
        }
    }

    #[test]
    fn test_trade_table_pairs() {
        use TradeCode::*;
        let listed: &[(TradeCode, &[TradeCode])] = &[
            (Agricultural, &[Agricultural, Desert, High, Industrial, Low, NonAgricultural, Rich]),
            (Asteroid, &[Asteroid, Industrial, NonAgricultural, Rich, Vacuum]),
            (Desert, &[Desert, NonAgricultural]),
            (Fluid, &[Fluid, Industrial]),
            (High, &[High, Low, Rich]),
            (Ice, &[Industrial]),
            (
                Industrial,
                &[Agricultural, Asteroid, Desert, Fluid, High, Industrial, NonIndustrial, Poor, Rich, Vacuum, Water],
            ),
            (Low, &[Industrial, Rich]),
            (NonAgricultural, &[Asteroid, Desert, Vacuum]),
            (NonIndustrial, &[Industrial]),
            (Rich, &[Agricultural, Desert, High, Industrial, NonAgricultural, Rich]),
            (Vacuum, &[Asteroid, Industrial, Vacuum]),
            (Water, &[Industrial, Rich, Water]),
        ];
        let pairs = |a: TradeCode, b: TradeCode| {
            listed
                .iter()
                .any(|(first, second)| (*first == a && second.contains(&b)) || (*first == b && second.contains(&a)))
        };

        for a in TradeCode::ALL {
            for b in TradeCode::ALL {
                let expected = pairs(a, b);
                assert_eq!(is_trade(&coded(a), &coded(b)), expected, "{:?} - {:?}", a, b);
                assert_eq!(is_trade(&coded(b), &coded(a)), expected, "{:?} - {:?}", b, a);
            }
        }
        assert!(!is_trade(&coded(Agricultural), &coded(Asteroid)));
        assert!(!is_trade(&coded(Barren), &coded(Industrial)));
    }

    #[test]
    fn test_rich_trade_table_pairs() {
        use TradeCode::*;
        let partners = [Asteroid, Agricultural, Desert, High, Industrial, NonAgricultural, Water, Rich, Low];
        for a in TradeCode::ALL {
            for b in TradeCode::ALL {
                let expected = (a == Rich && partners.contains(&b)) || (b == Rich && partners.contains(&a));
                assert_eq!(is_rich_trade(&coded(a), &coded(b)), expected, "{:?} - {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_agricultural_and_asteroid_do_not_trade() {
        // Agricultural, non-industrial
        let farm = world("C865623-7");
        // Asteroid, vacuum, non-industrial
        let rock = world("C000400-8");
        let mut worlds = BTreeMap::new();
        worlds.insert(Coord(0), farm);
        worlds.insert(Coord(1), rock);
        let routes = synthesize(&SquareGrid::new(8, 10), &worlds);
        assert!(routes.trade.is_empty());
    }

    #[test]
    fn test_rich_trade_needs_rich_end() {
        let garden = world(GARDEN);
        let forge = world(FORGE);
        let scrub = world(SCRUB);
        assert!(is_rich_trade(&forge, &garden));
        assert!(!is_rich_trade(&forge, &scrub));
    }

    #[test]
    fn test_communication_anchor() {
        assert!(is_communication(&world("A542334-9"), &world(SCRUB)));
        assert!(is_communication(&world(SCRUB), &naval("C542334-9")));
        assert!(!is_communication(&world(SCRUB), &world(GARDEN)));
    }

    #[test]
    fn test_forest_drops_cycle() {
        // Triangle 0-1-2 plus an isolated pair 5-6
        let edges = vec![edge(0, 1, 1), edge(1, 2, 1), edge(0, 2, 2), edge(5, 6, 2)];
        let forest = minimum_spanning_forest(&edges);
        assert_eq!(forest, vec![edge(0, 1, 1), edge(1, 2, 1), edge(5, 6, 2)]);
    }

    #[test]
    fn test_forest_prefers_short_edges_and_keeps_tie_order() {
        let edges = vec![edge(0, 2, 2), edge(0, 1, 1), edge(2, 3, 1), edge(1, 3, 1)];
        let forest = minimum_spanning_forest(&edges);
        assert_eq!(forest, vec![edge(0, 1, 1), edge(2, 3, 1), edge(1, 3, 1)]);
    }

    #[test]
    fn test_forest_idempotent_and_acyclic() {
        let grid = SquareGrid::new(8, 10);
        let mut edges = Vec::new();
        for a in 0..grid.len() {
            for b in (a + 1)..grid.len() {
                let d = grid.coord_distance(Coord(a), Coord(b));
                if d <= 2 && (a * 7 + b * 3) % 4 != 0 {
                    edges.push(edge(a, b, d));
                }
            }
        }
        let forest = minimum_spanning_forest(&edges);
        assert_eq!(minimum_spanning_forest(&forest), forest);

        let mut clusters = DisjointSet::new(grid.len());
        for e in &forest {
            assert!(clusters.union(e.from.0, e.to.0), "cycle through {:?}", e);
        }
    }

    #[test]
    fn test_empty_forest() {
        assert!(minimum_spanning_forest(&[]).is_empty());
        let routes = synthesize(&SquareGrid::new(8, 10), &BTreeMap::new());
        assert!(routes.is_empty());
    }

    #[test]
    fn test_starport_x_excluded_from_trade_and_communication() {
        let grid = SquareGrid::new(8, 10);
        let mut worlds = BTreeMap::new();
        worlds.insert(Coord(0), world("X7779A6-5"));
        worlds.insert(Coord(1), world("A865653-C"));
        let routes = synthesize(&grid, &worlds);
        assert!(routes.communication.is_empty());
        assert!(routes.trade.is_empty());
        // Rich trade ignores starports
        assert_eq!(routes.rich_trade, vec!["0101-0201 rich"]);
    }

    #[test]
    fn test_range_limits() {
        let grid = SquareGrid::new(8, 10);
        let mut worlds = BTreeMap::new();
        // Distance 3 along the first row
        worlds.insert(Coord(0), world(FORGE));
        worlds.insert(Coord(3), world(GARDEN));
        let routes = synthesize(&grid, &worlds);
        assert!(routes.trade.is_empty());
        assert_eq!(routes.rich_trade, vec!["0101-0401 rich"]);
    }

    #[test]
    fn test_synthesize_sorts_labels() {
        let grid = SquareGrid::new(8, 10);
        let mut worlds = BTreeMap::new();
        for coord in [0, 1, 8, 9] {
            worlds.insert(Coord(coord), naval("A865653-C"));
        }
        let routes = synthesize(&grid, &worlds);
        assert_eq!(routes.communication.len(), 3);
        let mut sorted = routes.communication.clone();
        sorted.sort();
        assert_eq!(routes.communication, sorted);
    }
}
