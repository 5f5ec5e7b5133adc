use crate::cell::Cell;
use crate::error::{SearchError, SearchResult};
use crate::grid::Grid;
use crate::neighbors::{MooreNeighborhood, NeighborPolicy};
use crate::pathfinder::{Path, PathFinder};
use crate::waypoint::Waypoint;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

/// A closed route starting and ending at home that visits every stop once.
///
/// Tours returned by [TourPlanner] hold at least the home cell; a hand-built tour must keep
/// `cells` non-empty for [Tour::home].
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    /// Concatenated leg paths with the shared boundary cells de-duplicated.
    pub cells: Vec<Cell>,
    pub cost: f64,
    /// Waypoints in visiting order, home excluded.
    pub stops: Vec<Waypoint>,
    /// One path per leg: home to the first stop, between stops, last stop back home.
    pub legs: Vec<Path>,
}

impl Tour {
    fn stay_home(home: Cell) -> Tour {
        Tour {
            cells: vec![home],
            cost: 0.0,
            stops: Vec::new(),
            legs: Vec::new(),
        }
    }

    fn from_legs(stops: Vec<Waypoint>, legs: Vec<Path>) -> Tour {
        let mut cells: Vec<Cell> = Vec::new();
        let mut cost = 0.0;
        for leg in &legs {
            let skip = usize::from(!cells.is_empty());
            cells.extend(leg.cells.iter().skip(skip));
            cost += leg.cost;
        }
        Tour {
            cells,
            cost,
            stops,
            legs,
        }
    }

    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn home(&self) -> Cell {
        self.cells[0]
    }

    /// Number of moves along the whole tour.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Pairwise leg paths between home (index 0) and every stop, computed once per query.
/// A missing entry means the leg is infeasible.
#[derive(Clone, Debug)]
pub struct LegTable {
    n: usize,
    legs: Vec<Option<Path>>,
}

impl LegTable {
    pub fn build<P: NeighborPolicy>(
        finder: &PathFinder<P>,
        grid: &Grid,
        nodes: &[Cell],
    ) -> SearchResult<LegTable> {
        let n = nodes.len();
        let mut legs = Vec::with_capacity(n * n);
        for (i, from) in nodes.iter().enumerate() {
            for (j, to) in nodes.iter().enumerate() {
                legs.push(if i == j {
                    None
                } else {
                    leg(finder, grid, *from, *to)?
                });
            }
        }
        debug!("Computed {} legs between {} nodes", n * n.saturating_sub(1), n);
        Ok(LegTable { n, legs })
    }

    pub fn get(&self, from: usize, to: usize) -> Option<&Path> {
        self.legs.get(from * self.n + to)?.as_ref()
    }

    /// Node sequence of a tour: home, each stop index shifted past home, home again.
    fn route(order: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
        std::iter::once(0)
            .chain(order.iter().map(|&s| s + 1))
            .chain(std::iter::once(0))
            .tuple_windows()
    }

    /// Total cost of visiting the stops in `order`, or [None] if some leg is infeasible.
    pub fn route_cost(&self, order: &[usize]) -> Option<f64> {
        Self::route(order).try_fold(0.0, |total, (a, b)| Some(total + self.get(a, b)?.cost))
    }

    fn route_legs(&self, order: &[usize]) -> Option<Vec<Path>> {
        Self::route(order)
            .map(|(a, b)| self.get(a, b).cloned())
            .collect()
    }
}

/// Runs a single leg. Blocked or disconnected stops make the leg infeasible rather than failing
/// the whole query; cancellation and caller errors propagate.
fn leg<P: NeighborPolicy>(
    finder: &PathFinder<P>,
    grid: &Grid,
    from: Cell,
    to: Cell,
) -> SearchResult<Option<Path>> {
    match finder.find(grid, from, to) {
        Ok(path) => Ok(Some(path)),
        Err(SearchError::Unreachable { .. } | SearchError::BlockedEndpoint(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Exact minimum-cost closed tour over a small set of waypoints.
///
/// Every visiting order is enumerated, so the running time grows with the factorial of the number
/// of waypoints. Among equally cheap orders the first in lexicographic permutation order wins.
#[derive(Clone, Debug)]
pub struct TourPlanner<P = MooreNeighborhood> {
    pub finder: PathFinder<P>,
    /// Compute every pairwise leg once up front instead of once per permutation.
    pub memoize_legs: bool,
    /// Evaluate permutations on the rayon thread pool. Only used together with `memoize_legs`.
    pub parallel: bool,
}

impl TourPlanner<MooreNeighborhood> {
    pub fn new() -> TourPlanner<MooreNeighborhood> {
        TourPlanner::with_finder(PathFinder::new())
    }
}

impl Default for TourPlanner<MooreNeighborhood> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: NeighborPolicy + Sync> TourPlanner<P> {
    pub fn with_finder(finder: PathFinder<P>) -> TourPlanner<P> {
        TourPlanner {
            finder,
            memoize_legs: true,
            parallel: false,
        }
    }

    fn check_cancelled(&self) -> SearchResult<()> {
        if self.finder.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Finds the cheapest tour that leaves `home`, visits every waypoint and returns.
    pub fn plan(&self, grid: &Grid, home: Cell, waypoints: &[Waypoint]) -> SearchResult<Tour> {
        grid.check_endpoint(&home)?;
        let stops: Vec<Waypoint> = waypoints
            .iter()
            .filter(|w| w.cell != home)
            .unique_by(|w| w.cell)
            .cloned()
            .collect();
        if let Some(w) = stops.iter().find(|w| !grid.is_within_bounds(&w.cell)) {
            return Err(SearchError::OutOfBounds(w.cell));
        }
        if stops.is_empty() {
            return Ok(Tour::stay_home(home));
        }
        if !grid.components_dirty() {
            if let Some(w) = stops.iter().find(|w| grid.unreachable(&home, &w.cell)) {
                info!("{} is not reachable from home {}", w, home);
                return Err(SearchError::NoFeasibleTour);
            }
        }

        let best = if self.memoize_legs {
            let nodes: Vec<Cell> = std::iter::once(home)
                .chain(stops.iter().map(|w| w.cell))
                .collect();
            let table = LegTable::build(&self.finder, grid, &nodes)?;
            self.best_order_memoized(&table, stops.len())?
                .and_then(|order| table.route_legs(&order).map(|legs| (order, legs)))
        } else {
            self.best_order_direct(grid, home, &stops)?
        };

        let (order, legs) = best.ok_or(SearchError::NoFeasibleTour)?;
        let ordered_stops = order.iter().map(|&i| stops[i].clone()).collect();
        let tour = Tour::from_legs(ordered_stops, legs);
        info!(
            "Best tour from {} over {} stops: {} steps, cost {:.3}",
            home,
            stops.len(),
            tour.steps(),
            tour.cost
        );
        Ok(tour)
    }

    fn best_order_memoized(&self, table: &LegTable, k: usize) -> SearchResult<Option<Vec<usize>>> {
        if self.parallel {
            let best = (0..k)
                .permutations(k)
                .enumerate()
                .par_bridge()
                .filter_map(|(ix, order)| {
                    if self.finder.is_cancelled() {
                        return None;
                    }
                    table.route_cost(&order).map(|cost| (cost, ix, order))
                })
                .reduce_with(|a, b| {
                    if b.0 < a.0 || (b.0 == a.0 && b.1 < a.1) {
                        b
                    } else {
                        a
                    }
                });
            self.check_cancelled()?;
            return Ok(best.map(|(_, _, order)| order));
        }
        let mut best: Option<(f64, Vec<usize>)> = None;
        for order in (0..k).permutations(k) {
            self.check_cancelled()?;
            let Some(cost) = table.route_cost(&order) else {
                continue;
            };
            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((cost, order));
            }
        }
        Ok(best.map(|(_, order)| order))
    }

    fn best_order_direct(
        &self,
        grid: &Grid,
        home: Cell,
        stops: &[Waypoint],
    ) -> SearchResult<Option<(Vec<usize>, Vec<Path>)>> {
        let k = stops.len();
        let mut best: Option<(f64, Vec<usize>, Vec<Path>)> = None;
        'orders: for order in (0..k).permutations(k) {
            self.check_cancelled()?;
            let sequence: Vec<Cell> = std::iter::once(home)
                .chain(order.iter().map(|&i| stops[i].cell))
                .chain(std::iter::once(home))
                .collect();
            let mut legs = Vec::with_capacity(k + 1);
            let mut cost = 0.0;
            for (from, to) in sequence.iter().tuple_windows() {
                match leg(&self.finder, grid, *from, *to)? {
                    Some(path) => {
                        cost += path.cost;
                        legs.push(path);
                    }
                    None => {
                        debug!("Order {:?} is infeasible at leg {} -> {}", order, from, to);
                        continue 'orders;
                    }
                }
            }
            if best.as_ref().map_or(true, |(c, _, _)| cost < *c) {
                best = Some((cost, order, legs));
            }
        }
        Ok(best.map(|(_, order, legs)| (order, legs)))
    }
}
