//! Charging-stop insertion for hops the current SOC cannot cover.
//!
//! When the vehicle cannot reach `v` from `u` directly, a station on the
//! already-built path to `u` is picked to charge at and the path is replayed
//! forward from there. The path of `u` itself is never modified; the rewrite
//! produces a fresh [`Path`] with freshly minted identities for every
//! recomputed node.

use tracing::trace;

use crate::energy::{additional_charge_time, new_soc, round2};
use crate::error::{Error, Result};
use crate::frontier::FrontierIdMinter;
use crate::graph::{EdgeCost, GraphAccess, GraphEdge};
use crate::path::{Path, VisitedNode};
use crate::vehicle::VehicleConfig;

/// Tolerance for SOC drift accumulated by summing fractional consumptions.
const SOC_EPSILON: f64 = 1e-9;

/// Smallest charging-time increment, matching the two-decimal rounding.
const MINUTE_STEP: f64 = 0.01;

/// Station selected to charge at, as an index into the path of `u`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StationChoice {
    index: usize,
    /// Energy needed at departure from the station to reach `v`.
    need: f64,
    /// The station already hosts the most recent charging stop.
    reuse: bool,
}

/// Charging-stop planner bound to one search.
pub(crate) struct ChargingPlanner<'a, G: GraphAccess> {
    graph: &'a G,
    vehicle: &'a VehicleConfig,
}

impl<'a, G: GraphAccess> ChargingPlanner<'a, G> {
    pub(crate) fn new(graph: &'a G, vehicle: &'a VehicleConfig) -> Self {
        Self { graph, vehicle }
    }

    /// Rewrite `path_of_u` so the vehicle can take `edge` to its destination.
    ///
    /// Returns `Ok(None)` when no station on the path can make the hop
    /// feasible.
    pub(crate) fn insert_stop(
        &self,
        minter: &mut FrontierIdMinter,
        path_of_u: &Path,
        edge: &GraphEdge,
    ) -> Result<Option<Path>> {
        let nodes = path_of_u.nodes();
        let u_index = nodes.len() - 1;
        let last_station = path_of_u.last_station_index();

        let mut choice = None;
        if let Some(station) = last_station {
            let need = self.consumption_between(nodes, station, u_index)? + edge.consumption;
            if need <= self.vehicle.max_soc {
                choice = Some(StationChoice {
                    index: station,
                    need,
                    reuse: true,
                });
            } else {
                trace!(
                    station = nodes[station].name(),
                    need,
                    "last charging stop cannot cover the hop"
                );
            }
        }

        if choice.is_none() {
            choice = self.select_station(nodes, edge.consumption, last_station)?;
        }

        let Some(choice) = choice else {
            trace!(
                from = path_of_u.last().name(),
                to = edge.destination.as_str(),
                "no station close enough to charge for hop"
            );
            return Ok(None);
        };

        let previous = if choice.reuse { None } else { last_station };
        self.rewrite(minter, nodes, choice, previous, edge)
    }

    /// Scan backwards from `u` for stations able to cover the remaining
    /// consumption to `v` and pick one.
    ///
    /// The start node never charges, and the scan does not go past
    /// `last_station`. Candidates are visited closest to `u` first: the
    /// first one whose SOC already covers its requirement wins outright,
    /// otherwise the one needing the least extra charging time wins, ties
    /// going to the candidate closer to `u`.
    fn select_station(
        &self,
        nodes: &[VisitedNode],
        hop_consumption: f64,
        last_station: Option<usize>,
    ) -> Result<Option<StationChoice>> {
        let u_index = nodes.len() - 1;
        let floor = last_station.map_or(1, |station| station + 1);

        let mut candidates = Vec::new();
        let mut consumption = hop_consumption;
        for index in (floor..=u_index).rev() {
            if consumption > self.vehicle.max_soc {
                break;
            }
            if self.charging_power(nodes[index].name()) > 0.0 {
                candidates.push((index, consumption));
            }
            consumption += self.hop(nodes, index)?.consumption;
        }

        let mut best: Option<(StationChoice, f64)> = None;
        for (index, need) in candidates {
            let station = &nodes[index];
            let candidate = StationChoice {
                index,
                need,
                reuse: false,
            };
            if station.soc >= need {
                return Ok(Some(candidate));
            }
            let minutes =
                additional_charge_time(station.soc, need, self.charging_power(station.name()));
            if best.map_or(true, |(_, fewest)| minutes < fewest) {
                best = Some((candidate, minutes));
            }
        }

        Ok(best.map(|(choice, _)| choice))
    }

    /// Replay the path from the earliest affected node through `u`, then
    /// append `v`.
    ///
    /// When `previous` is set, the earlier charging stop is cut back to what
    /// is needed to reach the new station before the new station is sized.
    fn rewrite(
        &self,
        minter: &mut FrontierIdMinter,
        nodes: &[VisitedNode],
        choice: StationChoice,
        previous: Option<usize>,
        edge: &GraphEdge,
    ) -> Result<Option<Path>> {
        let u_index = nodes.len() - 1;
        let rewrite_from = previous.unwrap_or(choice.index);

        let mut rewritten: Vec<VisitedNode> = Vec::with_capacity(nodes.len() + 1);
        rewritten.extend_from_slice(&nodes[..rewrite_from]);
        let Some((mut departure, mut soc)) =
            rewritten.last().map(|node| (node.travel_time, node.soc))
        else {
            return Ok(None);
        };

        for index in rewrite_from..=u_index {
            let original = &nodes[index];
            let hop = self.hop(nodes, index)?;
            let arrival_time = departure + hop.duration;
            let arrival_soc = soc - hop.consumption;
            if arrival_soc < -SOC_EPSILON {
                return Ok(None);
            }

            let power = self.charging_power(original.name());
            let charging_time = if index == choice.index {
                let minutes = self.covering_time(arrival_soc, choice.need, power);
                self.dwell(minutes, arrival_soc, choice.need)
            } else if Some(index) == previous {
                let need = self.consumption_between(nodes, index, choice.index)?;
                let minutes = self.covering_time(arrival_soc, need, power);
                self.dwell(minutes, arrival_soc, need)
                    .min(original.charging_time)
            } else {
                original.charging_time
            };

            departure = arrival_time + charging_time;
            soc = if charging_time > 0.0 {
                new_soc(self.vehicle.max_soc, arrival_soc, charging_time, power)
            } else {
                arrival_soc
            };
            rewritten.push(VisitedNode::new(
                minter.mint(original.name()),
                departure,
                soc,
                charging_time,
            ));
        }

        let soc_at_v = soc - edge.consumption;
        if soc_at_v < -SOC_EPSILON {
            trace!(
                station = nodes[choice.index].name(),
                soc_at_v,
                "charging stop leaves the hop short"
            );
            return Ok(None);
        }
        let v = VisitedNode::new(
            minter.mint(&edge.destination),
            departure + edge.duration,
            soc_at_v,
            0.0,
        );
        rewritten.push(v);

        trace!(
            station = nodes[choice.index].name(),
            reuse = choice.reuse,
            reduced_previous = previous.is_some(),
            "inserted charging stop"
        );
        Ok(Some(Path::from_nodes(rewritten)))
    }

    /// Minutes of charging at `power` that lift `soc` to at least `need`.
    ///
    /// Starts from [`additional_charge_time`], which rounds to the nearest
    /// hundredth and can fall short, then adds hundredths of a minute until
    /// the charged energy covers `need` or the battery is full.
    fn covering_time(&self, soc: f64, need: f64, power: f64) -> f64 {
        let mut minutes = additional_charge_time(soc, need, power);
        if power <= 0.0 || soc >= need {
            return minutes;
        }
        loop {
            let charged = new_soc(self.vehicle.max_soc, soc, minutes, power);
            if charged >= need - SOC_EPSILON || charged >= self.vehicle.max_soc {
                return minutes;
            }
            minutes = round2(minutes + MINUTE_STEP);
        }
    }

    /// Raise a genuine charging stop to the minimum dwell time.
    fn dwell(&self, charging_time: f64, soc: f64, need: f64) -> f64 {
        if charging_time < self.vehicle.min_charging_time && soc < need {
            self.vehicle.min_charging_time
        } else {
            charging_time
        }
    }

    /// Consumption along the path from `from` to `to` (indices, `from <= to`).
    fn consumption_between(&self, nodes: &[VisitedNode], from: usize, to: usize) -> Result<f64> {
        let mut total = 0.0;
        for index in from + 1..=to {
            total += self.hop(nodes, index)?.consumption;
        }
        Ok(total)
    }

    /// Cheapest edge used to arrive at `nodes[index]` (`index >= 1`).
    fn hop(&self, nodes: &[VisitedNode], index: usize) -> Result<EdgeCost> {
        let from = nodes[index - 1].name();
        let to = nodes[index].name();
        self.graph
            .shortest_edge(from, to)
            .ok_or_else(|| Error::MissingEdge {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    fn charging_power(&self, id: &str) -> f64 {
        self.graph
            .node(id)
            .map(|node| node.charging_power)
            .unwrap_or(0.0)
    }
}
