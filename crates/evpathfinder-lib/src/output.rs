use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Node visited during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub node_id: String,
    /// Departure time from this node in minutes, including any charging.
    pub travel_time: f64,
    pub soc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_time: Option<f64>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub total_travel_time: f64,
    pub total_charging_time: f64,
    pub charging_stops: usize,
    pub energy_charged: f64,
    pub final_soc: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary.
    pub fn from_plan(plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| RouteStep {
                index,
                node_id: step.node_id.clone(),
                travel_time: step.travel_time,
                soc: step.soc,
                charging_time: (step.charging_time > 0.0).then_some(step.charging_time),
            })
            .collect();

        Ok(Self {
            start: plan.start.clone(),
            goal: plan.goal.clone(),
            hops: plan.hop_count(),
            total_travel_time: plan.total_travel_time(),
            total_charging_time: plan.total_charging_time(),
            charging_stops: plan.charging_stops(),
            energy_charged: plan.energy_charged,
            final_soc: plan.final_soc(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.2} min, {} charging {})",
            self.start,
            self.goal,
            self.hops,
            self.total_travel_time,
            self.charging_stops,
            if self.charging_stops == 1 { "stop" } else { "stops" }
        );

        for step in &self.steps {
            let _ = write!(
                buffer,
                "{:>3}: {} (t={:.2} min, soc={:.2})",
                step.index, step.node_id, step.travel_time, step.soc
            );
            if let Some(minutes) = step.charging_time {
                let _ = write!(buffer, " charge {:.2} min", minutes);
            }
            buffer.push('\n');
        }

        if self.charging_stops > 0 {
            let _ = writeln!(
                buffer,
                "Charging: {:.2} min, {:.2} energy added",
                self.total_charging_time, self.energy_charged
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route**: _{} → {}_ ({} hops, `{:.2}` min)",
            self.start, self.goal, self.hops, self.total_travel_time
        );
        for step in &self.steps {
            let _ = write!(
                buffer,
                "* {:>2}. **{}** at `{:.2}` min, SOC `{:.2}`",
                step.index, step.node_id, step.travel_time, step.soc
            );
            if let Some(minutes) = step.charging_time {
                let _ = write!(buffer, " ⚡ `{:.2}` min", minutes);
            }
            buffer.push('\n');
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadGraph;
    use crate::routing::{plan_route, RouteRequest};
    use crate::vehicle::VehicleConfig;

    fn plan() -> RoutePlan {
        let graph = RoadGraph::builder()
            .node("A", 0.0)
            .node("B", 60.0)
            .node("C", 0.0)
            .edge("A", "B", 10.0, 5.0)
            .edge("B", "C", 10.0, 5.0)
            .build();
        plan_route(
            &graph,
            &RouteRequest::new("A", "C", VehicleConfig::new(10.0, 5.0, 0.0)),
        )
        .expect("route exists")
    }

    #[test]
    fn plain_render_lists_steps_and_charging() {
        let summary = RouteSummary::from_plan(&plan()).expect("summary");
        let text = summary.render(RouteRenderMode::PlainText);

        assert!(text.starts_with("Route: A -> C (2 hops, 25.00 min, 1 charging stop)"));
        assert!(text.contains("  1: B (t=15.00 min, soc=5.00) charge 5.00 min"));
        assert!(text.contains("Charging: 5.00 min, 5.00 energy added"));
    }

    #[test]
    fn rich_render_marks_charging_stops() {
        let summary = RouteSummary::from_plan(&plan()).expect("summary");
        let text = summary.render(RouteRenderMode::RichText);
        assert!(text.contains("**B** at `15.00` min, SOC `5.00` ⚡ `5.00` min"));
    }

    #[test]
    fn json_omits_zero_charging_time() {
        let summary = RouteSummary::from_plan(&plan()).expect("summary");
        let value = serde_json::to_value(&summary).expect("serialise");

        assert_eq!(value["charging_stops"], 1);
        assert!(value["steps"][0].get("charging_time").is_none());
        assert_eq!(value["steps"][1]["charging_time"], 5.0);
    }

    #[test]
    fn empty_plan_is_rejected() {
        let mut empty = plan();
        empty.steps.clear();
        assert!(matches!(
            RouteSummary::from_plan(&empty),
            Err(Error::EmptyRoutePlan)
        ));
    }
}
