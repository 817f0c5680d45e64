use thiserror::Error;

/// Convenient result alias for the EV pathfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier could not be found in the road network.
    #[error("unknown node: {id}{}", format_suggestions(.suggestions))]
    UnknownNode {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when no energy-feasible route exists between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any steps.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when vehicle parameters fail validation.
    #[error("invalid vehicle configuration: {message}")]
    InvalidVehicleConfig { message: String },

    /// Raised when the frontier is drained without checking for emptiness first.
    #[error("attempted to extract from an empty frontier queue")]
    EmptyQueue,

    /// Raised when a path references a hop the graph does not contain.
    #[error("no edge from {from} to {to} in the road network")]
    MissingEdge { from: String, to: String },

    /// Raised when a frontier entry has no path recorded for it.
    #[error("frontier entry {id} has no recorded path")]
    UnknownFrontierEntry { id: String },

    /// Raised when attempting to load a schema that is not supported.
    #[error("unsupported road network schema; expected Nodes/Edges or Locations/RoadSegments tables")]
    UnsupportedSchema,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_lists_single_suggestion() {
        let error = Error::UnknownNode {
            id: "Berln".to_string(),
            suggestions: vec!["Berlin".to_string()],
        };
        assert_eq!(error.to_string(), "unknown node: Berln. Did you mean 'Berlin'?");
    }

    #[test]
    fn unknown_node_without_suggestions_is_bare() {
        let error = Error::UnknownNode {
            id: "Nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(error.to_string(), "unknown node: Nowhere");
    }
}
