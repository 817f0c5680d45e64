use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{GraphEdge, GraphNode};

/// In-memory copy of the locations and road segments stored in a dataset.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub nodes: HashMap<String, GraphNode>,
    /// Edges in storage order. Parallel edges are preserved.
    pub edges: Vec<GraphEdge>,
}

impl RoadNetwork {
    /// Lookup a node by its case-sensitive identifier.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaVariant {
    Nodes,
    Locations,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SchemaVariant::Nodes => "nodes_edges",
            SchemaVariant::Locations => "locations_road_segments",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaDefinition {
    variant: SchemaVariant,
    nodes_table: &'static str,
    node_id_column: &'static str,
    charging_power_column: &'static str,
    edges_table: &'static str,
    edge_source_column: &'static str,
    edge_destination_column: &'static str,
    duration_column: &'static str,
    consumption_column: &'static str,
}

impl SchemaVariant {
    fn definition(self) -> SchemaDefinition {
        match self {
            SchemaVariant::Nodes => SchemaDefinition {
                variant: SchemaVariant::Nodes,
                nodes_table: "Nodes",
                node_id_column: "id",
                charging_power_column: "chargingPower",
                edges_table: "Edges",
                edge_source_column: "sourceId",
                edge_destination_column: "destinationId",
                duration_column: "duration",
                consumption_column: "consumption",
            },
            SchemaVariant::Locations => SchemaDefinition {
                variant: SchemaVariant::Locations,
                nodes_table: "Locations",
                node_id_column: "name",
                charging_power_column: "power",
                edges_table: "RoadSegments",
                edge_source_column: "fromName",
                edge_destination_column: "toName",
                duration_column: "minutes",
                consumption_column: "energy",
            },
        }
    }
}

/// Load locations and road segments from a SQLite dataset into memory.
///
/// The loader detects which of the supported table layouts is present.
/// Missing charging power, duration or consumption values are read as zero,
/// which keeps legacy datasets routable but can hide data errors, so each
/// substitution is counted and logged. Edges whose endpoints are not known
/// locations are dropped.
pub fn load_road_network(db_path: &Path) -> Result<RoadNetwork> {
    if !db_path.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("road network database {} does not exist", db_path.display()),
        )));
    }
    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let schema = detect_schema(&connection)?;
    debug!(schema = %schema.variant, path = %db_path.display(), "loading road network");

    let nodes = load_nodes(&connection, &schema)?;
    let edges = load_edges(&connection, &schema, &nodes)?;

    debug!(nodes = nodes.len(), edges = edges.len(), "road network loaded");
    Ok(RoadNetwork { nodes, edges })
}

fn detect_schema(connection: &Connection) -> Result<SchemaDefinition> {
    for variant in [SchemaVariant::Nodes, SchemaVariant::Locations] {
        let schema = variant.definition();
        if schema_matches(connection, &schema)? {
            return Ok(schema);
        }
    }

    Err(Error::UnsupportedSchema)
}

fn schema_matches(connection: &Connection, schema: &SchemaDefinition) -> Result<bool> {
    if !table_exists(connection, schema.nodes_table)?
        || !table_exists(connection, schema.edges_table)?
    {
        return Ok(false);
    }

    if !table_has_columns(
        connection,
        schema.nodes_table,
        &[schema.node_id_column, schema.charging_power_column],
    )? {
        return Ok(false);
    }

    table_has_columns(
        connection,
        schema.edges_table,
        &[
            schema.edge_source_column,
            schema.edge_destination_column,
            schema.duration_column,
            schema.consumption_column,
        ],
    )
}

fn load_nodes(
    connection: &Connection,
    schema: &SchemaDefinition,
) -> Result<HashMap<String, GraphNode>> {
    let sql = format!(
        "SELECT {id}, {power} FROM {table}",
        id = schema.node_id_column,
        power = schema.charging_power_column,
        table = schema.nodes_table
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
    })?;

    let mut nodes = HashMap::new();
    let mut defaulted_power = 0usize;
    for row in rows {
        let (id, power) = row?;
        let charging_power = power.unwrap_or_else(|| {
            defaulted_power += 1;
            0.0
        });
        nodes.insert(id.clone(), GraphNode { id, charging_power });
    }

    if defaulted_power > 0 {
        warn!(defaulted_power, "nodes without charging power treated as non-stations");
    }

    Ok(nodes)
}

fn load_edges(
    connection: &Connection,
    schema: &SchemaDefinition,
    nodes: &HashMap<String, GraphNode>,
) -> Result<Vec<GraphEdge>> {
    let sql = format!(
        "SELECT {from}, {to}, {duration}, {consumption} FROM {table} ORDER BY rowid",
        from = schema.edge_source_column,
        to = schema.edge_destination_column,
        duration = schema.duration_column,
        consumption = schema.consumption_column,
        table = schema.edges_table
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<f64>>(2)?,
            row.get::<_, Option<f64>>(3)?,
        ))
    })?;

    let mut edges = Vec::new();
    let mut skipped_edges = 0usize;
    let mut defaulted_costs = 0usize;
    for row in rows {
        let (source, destination, duration, consumption) = row?;
        if !nodes.contains_key(&source) || !nodes.contains_key(&destination) {
            skipped_edges += 1;
            continue;
        }
        if duration.is_none() || consumption.is_none() {
            defaulted_costs += 1;
        }
        edges.push(GraphEdge {
            source,
            destination,
            duration: duration.unwrap_or(0.0),
            consumption: consumption.unwrap_or(0.0),
        });
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "ignored road segments referencing unknown nodes");
    }
    if defaulted_costs > 0 {
        warn!(
            defaulted_costs,
            "road segments with missing duration or consumption treated as zero cost"
        );
    }

    Ok(edges)
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_db(dir: &tempfile::TempDir, sql: &str) -> std::path::PathBuf {
        let path = dir.path().join("network.db");
        let connection = Connection::open(&path).expect("open db");
        connection.execute_batch(sql).expect("seed db");
        path
    }

    #[test]
    fn loads_nodes_and_edges_schema_with_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_db(
            &dir,
            "CREATE TABLE Nodes (id TEXT, chargingPower REAL);
             CREATE TABLE Edges (sourceId TEXT, destinationId TEXT, duration REAL, consumption REAL);
             INSERT INTO Nodes VALUES ('A', NULL), ('B', 50.0);
             INSERT INTO Edges VALUES ('A', 'B', 10.0, NULL), ('B', 'Z', 1.0, 1.0);",
        );

        let network = load_road_network(&path).expect("network loads");
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.node("A").map(|n| n.charging_power), Some(0.0));
        assert_eq!(network.edges.len(), 1, "edge to unknown node is dropped");
        assert_eq!(network.edges[0].duration, 10.0);
        assert_eq!(network.edges[0].consumption, 0.0);
    }

    #[test]
    fn loads_locations_layout() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_db(
            &dir,
            "CREATE TABLE Locations (name TEXT, power REAL);
             CREATE TABLE RoadSegments (fromName TEXT, toName TEXT, minutes REAL, energy REAL);
             INSERT INTO Locations VALUES ('X', 0), ('Y', 11);
             INSERT INTO RoadSegments VALUES ('X', 'Y', 4, 2), ('X', 'Y', 3, 5);",
        );

        let network = load_road_network(&path).expect("network loads");
        assert_eq!(network.edges.len(), 2);
        assert_eq!(network.edges[1].duration, 3.0);
        assert!(network.node("Y").expect("Y").is_station());
    }

    #[test]
    fn rejects_unknown_schema() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_db(&dir, "CREATE TABLE Other (id INTEGER);");

        let error = load_road_network(&path).expect_err("schema rejected");
        assert!(matches!(error, Error::UnsupportedSchema));
    }

    #[test]
    fn missing_file_is_not_created() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.db");

        let error = load_road_network(&path).expect_err("missing file");
        assert!(matches!(error, Error::Io(_)));
        assert!(!path.exists());
    }
}
