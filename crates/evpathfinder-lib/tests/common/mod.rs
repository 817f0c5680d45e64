//! Common test utilities and fixture helpers.
//!
//! Fixture datasets are written to a temporary SQLite file per test so the
//! loader runs against the same layouts a real dataset would use.

use std::path::PathBuf;

use evpathfinder_lib::RoadGraph;
use rusqlite::Connection;
use tempfile::TempDir;

/// Temporary dataset on disk. The directory is removed when dropped.
#[allow(dead_code)]
pub struct FixtureDb {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl FixtureDb {
    /// Create a dataset by running `sql` against a fresh database file.
    pub fn from_sql(sql: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("road_network.db");
        let connection = Connection::open(&path).expect("open fixture db");
        connection.execute_batch(sql).expect("seed fixture db");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Corridor of six cities with two chargers, stored in the current layout.
    ///
    /// Aachen -> Bonn -> Cologne -> Dortmund -> Essen -> Frankfurt, plus a
    /// direct Aachen -> Cologne road too expensive for small batteries.
    /// Bonn charges at 60 units/h and Dortmund at 120 units/h.
    pub fn corridor() -> Self {
        Self::from_sql(
            r#"
            CREATE TABLE Nodes (id TEXT PRIMARY KEY, chargingPower REAL);
            CREATE TABLE Edges (
                sourceId TEXT NOT NULL,
                destinationId TEXT NOT NULL,
                duration REAL,
                consumption REAL
            );
            INSERT INTO Nodes VALUES
                ('Aachen', 0), ('Bonn', 60), ('Cologne', 0),
                ('Dortmund', 120), ('Essen', 0), ('Frankfurt', 0);
            INSERT INTO Edges VALUES
                ('Aachen', 'Bonn', 10, 5),
                ('Bonn', 'Cologne', 10, 5),
                ('Aachen', 'Cologne', 25, 12),
                ('Cologne', 'Dortmund', 20, 8),
                ('Dortmund', 'Essen', 10, 6),
                ('Essen', 'Frankfurt', 30, 9);
            "#,
        )
    }

    /// Three-node dataset in the legacy layout, with missing values.
    pub fn legacy() -> Self {
        Self::from_sql(
            r#"
            CREATE TABLE Locations (name TEXT PRIMARY KEY, power REAL);
            CREATE TABLE RoadSegments (fromName TEXT, toName TEXT, minutes REAL, energy REAL);
            INSERT INTO Locations VALUES ('Aachen', NULL), ('Bonn', 60), ('Cologne', 0);
            INSERT INTO RoadSegments VALUES
                ('Aachen', 'Bonn', 10, 5),
                ('Bonn', 'Cologne', 10, NULL),
                ('Bonn', 'Nowhere', 5, 1);
            "#,
        )
    }
}

/// Deterministic `size` x `size` grid with roads in all four directions.
///
/// Nodes are named `r{row}c{col}`; every node with an even `row + col`
/// charges at 50 units/h. Hops consume between 1 and 4 units, so a vehicle
/// with at least 8 units at the start can always reach a charger.
#[allow(dead_code)]
pub fn grid_graph(size: usize) -> RoadGraph {
    let mut builder = RoadGraph::builder();
    for row in 0..size {
        for col in 0..size {
            let power = if (row + col) % 2 == 0 { 50.0 } else { 0.0 };
            builder = builder.node(grid_name(row, col), power);
        }
    }

    for row in 0..size {
        for col in 0..size {
            let neighbours = [
                (row.checked_sub(1), Some(col)),
                (Some(row + 1).filter(|r| *r < size), Some(col)),
                (Some(row), col.checked_sub(1)),
                (Some(row), Some(col + 1).filter(|c| *c < size)),
            ];
            for (index, neighbour) in neighbours.into_iter().enumerate() {
                let (Some(to_row), Some(to_col)) = neighbour else {
                    continue;
                };
                builder = builder.edge(
                    grid_name(row, col),
                    grid_name(to_row, to_col),
                    grid_duration(row, col, index),
                    grid_consumption(row, col, index),
                );
            }
        }
    }
    builder.build()
}

#[allow(dead_code)]
pub fn grid_name(row: usize, col: usize) -> String {
    format!("r{row}c{col}")
}

/// Whole-minute duration of the road leaving (`row`, `col`) in `direction`.
#[allow(dead_code)]
pub fn grid_duration(row: usize, col: usize, direction: usize) -> f64 {
    (5 + (row * 7 + col * 3 + direction * 2) % 6) as f64
}

#[allow(dead_code)]
fn grid_consumption(row: usize, col: usize, direction: usize) -> f64 {
    (1 + (row * 5 + col + direction) % 4) as f64
}
