/*!
 * Session scoped control line overrides.
 *
 * A control line is a rectangle an operator draws on the map to mark an
 * area as artificially non-burnable, a firebreak ahead of the simulated
 * fire. Lines are grouped under an opaque session token so concurrent
 * planning sessions never see each other's overrides. Entries live until
 * their session clears them or the whole store is reset; there is no
 * automatic expiry.
 */
use crate::{coords::Coord, error::FuelMapResult, FuelMapError};
use geo::{point, Contains, LineString, Polygon};
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use std::sync::Mutex;

/**
 * One control line, stored as a closed polygon.
 *
 * Only rectangles can be built today. The containment test works on the
 * polygon alone and does not depend on the rectangular shape.
 */
#[derive(Debug, Clone)]
pub struct ControlLine {
    /// The boundary ring, corners in (lon, lat) order.
    boundary: Polygon<f64>,
}

impl ControlLine {
    /// Build the rectangle spanning the given latitude and longitude
    /// bounds, corners ordered counterclockwise from the southwest.
    ///
    /// Any finite bounds are accepted, including degenerate and inverted
    /// rectangles, which simply contain nothing or mirror the interior.
    /// Non-finite bounds fail with `InvalidBounds`.
    pub fn from_bounds(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> FuelMapResult<Self> {
        let all_finite = lat_min.is_finite()
            && lat_max.is_finite()
            && lon_min.is_finite()
            && lon_max.is_finite();

        if !all_finite {
            return Err(FuelMapError::InvalidBounds {
                lat_min,
                lat_max,
                lon_min,
                lon_max,
            });
        }

        let corners = vec![
            (lon_min, lat_min),
            (lon_max, lat_min),
            (lon_max, lat_max),
            (lon_min, lat_max),
        ];

        Ok(ControlLine {
            boundary: Polygon::new(LineString::from(corners), vec![]),
        })
    }

    /// True when the point lies strictly inside the line's interior.
    ///
    /// A point exactly on the boundary is NOT contained: the drawn line
    /// itself stays burnable ground.
    pub fn contains(&self, coord: Coord) -> bool {
        self.boundary.contains(&point!(x: coord.lon, y: coord.lat))
    }
}

/**
 * All control lines in the process, grouped by session.
 *
 * One mutex guards the whole mapping so every operation is atomic,
 * including the create-if-absent step of an insert. Sequences of calls
 * are not atomic as a group and callers must not assume they are.
 */
#[derive(Debug, Default)]
pub struct ControlLineStore {
    /// Session token to that session's lines, in insertion order.
    sessions: Mutex<HashMap<String, Vec<ControlLine>>>,
}

impl ControlLineStore {
    pub fn new() -> Self {
        ControlLineStore {
            sessions: Mutex::new(HashMap::default()),
        }
    }

    /// Append a line to the session's list, creating the session entry if
    /// this is its first line.
    pub fn insert(&self, session: &str, line: ControlLine) {
        let mut sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions.entry(session.to_string()).or_default().push(line);

        debug!("Added control line for session {}.", session);
    }

    /// True when any of the session's lines strictly contains the point.
    ///
    /// A session with no entry behaves exactly like a session with an
    /// empty list: nothing is contained.
    pub fn contains(&self, session: &str, coord: Coord) -> bool {
        let sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions
            .get(session)
            .map(|lines| lines.iter().any(|line| line.contains(coord)))
            .unwrap_or(false)
    }

    /// Drop all of one session's lines. Unknown sessions are a no-op.
    pub fn clear_session(&self, session: &str) {
        let mut sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions.remove(session);

        debug!("Cleared control lines for session {}.", session);
    }

    /// Drop every session's lines at once.
    pub fn clear_all(&self) {
        let mut sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions.clear();

        debug!("Cleared all control lines.");
    }

    /// Number of lines currently held for a session.
    pub fn line_count(&self, session: &str) -> usize {
        let sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions.get(session).map(Vec::len).unwrap_or(0)
    }

    /// Number of sessions with at least one line.
    pub fn session_count(&self) -> usize {
        let sessions = self
            .sessions
            .lock()
            .expect("Error locking control line store");

        sessions.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_bounds_rejects_non_finite() {
        let cases = [
            (f64::NAN, 1.0, 0.0, 1.0),
            (0.0, f64::NAN, 0.0, 1.0),
            (0.0, 1.0, f64::INFINITY, 1.0),
            (0.0, 1.0, 0.0, f64::NEG_INFINITY),
        ];

        for (lat_min, lat_max, lon_min, lon_max) in cases {
            match ControlLine::from_bounds(lat_min, lat_max, lon_min, lon_max) {
                Err(FuelMapError::InvalidBounds { .. }) => {}
                other => panic!("expected InvalidBounds, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_interior_points_are_contained() {
        let line = ControlLine::from_bounds(37.826193, 37.827, -122.420940, -122.0).unwrap();

        assert!(line.contains(Coord {
            lat: 37.826194,
            lon: -122.420930,
        }));
        assert!(line.contains(Coord {
            lat: 37.8265,
            lon: -122.2,
        }));

        assert!(!line.contains(Coord {
            lat: 37.9,
            lon: -122.2,
        }));
        assert!(!line.contains(Coord {
            lat: 37.8265,
            lon: -121.9,
        }));
    }

    #[test]
    fn test_boundary_points_are_not_contained() {
        let line = ControlLine::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap();

        #[rustfmt::skip]
        let boundary = [
            (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), // corners
            (0.0, 0.5), (1.0, 0.5), (0.5, 0.0), (0.5, 1.0), // edge midpoints
        ];

        for (lat, lon) in boundary {
            assert!(
                !line.contains(Coord { lat, lon }),
                "({}, {}) should stay burnable",
                lat,
                lon
            );
        }

        assert!(line.contains(Coord { lat: 0.5, lon: 0.5 }));
    }

    #[test]
    fn test_degenerate_and_inverted_rectangles() {
        let flat = ControlLine::from_bounds(1.0, 1.0, 0.0, 2.0).unwrap();
        assert!(!flat.contains(Coord { lat: 1.0, lon: 1.0 }));

        // Swapped bounds still describe the same area.
        let inverted = ControlLine::from_bounds(1.0, 0.0, 1.0, 0.0).unwrap();
        assert!(inverted.contains(Coord { lat: 0.5, lon: 0.5 }));
        assert!(!inverted.contains(Coord { lat: 1.5, lon: 0.5 }));
    }

    #[test]
    fn test_absent_session_contains_nothing() {
        let store = ControlLineStore::new();

        assert!(!store.contains(
            "nobody",
            Coord {
                lat: 0.5,
                lon: 0.5,
            }
        ));
        assert_eq!(store.line_count("nobody"), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = ControlLineStore::new();
        let inside = Coord { lat: 0.5, lon: 0.5 };

        store.insert(
            "session-a",
            ControlLine::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap(),
        );

        assert!(store.contains("session-a", inside));
        assert!(!store.contains("session-b", inside));

        store.clear_session("session-a");
        assert!(!store.contains("session-a", inside));

        // Clearing a session that never existed is fine.
        store.clear_session("session-c");
    }

    #[test]
    fn test_any_line_in_the_session_counts() {
        let store = ControlLineStore::new();

        store.insert("s", ControlLine::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap());
        store.insert("s", ControlLine::from_bounds(10.0, 11.0, 10.0, 11.0).unwrap());

        assert_eq!(store.line_count("s"), 2);
        assert!(store.contains("s", Coord { lat: 0.5, lon: 0.5 }));
        assert!(store.contains(
            "s",
            Coord {
                lat: 10.5,
                lon: 10.5,
            }
        ));
        assert!(!store.contains("s", Coord { lat: 5.0, lon: 5.0 }));
    }

    #[test]
    fn test_clear_all_empties_every_session() {
        let store = ControlLineStore::new();
        let inside = Coord { lat: 0.5, lon: 0.5 };

        for session in ["a", "b", "c"] {
            store.insert(session, ControlLine::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap());
        }
        assert_eq!(store.session_count(), 3);

        store.clear_all();

        assert_eq!(store.session_count(), 0);
        for session in ["a", "b", "c"] {
            assert!(!store.contains(session, inside));
        }
    }

    #[test]
    fn test_concurrent_inserts_lose_nothing() {
        let store = ControlLineStore::new();
        let threads = 8;
        let per_thread = 25;

        std::thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for _ in 0..per_thread {
                        let line = ControlLine::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap();
                        store.insert("shared", line);
                    }
                });
            }
        });

        assert_eq!(store.line_count("shared"), threads * per_thread);
    }
}
