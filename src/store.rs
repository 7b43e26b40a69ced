use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// A single route record.
///
/// The field names match the persisted JSON attributes: `name1` is the start
/// point of the route, `name2` the end point, `number` the route number.
/// Route numbers are not required to be unique. `number` is kept as a JSON
/// number because the schema accepts any numeric value — loaded documents may
/// carry floats, while `add` always produces integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Start point of the route.
    pub name1: String,
    /// End point of the route.
    pub name2: String,
    /// Route number shown to the user and used by `select`.
    pub number: Number,
    /// Keys outside the schema. The schema allows them, so a loaded document
    /// keeps them and a later save writes them back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The in-memory, ordered list of routes for one session.
///
/// The list is kept sorted ascending by route number once it holds more than
/// one record; records with equal numbers keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route and re-sort by route number when more than one
    /// record is present. `Vec::sort_by` is stable, so equal numbers
    /// keep their relative order.
    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
        if self.routes.len() > 1 {
            self.routes.sort_by(|a, b| {
                numeric(&a.number)
                    .partial_cmp(&numeric(&b.number))
                    .unwrap_or(Ordering::Equal)
            });
        }
    }

    /// Linear scan for the first route with the given number.
    ///
    /// The comparison is numeric, so a prompted `5` matches a record whose
    /// document carried `5.0`.
    pub fn find_by_number(&self, number: i64) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| numeric(&r.number) == number as f64)
    }

    /// Replace the whole list, e.g. after a successful `load`.
    pub fn replace(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    /// Read-only view of the current list.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn numeric(number: &Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}
