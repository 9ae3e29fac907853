//! The navigation state the controller mutates.

use crate::domain::{Collection, CollectionKind, Route, RouteId, Station, Trip};

/// The four screens of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Routes,
    Trips,
    Stations,
    Status,
}

impl Screen {
    /// The collection a screen pages through, if any.
    pub fn collection(self) -> Option<CollectionKind> {
        match self {
            Screen::Routes => Some(CollectionKind::Routes),
            Screen::Trips => Some(CollectionKind::Trips),
            Screen::Stations => Some(CollectionKind::Stations),
            Screen::Status => None,
        }
    }
}

/// Bookkeeping for the status screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPoll {
    /// When the status was last requested. `None` forces a poll on the next tick.
    pub last_fetch_ms: Option<u64>,

    /// Text currently on screen.
    pub last_text: Option<String>,
}

impl StatusPoll {
    /// Whether a poll is due at `now_ms`.
    pub fn is_due(&self, now_ms: u64, interval_ms: u64) -> bool {
        match self.last_fetch_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
        }
    }

    /// Forget everything, so the next poll fires and always redraws.
    pub fn reset(&mut self) {
        self.last_fetch_ms = None;
        self.last_text = None;
    }
}

/// Screen, collections and cursors. One instance per device.
#[derive(Debug, Clone)]
pub struct NavigationState {
    screen: Screen,
    routes: Collection<Route>,
    trips: Collection<Trip>,
    trips_route: Option<RouteId>,
    stations: Collection<Station>,
    status: StatusPoll,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Routes,
            routes: Collection::new(),
            trips: Collection::new(),
            trips_route: None,
            stations: Collection::new(),
            status: StatusPoll::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn routes(&self) -> &Collection<Route> {
        &self.routes
    }

    pub fn trips(&self) -> &Collection<Trip> {
        &self.trips
    }

    /// The route the loaded trips belong to.
    pub fn trips_route(&self) -> Option<RouteId> {
        self.trips_route
    }

    pub fn stations(&self) -> &Collection<Station> {
        &self.stations
    }

    pub fn status(&self) -> &StatusPoll {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusPoll {
        &mut self.status
    }

    pub fn selected_route(&self) -> Option<&Route> {
        self.routes.selected()
    }

    pub fn selected_trip(&self) -> Option<&Trip> {
        self.trips.selected()
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.stations.selected()
    }

    /// Replace the routes. Trips and stations depend on the route, so both
    /// are dropped.
    pub fn adopt_routes(&mut self, routes: Vec<Route>) {
        self.routes.adopt(routes);
        self.trips.reset();
        self.trips_route = None;
        self.stations.reset();
    }

    /// Replace the trips with those of `route`, dropping the stations.
    pub fn adopt_trips(&mut self, route: RouteId, trips: Vec<Trip>) {
        self.trips.adopt(trips);
        self.trips_route = Some(route);
        self.stations.reset();
    }

    pub fn adopt_stations(&mut self, stations: Vec<Station>) {
        self.stations.adopt(stations);
    }

    /// Move the cursor of `kind`. Returns `false` when the collection is empty.
    pub fn advance(&mut self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Routes => self.routes.advance(),
            CollectionKind::Trips => self.trips.advance(),
            CollectionKind::Stations => self.stations.advance(),
        }
    }

    /// Whether `kind` is loaded and non-empty.
    pub fn is_ready(&self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Routes => self.routes.is_ready(),
            CollectionKind::Trips => self.trips.is_ready(),
            CollectionKind::Stations => self.stations.is_ready(),
        }
    }

    /// Empty every collection and zero every cursor. The screen is kept.
    pub fn reset_all(&mut self) {
        self.routes.reset();
        self.trips.reset();
        self.trips_route = None;
        self.stations.reset();
        self.status.reset();
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: i32) -> Route {
        Route {
            id: RouteId(id),
            short_name: id.to_string(),
            long_name: String::new(),
            category: 0,
            has_vehicle: false,
        }
    }

    fn trip(id: &str) -> Trip {
        Trip {
            id: id.into(),
            route_id: RouteId(1),
            direction: 0,
            headsign: String::new(),
        }
    }

    fn station(sequence: i32) -> Station {
        Station {
            sequence,
            name: format!("Stop {sequence}"),
            lat: 0.0,
            lon: 0.0,
            has_vehicle: false,
        }
    }

    #[test]
    fn starts_on_routes_with_nothing_loaded() {
        let state = NavigationState::new();
        assert_eq!(state.screen(), Screen::Routes);
        assert!(!state.routes().is_loaded());
        assert!(!state.trips().is_loaded());
        assert!(!state.stations().is_loaded());
        assert!(state.status().is_due(0, 2_000));
    }

    #[test]
    fn adopting_trips_resets_stations_only() {
        let mut state = NavigationState::new();
        state.adopt_routes(vec![route(1), route(2)]);
        state.advance(CollectionKind::Routes);
        state.adopt_trips(RouteId(2), vec![trip("a")]);
        state.adopt_stations(vec![station(1), station(2)]);
        state.advance(CollectionKind::Stations);

        state.adopt_trips(RouteId(2), vec![trip("b"), trip("c")]);
        assert_eq!(state.routes().index(), 1);
        assert_eq!(state.trips_route(), Some(RouteId(2)));
        assert!(!state.stations().is_loaded());
        assert_eq!(state.stations().index(), 0);
    }

    #[test]
    fn reset_all_keeps_screen() {
        let mut state = NavigationState::new();
        state.adopt_routes(vec![route(1)]);
        state.set_screen(Screen::Trips);
        state.status_mut().last_text = Some("x".into());
        state.reset_all();

        assert_eq!(state.screen(), Screen::Trips);
        assert!(!state.routes().is_loaded());
        assert!(state.status().last_text.is_none());
    }

    #[test]
    fn status_poll_due() {
        let mut poll = StatusPoll::default();
        assert!(poll.is_due(0, 2_000));
        poll.last_fetch_ms = Some(1_000);
        assert!(!poll.is_due(2_999, 2_000));
        assert!(poll.is_due(3_000, 2_000));
        poll.reset();
        assert!(poll.is_due(1_001, 2_000));
    }

    #[test]
    fn screen_collections() {
        assert_eq!(Screen::Trips.collection(), Some(CollectionKind::Trips));
        assert_eq!(Screen::Status.collection(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Routes(usize),
        Trips(i32, usize),
        Stations(usize),
        Advance(u8),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1usize..6).prop_map(Op::Routes),
            (1i32..5, 1usize..6).prop_map(|(r, n)| Op::Trips(r, n)),
            (1usize..6).prop_map(Op::Stations),
            (0u8..3).prop_map(Op::Advance),
        ]
    }

    fn apply(state: &mut NavigationState, op: &Op) {
        match *op {
            Op::Routes(n) => state.adopt_routes(
                (0..n)
                    .map(|i| Route {
                        id: RouteId(i as i32),
                        short_name: String::new(),
                        long_name: String::new(),
                        category: 0,
                        has_vehicle: false,
                    })
                    .collect(),
            ),
            Op::Trips(route, n) => state.adopt_trips(
                RouteId(route),
                (0..n)
                    .map(|i| Trip {
                        id: i.to_string(),
                        route_id: RouteId(route),
                        direction: 0,
                        headsign: String::new(),
                    })
                    .collect(),
            ),
            Op::Stations(n) => state.adopt_stations(
                (0..n)
                    .map(|i| Station {
                        sequence: i as i32 + 1,
                        name: String::new(),
                        lat: 0.0,
                        lon: 0.0,
                        has_vehicle: false,
                    })
                    .collect(),
            ),
            Op::Advance(k) => {
                let kind = match k {
                    0 => CollectionKind::Routes,
                    1 => CollectionKind::Trips,
                    _ => CollectionKind::Stations,
                };
                state.advance(kind);
            }
        }
    }

    proptest! {
        /// Whatever happened before, adopting routes leaves trips and
        /// stations unloaded, empty and at index 0.
        #[test]
        fn loading_routes_resets_downstream(ops in prop::collection::vec(arb_op(), 0..30), n in 1usize..6) {
            let mut state = NavigationState::new();
            for op in &ops {
                apply(&mut state, op);
            }
            apply(&mut state, &Op::Routes(n));

            prop_assert!(state.routes().is_ready());
            prop_assert_eq!(state.routes().index(), 0);
            prop_assert!(!state.trips().is_loaded());
            prop_assert!(state.trips().is_empty());
            prop_assert_eq!(state.trips().index(), 0);
            prop_assert!(!state.stations().is_loaded());
            prop_assert!(state.stations().is_empty());
            prop_assert_eq!(state.stations().index(), 0);
        }

        /// Cursors of loaded collections always stay in range.
        #[test]
        fn loaded_cursors_in_range(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut state = NavigationState::new();
            for op in &ops {
                apply(&mut state, op);
                if state.routes().is_loaded() {
                    prop_assert!(state.routes().index() < state.routes().len());
                }
                if state.trips().is_loaded() {
                    prop_assert!(state.trips().index() < state.trips().len());
                }
                if state.stations().is_loaded() {
                    prop_assert!(state.stations().index() < state.stations().len());
                }
            }
        }
    }
}
