//! The navigation and cache-fallback state machine.

use tracing::{debug, info, warn};

use crate::cache::EntityCache;
use crate::catalog::{CatalogClient, Transport};
use crate::clock::Clock;
use crate::config::NavTimings;
use crate::domain::{CollectionKind, RouteId};
use crate::input::InputEvent;
use crate::store::BlobStore;
use crate::ui::Presenter;

use super::fault::Fault;
use super::state::{NavigationState, Screen};
use super::view::{Tone, View};

/// Where a successfully entered collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Network,
}

/// Outcome of one status-poll check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled {
    /// Not on the status screen, or the interval has not elapsed.
    Idle,
    /// Fetched the same text as last time; nothing redrawn.
    Unchanged,
    /// New text fetched and drawn.
    Updated,
    /// The fetch failed; the screen keeps its last text.
    Failed(Fault),
}

/// Owns the navigation state and drives every screen transition.
///
/// All operations run to completion on the caller's thread, including
/// network requests and notice dwells.
pub struct NavigationController<T, S, P, C> {
    catalog: CatalogClient<T>,
    cache: EntityCache<S>,
    presenter: P,
    clock: C,
    timings: NavTimings,
    state: NavigationState,
}

impl<T, S, P, C> NavigationController<T, S, P, C>
where
    T: Transport,
    S: BlobStore,
    P: Presenter,
    C: Clock,
{
    pub fn new(
        catalog: CatalogClient<T>,
        cache: EntityCache<S>,
        presenter: P,
        clock: C,
        timings: NavTimings,
    ) -> Self {
        Self {
            catalog,
            cache,
            presenter,
            clock,
            timings,
            state: NavigationState::new(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn catalog(&self) -> &CatalogClient<T> {
        &self.catalog
    }

    pub fn cache(&self) -> &EntityCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut EntityCache<S> {
        &mut self.cache
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether the network link is up.
    pub fn link_up(&self) -> bool {
        self.catalog.is_online()
    }

    /// Show the route list, from cache if possible.
    pub fn enter_routes(&mut self) -> Result<Source, Fault> {
        if let Some(routes) = self.cache.load_routes() {
            info!(count = routes.len(), "routes from cache");
            self.state.adopt_routes(routes);
            self.show(Screen::Routes);
            return Ok(Source::Cache);
        }

        self.notice("Loading routes...", Tone::Progress);
        let routes = match self.catalog.fetch_routes() {
            Ok(routes) if routes.is_empty() => {
                return Err(self.fail(Fault::EmptyCollection(CollectionKind::Routes)));
            }
            Ok(routes) => routes,
            Err(e) => return Err(self.fail(e.into())),
        };

        info!(count = routes.len(), "routes from network");
        if let Err(e) = self.cache.save_routes(&routes) {
            warn!(error = %e, "could not persist routes");
        }
        self.state.adopt_routes(routes);
        self.show(Screen::Routes);
        Ok(Source::Network)
    }

    /// Show the trips of `route`, from cache if possible.
    pub fn enter_trips_for_route(&mut self, route: RouteId) -> Result<Source, Fault> {
        if let Some(trips) = self.cache.load_trips(route) {
            info!(%route, count = trips.len(), "trips from cache");
            self.state.adopt_trips(route, trips);
            self.show(Screen::Trips);
            return Ok(Source::Cache);
        }

        self.notice("Loading trips...", Tone::Progress);
        let trips = match self.catalog.fetch_trips(route) {
            Ok(trips) if trips.is_empty() => {
                return Err(self.fail(Fault::EmptyCollection(CollectionKind::Trips)));
            }
            Ok(trips) => trips,
            Err(e) => return Err(self.fail(e.into())),
        };

        info!(%route, count = trips.len(), "trips from network");
        if let Err(e) = self.cache.save_trips(route, &trips) {
            warn!(%route, error = %e, "could not persist trips");
        }
        self.state.adopt_trips(route, trips);
        self.show(Screen::Trips);
        Ok(Source::Network)
    }

    /// Show the stations of the trip the backend is tracking.
    pub fn enter_stations(&mut self) -> Result<Source, Fault> {
        if let Some(stations) = self.cache.load_stations() {
            info!(count = stations.len(), "stations from cache");
            self.state.adopt_stations(stations);
            self.show(Screen::Stations);
            return Ok(Source::Cache);
        }

        self.notice("Loading stations...", Tone::Progress);
        let stations = match self.catalog.fetch_stations() {
            Ok(stations) if stations.is_empty() => {
                return Err(self.fail(Fault::EmptyCollection(CollectionKind::Stations)));
            }
            Ok(stations) => stations,
            Err(e) => return Err(self.fail(e.into())),
        };

        info!(count = stations.len(), "stations from network");
        if let Err(e) = self.cache.save_stations(&stations) {
            warn!(error = %e, "could not persist stations");
        }
        self.state.adopt_stations(stations);
        self.show(Screen::Stations);
        Ok(Source::Network)
    }

    /// Step the cursor of `kind`, or load the collection if it never was.
    pub fn advance(&mut self, kind: CollectionKind) -> Result<(), Fault> {
        if self.state.is_ready(kind) {
            self.state.advance(kind);
            debug!(%kind, "advanced");
            self.redraw();
            return Ok(());
        }

        let loaded = match kind {
            CollectionKind::Routes => self.state.routes().is_loaded(),
            CollectionKind::Trips => self.state.trips().is_loaded(),
            CollectionKind::Stations => self.state.stations().is_loaded(),
        };
        if loaded {
            return Ok(());
        }

        match kind {
            CollectionKind::Routes => self.enter_routes().map(drop),
            CollectionKind::Trips => self.enter_trips_for_selected_route().map(drop),
            CollectionKind::Stations => self.enter_stations().map(drop),
        }
    }

    /// The NEXT button.
    pub fn next(&mut self) -> Result<(), Fault> {
        match self.state.screen() {
            Screen::Routes => self.advance(CollectionKind::Routes),
            Screen::Trips => self.advance(CollectionKind::Trips),
            Screen::Stations => self.advance(CollectionKind::Stations),
            Screen::Status => {
                self.leave_status();
                Ok(())
            }
        }
    }

    /// The SELECT button (short press).
    pub fn select(&mut self) -> Result<(), Fault> {
        match self.state.screen() {
            Screen::Routes => match self.state.selected_route() {
                Some(route) => {
                    let id = route.id;
                    self.enter_trips_for_route(id).map(drop)
                }
                None => self.enter_routes().map(drop),
            },
            Screen::Trips => {
                if self.state.is_ready(CollectionKind::Trips) {
                    self.enter_stations().map(drop)
                } else {
                    self.enter_trips_for_selected_route().map(drop)
                }
            }
            Screen::Stations => {
                if self.state.is_ready(CollectionKind::Stations) {
                    self.select_station()
                } else {
                    self.enter_stations().map(drop)
                }
            }
            Screen::Status => {
                self.leave_status();
                Ok(())
            }
        }
    }

    /// Tell the backend the user waits at the selected station, then start
    /// polling its status.
    pub fn select_station(&mut self) -> Result<(), Fault> {
        let Some(station) = self.state.selected_station().cloned() else {
            return Err(Fault::EmptyCollection(CollectionKind::Stations));
        };

        self.notice(format!("Selecting...\nStop {}", station.sequence), Tone::Progress);
        match self.catalog.announce_location(&station) {
            Ok(()) => {
                info!(station = %station.name, sequence = station.sequence, "station selected");
                self.notice(format!("Selected!\n{}", station.name), Tone::Success);
                self.clock.sleep_ms(self.timings.message_dwell_ms);
                self.go_to_status_polling();
                Ok(())
            }
            Err(e) => {
                warn!(station = %station.name, error = %e, "station select failed");
                Err(self.fail(e.into()))
            }
        }
    }

    /// Erase the persisted collections and empty every in-memory one.
    ///
    /// The screen is left as it is; nothing is fetched.
    pub fn clear_all_caches(&mut self) {
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "could not erase persisted collections");
        }
        self.state.reset_all();
        info!("all collections cleared");
    }

    /// Switch to the status screen and make the next tick poll at once.
    pub fn go_to_status_polling(&mut self) {
        self.state.set_screen(Screen::Status);
        self.state.status_mut().reset();
        debug!("status polling started");
    }

    /// Jump back to the route list without reloading it.
    pub fn return_to_routes(&mut self) {
        if self.state.screen() != Screen::Routes {
            info!(from = ?self.state.screen(), "returning to routes");
            self.state.set_screen(Screen::Routes);
            self.redraw();
        }
    }

    /// Refresh the status screen if the poll interval has elapsed.
    pub fn poll_status(&mut self, now_ms: u64) -> Polled {
        if self.state.screen() != Screen::Status
            || !self.state.status().is_due(now_ms, self.timings.status_poll_ms)
        {
            return Polled::Idle;
        }
        self.state.status_mut().last_fetch_ms = Some(now_ms);

        match self.catalog.fetch_status() {
            Ok(text) => {
                if self.state.status().last_text.as_deref() == Some(text.as_str()) {
                    return Polled::Unchanged;
                }
                info!(status = %text, "status updated");
                self.state.status_mut().last_text = Some(text.clone());
                self.presenter.present(&View::Status { text });
                Polled::Updated
            }
            Err(e) => {
                warn!(error = %e, "status poll failed");
                Polled::Failed(e.into())
            }
        }
    }

    /// Draw the countdown box over the current screen.
    pub fn show_clear_popup(&mut self, remaining_ms: u64) {
        self.presenter.present(&View::ClearCountdown { remaining_ms });
    }

    /// Draw the current screen again.
    pub fn redraw(&mut self) {
        let view = self.current_view();
        self.presenter.present(&view);
    }

    /// The view of the current screen, or its "nothing loaded" notice.
    pub fn current_view(&self) -> View {
        match self.state.screen() {
            Screen::Routes => self.routes_view(),
            Screen::Trips => self.trips_view(),
            Screen::Stations => self.stations_view(),
            Screen::Status => View::Status {
                text: self.state.status().last_text.clone().unwrap_or_default(),
            },
        }
    }

    /// Apply one interpreted input event.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), Fault> {
        debug!(?event, screen = ?self.state.screen(), "input");
        match event {
            InputEvent::Next => self.next(),
            InputEvent::Select => self.select(),
            InputEvent::ReturnToRoutes => {
                self.return_to_routes();
                Ok(())
            }
            InputEvent::ClearCaches => {
                info!("cache clear requested");
                self.notice("Clearing cache...", Tone::Progress);
                self.clear_all_caches();
                self.clock.sleep_ms(self.timings.clear_dwell_ms);
                self.enter_routes().map(drop)
            }
            InputEvent::ClearCountdown { remaining_ms } => {
                self.show_clear_popup(remaining_ms);
                Ok(())
            }
            InputEvent::Redraw => {
                self.redraw();
                Ok(())
            }
        }
    }

    fn routes_view(&self) -> View {
        let routes = self.state.routes();
        match routes.selected() {
            Some(route) if routes.is_ready() => View::Route {
                position: routes.index() + 1,
                total: routes.len(),
                route: route.clone(),
            },
            _ => View::notice(
                Fault::EmptyCollection(CollectionKind::Routes).message(),
                Tone::Error,
            ),
        }
    }

    fn trips_view(&self) -> View {
        let trips = self.state.trips();
        match trips.selected() {
            Some(trip) if trips.is_ready() => View::Trip {
                position: trips.index() + 1,
                total: trips.len(),
                trip: trip.clone(),
            },
            _ => View::notice(
                Fault::EmptyCollection(CollectionKind::Trips).message(),
                Tone::Error,
            ),
        }
    }

    fn stations_view(&self) -> View {
        let stations = self.state.stations();
        match stations.selected() {
            Some(station) if stations.is_ready() => View::Station {
                total: stations.len(),
                station: station.clone(),
            },
            _ => View::notice(
                Fault::EmptyCollection(CollectionKind::Stations).message(),
                Tone::Error,
            ),
        }
    }

    fn enter_trips_for_selected_route(&mut self) -> Result<Source, Fault> {
        match self.state.selected_route() {
            Some(route) => {
                let id = route.id;
                self.enter_trips_for_route(id)
            }
            None => self.enter_routes(),
        }
    }

    fn leave_status(&mut self) {
        self.state.status_mut().reset();
        self.state.set_screen(Screen::Stations);
        self.redraw();
    }

    fn show(&mut self, screen: Screen) {
        self.state.set_screen(screen);
        self.redraw();
    }

    fn notice(&mut self, text: impl Into<String>, tone: Tone) {
        self.presenter.present(&View::notice(text, tone));
    }

    /// Show `fault`, hold it for the dwell, then restore the current screen.
    fn fail(&mut self, fault: Fault) -> Fault {
        warn!(%fault, screen = ?self.state.screen(), "navigation step failed");
        self.notice(fault.message(), Tone::Error);
        self.clock.sleep_ms(self.timings.message_dwell_ms);
        self.redraw();
        fault
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
