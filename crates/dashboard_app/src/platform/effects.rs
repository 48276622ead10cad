use std::time::Duration;

use dashboard_core::query::split_location;
use dashboard_core::{Effect, QueryParams};
use dashboard_engine::{
    DashboardData, EngineEvent, EngineHandle, ListQuery, PageOutcome, PageRequest, RenderedDetail,
    RenderedTable, RequestId, Resource,
};
use dashboard_logging::{dashboard_debug, dashboard_info};

/// A finished load that is still the most recent of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Table(PageOutcome<RenderedTable>),
    Detail(PageOutcome<RenderedDetail>),
    Dashboard(DashboardData),
}

/// Turns core effects into engine loads and filters engine events down to
/// the responses the user is still waiting for.
pub struct EffectRunner {
    engine: EngineHandle,
    resource: Resource,
    next_id: RequestId,
    latest_table: Option<RequestId>,
    latest_detail: Option<RequestId>,
    latest_dashboard: Option<RequestId>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, resource: Resource) -> Self {
        Self {
            engine,
            resource,
            next_id: 1,
            latest_table: None,
            latest_detail: None,
            latest_dashboard: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate { url, scroll } => {
                    dashboard_info!("Navigate url={} scroll={}", url, scroll);
                    self.load_location(&url);
                }
            }
        }
    }

    /// Requests the list page addressed by `location`.
    pub fn load_location(&mut self, location: &str) {
        let request_id = self.allocate();
        self.latest_table = Some(request_id);
        self.engine.load(
            request_id,
            PageRequest::List {
                resource: self.resource,
                query: list_query_for_location(location),
            },
        );
    }

    pub fn load_detail(&mut self, resource: Resource, id: &str) {
        let request_id = self.allocate();
        self.latest_detail = Some(request_id);
        self.engine.load(
            request_id,
            PageRequest::Detail {
                resource,
                id: id.to_string(),
            },
        );
    }

    pub fn load_dashboard(&mut self) {
        let request_id = self.allocate();
        self.latest_dashboard = Some(request_id);
        self.engine.load(request_id, PageRequest::Dashboard);
    }

    /// Drains whatever the engine has finished so far.
    pub fn poll(&mut self) -> Vec<Loaded> {
        let mut loaded = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(result) = self.accept(event) {
                loaded.push(result);
            }
        }
        loaded
    }

    /// Blocks until the next current result arrives or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<Loaded> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(std::time::Instant::now())?;
            let event = self.engine.recv_timeout(remaining)?;
            if let Some(result) = self.accept(event) {
                return Some(result);
            }
        }
    }

    fn accept(&mut self, event: EngineEvent) -> Option<Loaded> {
        match event {
            EngineEvent::TableLoaded {
                request_id,
                outcome,
            } => take_if_latest(&mut self.latest_table, request_id).then(|| Loaded::Table(outcome)),
            EngineEvent::DetailLoaded {
                request_id,
                outcome,
            } => {
                take_if_latest(&mut self.latest_detail, request_id).then(|| Loaded::Detail(outcome))
            }
            EngineEvent::DashboardLoaded { request_id, data } => {
                take_if_latest(&mut self.latest_dashboard, request_id)
                    .then(|| Loaded::Dashboard(data))
            }
        }
    }

    fn allocate(&mut self) -> RequestId {
        let request_id = self.next_id;
        self.next_id += 1;
        request_id
    }
}

fn take_if_latest(latest: &mut Option<RequestId>, request_id: RequestId) -> bool {
    if *latest == Some(request_id) {
        *latest = None;
        true
    } else {
        dashboard_debug!("Dropping stale response {}", request_id);
        false
    }
}

/// Backend query for a dashboard location: the URL parameters as they are.
pub fn list_query_for_location(location: &str) -> ListQuery {
    let (_, query) = split_location(location);
    ListQuery::from_pairs(QueryParams::parse(query).pairs().iter().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parameters_pass_through_to_the_backend() {
        let location = "/dashboard/orders?pageIndex=2&order_status=PENDING.SHIPPING#top";
        let query = list_query_for_location(location);
        assert_eq!(
            query.pairs(),
            &[
                ("pageIndex".to_string(), "2".to_string()),
                ("order_status".to_string(), "PENDING.SHIPPING".to_string()),
            ]
        );
    }

    #[test]
    fn bare_path_sends_no_parameters() {
        assert!(list_query_for_location("/dashboard/cakes").pairs().is_empty());
    }

    #[test]
    fn only_the_latest_request_is_accepted() {
        let mut latest = Some(4);
        assert!(!take_if_latest(&mut latest, 3));
        assert!(take_if_latest(&mut latest, 4));
        assert!(!take_if_latest(&mut latest, 4));
    }
}
