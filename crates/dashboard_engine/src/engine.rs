use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_logging::dashboard_debug;

use crate::analytics::{load_dashboard, DashboardData};
use crate::backend::Backend;
use crate::page::PageOutcome;
use crate::resource::{load_detail, load_table, RenderedDetail, RenderedTable, Resource};
use crate::session::Session;
use crate::ListQuery;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    List { resource: Resource, query: ListQuery },
    Detail { resource: Resource, id: String },
    Dashboard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    TableLoaded {
        request_id: RequestId,
        outcome: PageOutcome<RenderedTable>,
    },
    DetailLoaded {
        request_id: RequestId,
        outcome: PageOutcome<RenderedDetail>,
    },
    DashboardLoaded {
        request_id: RequestId,
        data: DashboardData,
    },
}

enum EngineCommand {
    Load {
        request_id: RequestId,
        request: PageRequest,
    },
}

/// Runs page loads on a background tokio runtime and reports results over a
/// channel. Loads run concurrently; events arrive in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>, session: Session) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let session = Arc::new(session);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let session = session.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), &session, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load(&self, request_id: RequestId, request: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Load {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    session: &Session,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load {
            request_id,
            request,
        } => {
            dashboard_debug!("Loading request {} {:?}", request_id, request);
            let event = match request {
                PageRequest::List { resource, query } => EngineEvent::TableLoaded {
                    request_id,
                    outcome: load_table(backend, session, resource, &query).await,
                },
                PageRequest::Detail { resource, id } => EngineEvent::DetailLoaded {
                    request_id,
                    outcome: load_detail(backend, session, resource, &id).await,
                },
                PageRequest::Dashboard => EngineEvent::DashboardLoaded {
                    request_id,
                    data: load_dashboard(backend, session).await,
                },
            };
            let _ = event_tx.send(event);
        }
    }
}
