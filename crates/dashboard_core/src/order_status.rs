//! Order status progression as rendered by the order detail stepper.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Accepted,
    Processing,
    ReadyForPickup,
    Shipping,
    Completed,
    Canceled,
    Faulty,
}

/// The happy path every order walks through, in order.
pub const ORDER_FLOW: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Accepted,
    OrderStatus::Processing,
    OrderStatus::ReadyForPickup,
    OrderStatus::Shipping,
    OrderStatus::Completed,
];

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::ReadyForPickup => "READY_FOR_PICKUP",
            OrderStatus::Shipping => "SHIPPING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Faulty => "FAULTY",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let status = match raw {
            "PENDING" => OrderStatus::Pending,
            "ACCEPTED" => OrderStatus::Accepted,
            "PROCESSING" => OrderStatus::Processing,
            "READY_FOR_PICKUP" => OrderStatus::ReadyForPickup,
            "SHIPPING" => OrderStatus::Shipping,
            "COMPLETED" => OrderStatus::Completed,
            "CANCELED" => OrderStatus::Canceled,
            "FAULTY" => OrderStatus::Faulty,
            _ => return None,
        };
        Some(status)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, OrderStatus::Canceled | OrderStatus::Faulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Current,
    Upcoming,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub state: StepState,
}

/// Steps for an order currently in `status`.
///
/// A failed order needs the last status it reached on the happy path; the
/// step after it is marked failed and the rest of the flow is dropped.
pub fn order_progress(status: OrderStatus, last_reached: Option<OrderStatus>) -> Vec<StatusStep> {
    if status.is_failure() {
        let reached = last_reached
            .and_then(|last| ORDER_FLOW.iter().position(|step| *step == last))
            .map_or(0, |index| index + 1);
        let mut steps: Vec<StatusStep> = ORDER_FLOW[..reached]
            .iter()
            .map(|&step| StatusStep {
                status: step,
                state: StepState::Done,
            })
            .collect();
        steps.push(StatusStep {
            status,
            state: StepState::Failed,
        });
        return steps;
    }

    let current = ORDER_FLOW
        .iter()
        .position(|step| *step == status)
        .unwrap_or(0);
    ORDER_FLOW
        .iter()
        .enumerate()
        .map(|(index, &step)| {
            let state = if index < current || status == OrderStatus::Completed {
                StepState::Done
            } else if index == current {
                StepState::Current
            } else {
                StepState::Upcoming
            };
            StatusStep {
                status: step,
                state,
            }
        })
        .collect()
}
