/// The modal currently shown over the dashboard. Each variant carries
/// exactly the payload its dialog needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    BakeryDetail { bakery_id: String },
    OrderDetail { order_id: String },
    CakeDetail { cake_id: String },
    BadReportDetail { report_id: String },
    /// `None` opens the form for a new promotion.
    PromotionForm { promotion_id: Option<String> },
    ConfirmDelete { resource: String, id: String },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }
}
