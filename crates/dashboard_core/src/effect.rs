#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push `url` onto the history stack. The page refetches from the new
    /// location; `scroll` is always false for table navigations.
    Navigate { url: String, scroll: bool },
}
