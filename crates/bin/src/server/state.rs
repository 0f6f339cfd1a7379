use eurenew::ReportService;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub(crate) struct AppState {
    /// Pipeline runner holding the memoized dataset
    pub(crate) service: ReportService,
}

impl AppState {
    pub(crate) const fn new(service: ReportService) -> Self {
        Self { service }
    }
}
