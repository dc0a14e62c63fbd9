pub mod controller;
pub mod criteria;
pub mod genres;
pub mod state;

pub use controller::{PendingRequest, RequestId, SearchController};
pub use criteria::SearchCriteria;
pub use genres::ClickedGenreSet;
pub use state::{SearchEvent, SearchPhase, SearchResultState};

/// Movies per page. A shorter page means the results are exhausted.
pub const PAGE_SIZE: usize = 5;
