//! Admin listing: records, search and pagination.

use leptos::prelude::*;
use serde::Deserialize;

use crate::api::{ApiError, InvitesApi};

/// Rows per page.
pub const PAGE_SIZE: usize = 20;

/// Shown when loading fails without a message of its own.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load invite requests.";

/// One captured signup as served by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InviteRequest {
    /// Record identifier
    #[serde(default)]
    pub id: i64,

    /// Name given at signup
    #[serde(default)]
    pub full_name: Option<String>,

    /// Signup email
    #[serde(default)]
    pub email: Option<String>,

    /// Where the signup came from
    #[serde(default)]
    pub source: Option<String>,

    /// Invitation status
    #[serde(default)]
    pub status: Option<String>,

    /// Internal note
    #[serde(default)]
    pub note: Option<String>,

    /// Created timestamp
    #[serde(default)]
    pub created_at: Option<String>,

    /// Updated timestamp
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Last confirmation mail timestamp
    #[serde(default)]
    pub last_email_at: Option<String>,

    /// Invitation timestamp
    #[serde(default)]
    pub invited_at: Option<String>,
}

impl InviteRequest {
    fn matches(&self, needle: &str) -> bool {
        [&self.full_name, &self.email, &self.source, &self.status]
            .into_iter()
            .any(|field| {
                field
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(needle)
            })
    }
}

/// Records whose name, email, source or status contains `term`, ignoring case.
///
/// An empty term returns every record in its original order.
pub fn filter_invites(records: &[InviteRequest], term: &str) -> Vec<InviteRequest> {
    if term.is_empty() {
        return records.to_vec();
    }

    let needle = term.to_lowercase();

    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

/// Number of pages needed for `count` rows; zero rows is zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    count.div_ceil(page_size)
}

/// The rows on 1-based `page`. Out-of-range pages are empty.
pub fn paginate(records: &[InviteRequest], page_size: usize, page: usize) -> &[InviteRequest] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(records.len());

    records.get(start..end).unwrap_or_default()
}

/// Keep `page` inside `[1, total]`, or at 1 when there are no pages.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Per-session listing state.
#[derive(Debug, Clone, Copy)]
pub struct ListingView {
    /// Last loaded records
    pub records: RwSignal<Vec<InviteRequest>>,

    /// Search box contents
    pub search_term: RwSignal<String>,

    /// 1-based page number
    pub current_page: RwSignal<usize>,

    /// Last load error
    pub error: RwSignal<Option<String>>,

    /// A listing request is in flight
    pub loading: RwSignal<bool>,

    generation: RwSignal<u64>,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// Empty view on page 1.
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(Vec::new()),
            search_term: RwSignal::new(String::new()),
            current_page: RwSignal::new(1),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            generation: RwSignal::new(0),
        }
    }

    /// Change the search term; always returns to page 1.
    pub fn set_search_term(&self, term: String) {
        self.search_term.set(term);
        self.current_page.set(1);
    }

    /// Filtered records (tracked).
    pub fn filtered(&self) -> Vec<InviteRequest> {
        self.search_term
            .with(|term| self.records.with(|records| filter_invites(records, term)))
    }

    /// Page count for the current filter (tracked).
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), PAGE_SIZE)
    }

    /// Rows on the current page (tracked).
    pub fn visible(&self) -> Vec<InviteRequest> {
        let filtered = self.filtered();

        paginate(&filtered, PAGE_SIZE, self.current_page.get()).to_vec()
    }

    /// Whether a previous page exists (tracked).
    pub fn has_previous(&self) -> bool {
        self.current_page.get() > 1
    }

    /// Whether a next page exists (tracked).
    pub fn has_next(&self) -> bool {
        self.current_page.get() < self.total_pages()
    }

    /// Step back one page, never below 1.
    pub fn previous_page(&self) {
        self.current_page
            .update(|page| *page = clamp_page(page.saturating_sub(1), usize::MAX));
    }

    /// Step forward one page, never past the last.
    pub fn next_page(&self) {
        let total = self.filtered_count_untracked();

        self.current_page
            .update(|page| *page = clamp_page(page.saturating_add(1), total_pages(total, PAGE_SIZE)));
    }

    /// Apply a finished load. Failure keeps the previous records.
    pub fn apply(&self, result: Result<Vec<InviteRequest>, ApiError>) {
        match result {
            Ok(records) => {
                self.records.set(records);
                self.error.set(None);
            }
            Err(error) => {
                let message = error.to_string();

                self.error.set(Some(if message.is_empty() {
                    LOAD_FAILED_MESSAGE.to_string()
                } else {
                    message
                }));
            }
        }
    }

    /// Clear everything derived from the session.
    pub fn reset(&self) {
        self.records.set(Vec::new());
        self.search_term.set(String::new());
        self.current_page.set(1);
        self.error.set(None);
        self.loading.set(false);
        self.generation.update(|generation| {
            *generation = generation.saturating_add(1);
        });
    }

    fn filtered_count_untracked(&self) -> usize {
        self.search_term.with_untracked(|term| {
            self.records
                .with_untracked(|records| filter_invites(records, term).len())
        })
    }
}

/// Fetch the listing with `token` into `view`.
///
/// Does nothing when a load is already in flight. A result arriving after
/// [`ListingView::reset`] is dropped.
pub async fn load_invite_requests<A: InvitesApi>(api: &A, token: &str, view: ListingView) {
    if view.loading.get_untracked() {
        return;
    }

    let run_id = view.generation.get_untracked();
    view.loading.set(true);

    let result = api.list_invite_requests(token).await;

    if view.generation.get_untracked() != run_id {
        return;
    }

    view.apply(result);
    view.loading.set(false);
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use leptos::prelude::*;
    use serde_json::json;
    use testresult::TestResult;

    use crate::api::{ApiError, InvitesApi, SubscribeReply};

    use super::*;

    fn record(id: i64, name: Option<&str>, email: &str, source: Option<&str>, status: &str) -> InviteRequest {
        InviteRequest {
            id,
            full_name: name.map(ToString::to_string),
            email: Some(email.to_string()),
            source: source.map(ToString::to_string),
            status: Some(status.to_string()),
            ..InviteRequest::default()
        }
    }

    fn sample() -> Vec<InviteRequest> {
        vec![
            record(1, Some("Asha Rao"), "asha@example.com", Some("website"), "Pending"),
            record(2, None, "vik@example.org", None, "Invited"),
            record(3, Some("Meera"), "meera@example.com", Some("Referral"), "Pending"),
        ]
    }

    fn numbered(count: i64) -> Vec<InviteRequest> {
        (1..=count)
            .map(|id| record(id, None, &format!("user{id}@example.com"), None, "Pending"))
            .collect()
    }

    fn ids(records: &[InviteRequest]) -> Vec<i64> {
        records.iter().map(|record| record.id).collect()
    }

    #[test]
    fn invite_request_reads_pascal_case_with_nulls() -> TestResult {
        let record: InviteRequest = serde_json::from_value(json!({
            "Id": 7,
            "FullName": null,
            "Email": "a@example.com",
            "Status": "Pending",
            "CreatedAt": "2025-01-01T00:00:00Z",
            "LastEmailAt": null
        }))?;

        assert_eq!(record.id, 7);
        assert_eq!(record.full_name, None);
        assert_eq!(record.created_at.as_deref(), Some("2025-01-01T00:00:00Z"));

        Ok(())
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        assert_eq!(ids(&filter_invites(&sample(), "")), vec![1, 2, 3]);
    }

    #[test]
    fn filter_is_case_insensitive_across_fields() {
        let records = sample();

        assert_eq!(ids(&filter_invites(&records, "ASHA")), vec![1]);
        assert_eq!(ids(&filter_invites(&records, "example.com")), vec![1, 3]);
        assert_eq!(ids(&filter_invites(&records, "referral")), vec![3]);
        assert_eq!(ids(&filter_invites(&records, "pend")), vec![1, 3]);
    }

    #[test]
    fn filter_ignores_unsearched_and_missing_fields() {
        let mut records = sample();
        if let Some(first) = records.first_mut() {
            first.note = Some("vip".to_string());
        }

        assert!(filter_invites(&records, "vip").is_empty());
        assert_eq!(ids(&filter_invites(&records, "web")), vec![1]);
    }

    fn mentions(record: &InviteRequest, term: &str) -> bool {
        let needle = term.to_lowercase();
        let fields = [
            record.full_name.clone(),
            record.email.clone(),
            record.source.clone(),
            record.status.clone(),
        ];

        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    #[test]
    fn filter_output_partitions_the_input() {
        let records = sample();

        for term in ["a", "example", "INV", "zzz", "o"] {
            let kept = filter_invites(&records, term);

            for record in &records {
                assert_eq!(
                    kept.contains(record),
                    mentions(record, term),
                    "term {term}, record {}",
                    record.id
                );
            }
        }
    }

    #[test]
    fn filter_matches_each_searchable_field() {
        let records = sample();

        for (term, expected) in [
            ("rao", vec![1]),
            ("EXAMPLE.ORG", vec![2]),
            ("referral", vec![3]),
            ("pend", vec![1, 3]),
            ("invited", vec![2]),
            ("zzz", vec![]),
        ] {
            assert_eq!(ids(&filter_invites(&records, term)), expected, "term {term}");
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(20, PAGE_SIZE), 1);
        assert_eq!(total_pages(21, PAGE_SIZE), 2);
        assert_eq!(total_pages(45, PAGE_SIZE), 3);
    }

    #[test]
    fn paginate_slices_pages() {
        let records = numbered(45);

        assert_eq!(ids(paginate(&records, PAGE_SIZE, 1)), (1..=20).collect::<Vec<_>>());
        assert_eq!(ids(paginate(&records, PAGE_SIZE, 3)), (41..=45).collect::<Vec<_>>());
        assert!(paginate(&records, PAGE_SIZE, 4).is_empty());
    }

    #[test]
    fn paginate_first_page_of_empty_set_is_empty() {
        assert!(paginate(&[], PAGE_SIZE, 1).is_empty());
    }

    #[test]
    fn clamp_page_stays_in_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 0), 1);
    }

    #[test]
    fn changing_search_term_resets_page() {
        let view = ListingView::new();
        view.records.set(numbered(45));
        view.current_page.set(3);

        view.set_search_term("user1".to_string());

        assert_eq!(view.current_page.get_untracked(), 1);
    }

    #[test]
    fn navigation_stops_at_the_edges() {
        let view = ListingView::new();
        view.records.set(numbered(45));

        view.previous_page();
        assert_eq!(view.current_page.get_untracked(), 1);

        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.current_page.get_untracked(), 3);
    }

    #[test]
    fn navigation_on_empty_set_stays_on_page_one() {
        let view = ListingView::new();

        view.next_page();
        view.previous_page();

        assert_eq!(view.current_page.get_untracked(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_records() {
        let view = ListingView::new();
        view.apply(Ok(sample()));

        view.apply(Err(ApiError::Server {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));

        assert_eq!(view.records.get_untracked().len(), 3);
        assert_eq!(
            view.error.get_untracked().as_deref(),
            Some("Internal Server Error")
        );
    }

    #[test]
    fn successful_load_clears_error() {
        let view = ListingView::new();
        view.error.set(Some("old".to_string()));

        view.apply(Ok(sample()));

        assert_eq!(view.error.get_untracked(), None);
    }

    #[test]
    fn empty_error_message_uses_default() {
        let view = ListingView::new();

        view.apply(Err(ApiError::Network(String::new())));

        assert_eq!(view.error.get_untracked().as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn reset_clears_view_state() {
        let view = ListingView::new();
        view.apply(Ok(sample()));
        view.set_search_term("asha".to_string());
        view.current_page.set(2);

        view.reset();

        assert!(view.records.get_untracked().is_empty());
        assert!(view.search_term.get_untracked().is_empty());
        assert_eq!(view.current_page.get_untracked(), 1);
    }

    /// Counts calls and hands out queued results once.
    #[derive(Debug, Default)]
    pub(crate) struct FakeApi {
        pub subscribe_calls: AtomicUsize,
        pub list_calls: AtomicUsize,
        pub subscribe_result: Mutex<Option<Result<SubscribeReply, ApiError>>>,
        pub list_result: Mutex<Option<Result<Vec<InviteRequest>, ApiError>>>,
        pub login_result: Mutex<Option<Result<String, ApiError>>>,
        pub tokens: Mutex<Vec<String>>,
    }

    impl InvitesApi for FakeApi {
        async fn subscribe(&self, _email: &str, _name: &str) -> Result<SubscribeReply, ApiError> {
            self.subscribe_calls.fetch_add(1, Ordering::SeqCst);

            self.subscribe_result
                .lock()
                .ok()
                .and_then(|mut result| result.take())
                .unwrap_or_else(|| Err(ApiError::Network("no reply queued".to_string())))
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<String, ApiError> {
            self.login_result
                .lock()
                .ok()
                .and_then(|mut result| result.take())
                .unwrap_or_else(|| Err(ApiError::Network("no reply queued".to_string())))
        }

        async fn list_invite_requests(&self, token: &str) -> Result<Vec<InviteRequest>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);

            if let Ok(mut tokens) = self.tokens.lock() {
                tokens.push(token.to_string());
            }

            self.list_result
                .lock()
                .ok()
                .and_then(|mut result| result.take())
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn load_sends_token_and_stores_records() -> TestResult {
        let api = FakeApi::default();
        *api.list_result.lock().map_err(|error| error.to_string())? = Some(Ok(sample()));
        let view = ListingView::new();

        load_invite_requests(&api, "token-1", view).await;

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*api.tokens.lock().map_err(|error| error.to_string())?, vec!["token-1"]);
        assert_eq!(view.records.get_untracked().len(), 3);
        assert!(!view.loading.get_untracked());

        Ok(())
    }

    #[tokio::test]
    async fn load_is_skipped_while_another_is_in_flight() {
        let api = FakeApi::default();
        let view = ListingView::new();
        view.loading.set(true);

        load_invite_requests(&api, "token-1", view).await;

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }
}
