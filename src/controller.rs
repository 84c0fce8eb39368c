use reqwest::Url;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::cards::{ItemCardModel, SiteSummaryModel, item_cards};
use crate::data_models::SiteManifest;
use crate::fetcher::{FetchError, ManifestSource, parse_base_url, site_root};
use crate::normalizer::{NormalizeError, normalize};

pub const LOAD_FAILED_MESSAGE: &str = "Could not load site";
pub const NO_ITEMS_MESSAGE: &str = "No items found";

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    token: u64,
    query: String,
}

/// Immutable snapshot of everything the views need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultViewState {
    pub query: String,
    pub status: Status,
    pub manifest: Option<SiteManifest>,
    pub site_root: Option<Url>,
    pub error_message: Option<String>,
    in_flight: Option<InFlight>,
    next_token: u64,
}

impl ResultViewState {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn cards(&self) -> Vec<ItemCardModel> {
        self.manifest.as_ref().map(item_cards).unwrap_or_default()
    }

    pub fn summary(&self, default_logo: &str) -> Option<SiteSummaryModel> {
        self.manifest
            .as_ref()
            .map(|m| SiteSummaryModel::new(m, default_logo))
    }

    fn cleared(&self) -> ResultViewState {
        ResultViewState {
            query: String::new(),
            next_token: self.next_token,
            ..ResultViewState::default()
        }
    }

    fn failed(&self, message: String) -> ResultViewState {
        ResultViewState {
            query: self.query.clone(),
            status: Status::Error,
            error_message: Some(message),
            next_token: self.next_token,
            ..ResultViewState::default()
        }
    }
}

/// A normalized manifest and the directory it was served from.
#[derive(Debug, Clone)]
pub struct LoadedSite {
    pub manifest: SiteManifest,
    pub site_root: Url,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl LoadError {
    /// Short text shown to the user; the full error goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Fetch(FetchError::InvalidUrl { input, .. }) => invalid_url_message(input),
            LoadError::Fetch(_) => LOAD_FAILED_MESSAGE.to_string(),
            LoadError::Normalize(_) => NO_ITEMS_MESSAGE.to_string(),
        }
    }
}

pub fn invalid_url_message(input: &str) -> String {
    format!("{:?} is not a valid absolute URL", input.trim())
}

#[derive(Debug)]
pub enum Msg {
    /// The search field changed.
    InputChanged(String),
    /// The submit button was pressed.
    Submit,
    /// Shorthand for `InputChanged` followed by `Submit`.
    Search(String),
    /// A fetch started by `Effect::Fetch` finished.
    Settled {
        token: u64,
        outcome: Result<LoadedSite, LoadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { token: u64, url: Url },
}

pub fn update(state: &ResultViewState, msg: Msg) -> (ResultViewState, Option<Effect>) {
    match msg {
        Msg::InputChanged(query) => (input_changed(state, query), None),
        Msg::Submit => submit(state),
        Msg::Search(query) => submit(&input_changed(state, query)),
        Msg::Settled { token, outcome } => (settled(state, token, outcome), None),
    }
}

fn input_changed(state: &ResultViewState, query: String) -> ResultViewState {
    if query.trim().is_empty() {
        return state.cleared();
    }
    ResultViewState {
        query,
        ..state.clone()
    }
}

fn submit(state: &ResultViewState) -> (ResultViewState, Option<Effect>) {
    if state.is_loading() {
        log::debug!("ignoring submit while {:?} is loading", state.query);
        return (state.clone(), None);
    }
    if state.query.trim().is_empty() {
        return (state.cleared(), None);
    }

    let url = match parse_base_url(&state.query) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("rejected query: {e}");
            return (state.failed(invalid_url_message(&state.query)), None);
        }
    };

    let token = state.next_token;
    let next = ResultViewState {
        status: Status::Loading,
        error_message: None,
        in_flight: Some(InFlight {
            token,
            query: state.query.clone(),
        }),
        next_token: token + 1,
        ..state.clone()
    };
    (next, Some(Effect::Fetch { token, url }))
}

fn settled(
    state: &ResultViewState,
    token: u64,
    outcome: Result<LoadedSite, LoadError>,
) -> ResultViewState {
    let Some(in_flight) = state.in_flight.as_ref().filter(|f| f.token == token) else {
        log::debug!("discarding stale response for request {token}");
        return state.clone();
    };

    if in_flight.query != state.query {
        log::debug!(
            "discarding response for {:?}, query is now {:?}",
            in_flight.query,
            state.query
        );
        let status = if state.manifest.is_some() {
            Status::Loaded
        } else {
            Status::Idle
        };
        return ResultViewState {
            status,
            in_flight: None,
            ..state.clone()
        };
    }

    match outcome {
        Ok(site) => {
            log::info!(
                "loaded {:?} with {} items from {}",
                site.manifest.title,
                site.manifest.items.len(),
                site.site_root
            );
            ResultViewState {
                query: state.query.clone(),
                status: Status::Loaded,
                manifest: Some(site.manifest),
                site_root: Some(site.site_root),
                error_message: None,
                in_flight: None,
                next_token: state.next_token,
            }
        }
        Err(e) => {
            log::error!("error loading site {:?}, error: {:#}", state.query, e);
            state.failed(e.user_message())
        }
    }
}

/// Fetches and normalizes the manifest behind `url`.
pub async fn load_site<S: ManifestSource + ?Sized>(
    source: &S,
    url: &Url,
) -> Result<LoadedSite, LoadError> {
    let fetched = source.fetch_manifest(url).await?;
    let manifest = normalize(&fetched.body)?;
    Ok(LoadedSite {
        manifest,
        site_root: site_root(&fetched.endpoint),
    })
}

/// Owns a [`ResultViewState`] and publishes every new snapshot to subscribers.
pub struct ResultsController<S> {
    source: Arc<S>,
    state: ResultViewState,
    snapshots: watch::Sender<ResultViewState>,
}

impl<S> ResultsController<S>
where
    S: ManifestSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> ResultsController<S> {
        let state = ResultViewState::default();
        let (snapshots, _) = watch::channel(state.clone());
        ResultsController {
            source: Arc::new(source),
            state,
            snapshots,
        }
    }

    pub fn state(&self) -> &ResultViewState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultViewState> {
        self.snapshots.subscribe()
    }

    /// Applies `msg` and returns the effect the caller must run, if any.
    pub fn apply(&mut self, msg: Msg) -> Option<Effect> {
        let (next, effect) = update(&self.state, msg);
        if next != self.state {
            self.state = next;
            self.snapshots.send_replace(self.state.clone());
        }
        effect
    }

    /// Runs `effect` without borrowing the controller, so input can keep
    /// arriving while the request is in flight.
    pub fn perform(&self, effect: Effect) -> impl Future<Output = Msg> + Send + use<S> {
        let source = self.source.clone();
        async move {
            match effect {
                Effect::Fetch { token, url } => Msg::Settled {
                    token,
                    outcome: load_site(source.as_ref(), &url).await,
                },
            }
        }
    }

    /// Applies `msg` and drives any resulting effects to completion.
    pub async fn dispatch(&mut self, msg: Msg) -> &ResultViewState {
        let mut effect = self.apply(msg);
        while let Some(pending) = effect.take() {
            let settled = self.perform(pending).await;
            effect = self.apply(settled);
        }
        &self.state
    }
}
