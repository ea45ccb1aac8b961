use crate::image_classifier::interface::{Classification, ClassifyError};
use crate::image_source::interface::{CapturedImage, SourceMode};
use crate::info_fetcher::interface::{FetchError, FlowerInfo};
use crate::user_input::interface::UserAction;
use thiserror::Error;

/// Generation of the user's latest pick. Completions from older generations are dropped.
pub type RequestId = u64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// The photo of the latest request, shown until a thumbnail replaces it.
    pub photo: Option<CapturedImage>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    #[error("Could not get a photo: {0}")]
    ImageSource(String),

    #[error("Could not run the classifier. {0}")]
    Classifier(ClassifyError),

    #[error("Could not identify this flower")]
    Unidentified,

    #[error("Could not load flower info. {0}")]
    InfoFetch(FetchError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    AcquiringImage { mode: SourceMode },
    Classifying,
    FetchingInfo { label: String },
    Rendered,
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub request: RequestId,
    pub phase: Phase,
    pub display: DisplayState,
}

#[derive(Debug)]
pub enum Event {
    UserInput(UserAction),
    ImageAcquireDone {
        request: RequestId,
        result: Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>>,
    },
    ClassifyDone {
        request: RequestId,
        result: Result<Vec<Classification>, ClassifyError>,
    },
    FetchInfoDone {
        request: RequestId,
        result: Result<FlowerInfo, FetchError>,
    },
}

impl Event {
    fn request(&self) -> Option<RequestId> {
        match self {
            Event::UserInput(_) => None,
            Event::ImageAcquireDone { request, .. }
            | Event::ClassifyDone { request, .. }
            | Event::FetchInfoDone { request, .. } => Some(*request),
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Event::FetchInfoDone {
                request,
                result: Ok(info),
            } => format!(
                "FetchInfoDone {{ request: {}, description: {} chars, thumbnail_url: {:?} }}",
                request,
                info.description.chars().count(),
                info.thumbnail_url
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToUserInput,
    AcquireImage {
        request: RequestId,
        mode: SourceMode,
    },
    ClassifyImage {
        request: RequestId,
        image: CapturedImage,
    },
    FetchInfo {
        request: RequestId,
        label: String,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            request: 0,
            phase: Phase::Idle,
            display: DisplayState::default(),
        },
        vec![Effect::SubscribeToUserInput],
    )
}

/// Title-cases a label the way it is shown on screen, e.g. "bird of paradise" -> "Bird Of Paradise".
pub fn capitalize_words(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;

    for c in label.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'');
    }

    out
}

fn failed(state: State, failure: Failure) -> (State, Vec<Effect>) {
    (
        State {
            phase: Phase::Failed(failure),
            ..state
        },
        vec![],
    )
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state.phase.clone(), event) {
        // A new pick always restarts the pipeline and supersedes whatever is in flight.
        (_, Event::UserInput(UserAction::PickSource(mode))) => {
            let request = state.request + 1;
            (
                State {
                    request,
                    phase: Phase::AcquiringImage { mode },
                    ..state
                },
                vec![Effect::AcquireImage { request, mode }],
            )
        }
        (_, Event::UserInput(UserAction::Quit)) => (state, vec![]),

        (_, event) if event.request() != Some(state.request) => (state, vec![]),

        // Image
        (Phase::AcquiringImage { .. }, Event::ImageAcquireDone { request, result }) => {
            match result {
                Ok(Some(image)) => (
                    State {
                        phase: Phase::Classifying,
                        display: DisplayState {
                            photo: Some(image.clone()),
                            ..state.display
                        },
                        ..state
                    },
                    vec![Effect::ClassifyImage { request, image }],
                ),
                Ok(None) => (
                    State {
                        phase: Phase::Idle,
                        ..state
                    },
                    vec![],
                ),
                Err(e) => failed(state, Failure::ImageSource(e.to_string())),
            }
        }

        // Classification
        (Phase::Classifying, Event::ClassifyDone { request, result }) => match result {
            Ok(classifications) => match classifications.into_iter().next() {
                Some(top) => (
                    State {
                        request,
                        phase: Phase::FetchingInfo {
                            label: top.label.clone(),
                        },
                        display: DisplayState {
                            title: capitalize_words(&top.label),
                            description: String::new(),
                            thumbnail_url: String::new(),
                            ..state.display
                        },
                    },
                    vec![Effect::FetchInfo {
                        request,
                        label: top.label,
                    }],
                ),
                None => failed(state, Failure::Unidentified),
            },
            Err(e) => failed(state, Failure::Classifier(e)),
        },

        // Info
        (Phase::FetchingInfo { .. }, Event::FetchInfoDone { result, .. }) => match result {
            Ok(info) => (
                State {
                    phase: Phase::Rendered,
                    display: DisplayState {
                        description: info.description,
                        thumbnail_url: info.thumbnail_url,
                        ..state.display
                    },
                    ..state
                },
                vec![],
            ),
            Err(e) => failed(state, Failure::InfoFetch(e)),
        },

        _ => (state, vec![]),
    }
}
