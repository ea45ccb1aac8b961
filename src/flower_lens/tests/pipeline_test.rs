use crate::flower_lens::core::{init, transition, Effect, Event, Failure, Phase, State};
use crate::flower_lens::render::screen_for;
use crate::flower_lens::tests::fixture::{candidates, logger, AppFixture, Fixture, DAISY_JSON};
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_source::impl_fake::ImageSourceFake;
use crate::image_source::interface::SourceMode;
use crate::info_fetcher::impl_fake::InfoFetcherFake;
use crate::info_fetcher::interface::FetchError;
use crate::user_input::interface::UserAction;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Runs effects one at a time on the test thread and feeds their events back
/// into `transition` until nothing is left to do.
fn drive(f: &Fixture, state: State, effects: Vec<Effect>) -> State {
    let mut state = state;
    let mut pending: VecDeque<Effect> = effects.into();

    while let Some(effect) = pending.pop_front() {
        f.run_effect.run_effect(effect);
        let event = f.events.recv_timeout(Duration::from_secs(5)).unwrap();
        let (next, effects) = transition(state, event);
        state = next;
        pending.extend(effects);
    }

    state
}

fn pick(f: &Fixture, state: State) -> State {
    let (state, effects) = transition(
        state,
        Event::UserInput(UserAction::PickSource(SourceMode::Library)),
    );
    drive(f, state, effects)
}

#[test]
fn test_daisy_end_to_end() {
    let f = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("daisy", 0.88)]))),
        InfoFetcherFake::new(logger()).with_response("daisy", DAISY_JSON),
    );

    let state = pick(&f, init().0);
    let screen = screen_for(&state);

    assert_eq!(state.phase, Phase::Rendered);
    assert_eq!(f.info_fetcher.requested(), vec!["daisy"]);
    assert_eq!(screen.title, "Daisy");
    assert_eq!(screen.description, "A daisy is...");
    assert_eq!(screen.thumbnail_url, "http://x/daisy.jpg");
    assert_eq!(screen.status, "");
}

#[test]
fn test_only_top_label_is_looked_up() {
    let f = Fixture::new(
        ImageClassifierFake::new(logger())
            .with_result(Ok(candidates(&[("rose", 0.92), ("tulip", 0.05)]))),
        InfoFetcherFake::new(logger()),
    );

    let state = pick(&f, init().0);

    assert_eq!(state.display.title, "Rose");
    assert_eq!(f.info_fetcher.requested(), vec!["rose"]);
}

#[test]
fn test_empty_classification_issues_no_request() {
    let f = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(vec![])),
        InfoFetcherFake::new(logger()),
    );

    let state = pick(&f, init().0);

    assert_eq!(state.phase, Phase::Failed(Failure::Unidentified));
    assert_eq!(f.image_classifier.calls(), 1);
    assert!(f.info_fetcher.requested().is_empty());
}

#[test]
fn test_cancelled_pick_never_classifies() {
    let f = Fixture::with_image_source(
        ImageSourceFake::new(logger()).cancelling(),
        ImageClassifierFake::new(logger()),
        InfoFetcherFake::new(logger()),
    );

    let state = pick(&f, init().0);

    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(f.image_classifier.calls(), 0);
}

#[test]
fn test_network_failure_keeps_title_and_applies_nothing() {
    let error = FetchError::Status(503);
    let f = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("daisy", 0.88)]))),
        InfoFetcherFake::new(logger()).with_failure("daisy", error.clone()),
    );

    let state = pick(&f, init().0);
    let screen = screen_for(&state);

    assert_eq!(state.phase, Phase::Failed(Failure::InfoFetch(error)));
    assert_eq!(screen.title, "Daisy");
    assert_eq!(screen.description, "");
    assert_eq!(screen.thumbnail_url, "");
    assert!(screen.status.contains("503"));
}

#[test]
fn test_second_request_replaces_every_field() {
    let daisy = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("daisy", 0.88)]))),
        InfoFetcherFake::new(logger()).with_response("daisy", DAISY_JSON),
    );
    let first = pick(&daisy, init().0);
    assert_eq!(first.display.title, "Daisy");

    let sunflower = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("sunflower", 0.7)]))),
        InfoFetcherFake::new(logger()).with_response(
            "sunflower",
            r#"{"query":{"pageids":["9"],"pages":{"9":{"extract":"Sunflowers are tall.","thumbnail":{"source":"http://x/sun.jpg"}}}}}"#,
        ),
    );
    let second = pick(&sunflower, first);
    let screen = screen_for(&second);

    assert_eq!(second.request, 2);
    assert_eq!(screen.title, "Sunflower");
    assert_eq!(screen.description, "Sunflowers are tall.");
    assert_eq!(screen.thumbnail_url, "http://x/sun.jpg");
}

#[test]
fn test_partial_response_still_renders() {
    let f = Fixture::new(
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("lotus", 0.6)]))),
        InfoFetcherFake::new(logger()).with_response(
            "lotus",
            r#"{"query":{"pageids":["5"],"pages":{"5":{"extract":"Lotus grows in water."}}}}"#,
        ),
    );

    let state = pick(&f, init().0);

    assert_eq!(state.phase, Phase::Rendered);
    assert_eq!(state.display.description, "Lotus grows in water.");
    assert_eq!(state.display.thumbnail_url, "");
}

#[test]
fn test_run_loop_renders_pipeline() {
    let app = AppFixture::new(
        vec![UserAction::PickSource(SourceMode::Camera)],
        ImageClassifierFake::new(logger()).with_result(Ok(candidates(&[("daisy", 0.88)]))),
        InfoFetcherFake::new(logger()).with_response("daisy", DAISY_JSON),
    );

    let flower_lens = app.flower_lens.clone();
    std::thread::spawn(move || flower_lens.run());

    let deadline = Instant::now() + Duration::from_secs(5);
    let rendered = loop {
        let last = app.screens.lock().unwrap().last().cloned();
        if let Some(screen) = last.filter(|s| !s.description.is_empty()) {
            break screen;
        }
        assert!(Instant::now() < deadline, "pipeline did not finish");
        std::thread::sleep(Duration::from_millis(20));
    };

    assert_eq!(rendered.title, "Daisy");
    assert_eq!(rendered.description, "A daisy is...");
    assert_eq!(rendered.thumbnail_url, "http://x/daisy.jpg");

    let screens = app.screens.lock().unwrap();
    assert_eq!(screens[0].status, "Take or pick a photo of a flower");
    assert!(screens.iter().any(|s| s.status == "Identifying..."));
}

#[test]
fn test_run_loop_stops_on_quit() {
    let app = AppFixture::new(
        vec![UserAction::Quit],
        ImageClassifierFake::new(logger()),
        InfoFetcherFake::new(logger()),
    );

    assert!(app.flower_lens.run().is_ok());
}
