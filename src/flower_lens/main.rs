use crate::device_display::interface::DeviceDisplay;
use crate::flower_lens::core::{init, transition, Effect, Event};
use crate::flower_lens::render::Render;
use crate::flower_lens::run_effect::RunEffect;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_source::interface::ImageSource;
use crate::info_fetcher::interface::InfoFetcher;
use crate::library::logger::interface::Logger;
use crate::user_input::interface::{UserAction, UserInput};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

/// Owns the pipeline state. The run loop is the only place the state and the
/// display are touched; slow work happens on effect threads that report back
/// over the event channel.
#[derive(Clone)]
pub struct FlowerLens {
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
    event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl FlowerLens {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        info_fetcher: Arc<dyn InfoFetcher + Send + Sync>,
        user_input: Arc<dyn UserInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            run_effect: RunEffect::new(
                logger.clone(),
                image_source,
                image_classifier,
                info_fetcher,
                user_input,
                event_sender,
            ),
            render: Render::new(device_display),
            logger: logger.with_namespace("flower_lens"),
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Runs until the user quits.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let event_receiver = self
            .event_receiver
            .lock()
            .map_err(|_| "Event receiver lock poisoned")?;

        self.render.init()?;

        let (mut state, effects) = init();
        self.render.render(&state)?;
        self.spawn_effects(effects);

        loop {
            let event = event_receiver.recv()?;

            if matches!(event, Event::UserInput(UserAction::Quit)) {
                let _ = self.logger.info("Quit");
                return Ok(());
            }

            let _ = self.logger.info(&format!(
                "request {} {:?} <- {}",
                state.request,
                state.phase,
                event.to_display_string()
            ));

            let (new_state, effects) = transition(state, event);

            let _ = self.logger.info(&format!(
                "request {} {:?} -> {:?}",
                new_state.request, new_state.phase, effects
            ));

            state = new_state;
            self.render.render(&state)?;
            self.spawn_effects(effects);
        }
    }
}
