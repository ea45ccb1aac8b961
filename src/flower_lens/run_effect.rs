use crate::flower_lens::core::{Effect, Event};
use crate::image_classifier::interface::ImageClassifier;
use crate::image_source::interface::ImageSource;
use crate::info_fetcher::interface::InfoFetcher;
use crate::library::logger::interface::Logger;
use crate::user_input::interface::UserInput;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    image_source: Arc<dyn ImageSource + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    info_fetcher: Arc<dyn InfoFetcher + Send + Sync>,
    user_input: Arc<dyn UserInput + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        info_fetcher: Arc<dyn InfoFetcher + Send + Sync>,
        user_input: Arc<dyn UserInput + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            image_source,
            image_classifier,
            info_fetcher,
            user_input,
            event_sender,
        }
    }

    /// Performs `effect` on the calling thread and reports its outcome as an event.
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToUserInput => {
                for action in self.user_input.events() {
                    if self.event_sender.send(Event::UserInput(action)).is_err() {
                        break;
                    }
                }
            }
            Effect::AcquireImage { request, mode } => {
                let result = self.image_source.acquire(mode);
                let _ = self
                    .event_sender
                    .send(Event::ImageAcquireDone { request, result });
            }
            Effect::ClassifyImage { request, image } => {
                let result = self.image_classifier.classify(&image);
                drop(image);
                let _ = self.event_sender.send(Event::ClassifyDone { request, result });
            }
            Effect::FetchInfo { request, label } => {
                let result = self.info_fetcher.fetch_info(&label);
                let _ = self
                    .event_sender
                    .send(Event::FetchInfoDone { request, result });
            }
        }
    }
}
