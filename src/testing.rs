//! Shared fixtures and fake providers for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::image::{GeneratedImage, ImageProvider};
use crate::models::{Diet, FitnessPlan, Gender, Goal, Level, Location, UserProfile};
use crate::plan::PlanProvider;
use crate::speech::{AudioClip, SpeechProvider};
use crate::stub::generate_stub;

pub fn profile() -> UserProfile {
    UserProfile {
        name: "Riya".into(),
        age: "31".into(),
        gender: Gender::Female,
        height: "168 cm".into(),
        weight: "64 kg".into(),
        goal: Goal::MuscleGain,
        level: Level::Intermediate,
        location: Location::Gym,
        diet: Diet::NonVeg,
        extras: String::new(),
    }
}

pub fn stub_plan() -> FitnessPlan {
    generate_stub(&profile())
}

/// A schema-valid plan as a provider would send it.
pub fn valid_plan_json() -> String {
    serde_json::to_string_pretty(&stub_plan()).unwrap()
}

/// Scripted reply shared by the fakes below.
struct Script<T> {
    reply: Result<T, String>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

impl<T: Clone> Script<T> {
    fn new(reply: Result<T, String>) -> Self {
        Self { reply, calls: AtomicUsize::new(0), last: Mutex::new(None) }
    }

    fn answer(&self, api_key: &str, input: &str) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((api_key.to_string(), input.to_string()));
        self.reply.clone().map_err(ProviderError::Http)
    }
}

pub struct FakePlanProvider(Script<String>);

impl FakePlanProvider {
    pub fn replying(text: &str) -> Self {
        Self(Script::new(Ok(text.to_string())))
    }

    pub fn failing(message: &str) -> Self {
        Self(Script::new(Err(message.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }

    /// `(api_key, prompt)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.0.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanProvider for FakePlanProvider {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        self.0.answer(api_key, prompt)
    }
}

pub struct FakeImageProvider(Script<GeneratedImage>);

impl FakeImageProvider {
    pub fn returning(image: GeneratedImage) -> Self {
        Self(Script::new(Ok(image)))
    }

    pub fn failing(message: &str) -> Self {
        Self(Script::new(Err(message.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn generate_image(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        self.0.answer(api_key, prompt)
    }
}

pub struct FakeSpeechProvider(Script<AudioClip>);

impl FakeSpeechProvider {
    pub fn returning(clip: AudioClip) -> Self {
        Self(Script::new(Ok(clip)))
    }

    pub fn failing(message: &str) -> Self {
        Self(Script::new(Err(message.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for FakeSpeechProvider {
    async fn synthesize(&self, api_key: &str, text: &str) -> Result<AudioClip, ProviderError> {
        self.0.answer(api_key, text)
    }
}
