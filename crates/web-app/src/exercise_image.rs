//! Lazily fetched, AI-generated exercise demonstration images.
//!
//! Each image belongs to exactly one UI element. The loader retries
//! rate-limited requests with exponential backoff, staggers the initial
//! fetches of elements that become visible at the same time, and discards
//! results that arrive after the owning element has been torn down.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use log::debug;

use vigor_domain as domain;

pub const ERROR_MESSAGE: &str = "Could not load image.";

#[allow(async_fn_in_trait)]
pub trait ImageSource {
    async fn exercise_image(
        &self,
        exercise: &str,
    ) -> Result<domain::ExerciseImage, domain::GenerateError>;
}

/// Delays and jitter for the retry ladder, abstracted to keep the loader
/// independent of the browser event loop.
#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
    /// Uniformly distributed value in `[0, 1)`.
    fn jitter(&self) -> f64;
}

#[derive(Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        #[allow(clippy::cast_possible_truncation)]
        gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
    }

    fn jitter(&self) -> f64 {
        web_sys::js_sys::Math::random()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    NotStarted,
    Loading,
    Loaded(domain::ExerciseImage),
    Failed(String),
}

impl FetchState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
    pub stagger_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_delay: Duration::from_millis(2000),
            max_jitter: Duration::from_millis(1000),
            stagger_step: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32, jitter: f64) -> Duration {
        self.base_delay * 2u32.pow(attempt) + self.max_jitter.mul_f64(jitter.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn stagger_delay(&self, index: usize) -> Duration {
        #[allow(clippy::cast_possible_truncation)]
        let index = index as u32;
        self.stagger_step * index
    }
}

/// Alive flag of the owning UI element. Cloned into every asynchronous
/// continuation; once released it never becomes alive again.
#[derive(Clone)]
pub struct Scope(Rc<Cell<bool>>);

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn release(&self) {
        self.0.set(false);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

type ChangeListener = Box<dyn FnMut(&FetchState)>;

/// Fetches the demonstration image for one exercise.
///
/// At most one fetch cycle runs at a time. A cycle retries on rate-limit
/// errors only, up to `max_retries` times, waiting
/// `base_delay * 2^attempt + jitter` between attempts. Any other error, or an
/// exhausted retry budget, ends the cycle with a generic failure message.
pub struct ExerciseImageLoader<S, T> {
    source: S,
    timer: T,
    policy: RetryPolicy,
    scope: Scope,
    state: Rc<RefCell<FetchState>>,
    on_change: RefCell<Option<ChangeListener>>,
}

impl<S: ImageSource, T: Timer> ExerciseImageLoader<S, T> {
    pub fn new(source: S, timer: T) -> Self {
        Self::with_policy(source, timer, RetryPolicy::default())
    }

    pub fn with_policy(source: S, timer: T, policy: RetryPolicy) -> Self {
        Self {
            source,
            timer,
            policy,
            scope: Scope::new(),
            state: Rc::new(RefCell::new(FetchState::NotStarted)),
            on_change: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope.clone()
    }

    /// Registers a listener called after every state change.
    pub fn on_change(&self, listener: impl FnMut(&FetchState) + 'static) {
        *self.on_change.borrow_mut() = Some(Box::new(listener));
    }

    /// Marks the owning UI element as torn down. All further state changes
    /// are suppressed and no further retries are scheduled.
    pub fn release(&self) {
        self.scope.release();
    }

    /// The automatic fetch, delayed by the stagger offset so that many
    /// elements becoming visible at once do not burst the image endpoint.
    pub async fn fetch(&self, exercise: &str, stagger_index: usize) {
        let delay = self.policy.stagger_delay(stagger_index);
        if !delay.is_zero() {
            self.timer.sleep(delay).await;
        }
        self.run(exercise).await;
    }

    /// Manual retry, without stagger delay. A no-op while a fetch cycle is
    /// already running.
    pub async fn retry(&self, exercise: &str) {
        if self.state.borrow().is_loading() {
            return;
        }
        self.run(exercise).await;
    }

    async fn run(&self, exercise: &str) {
        if !self.set(FetchState::Loading) {
            return;
        }
        let mut attempt = 0;
        loop {
            match self.source.exercise_image(exercise).await {
                Ok(image) => {
                    self.set(FetchState::Loaded(image));
                    return;
                }
                Err(err) => {
                    debug!(
                        "image generation attempt {} failed for {exercise}: {err}",
                        attempt + 1
                    );
                    if !err.is_rate_limited() || attempt >= self.policy.max_retries {
                        self.set(FetchState::Failed(ERROR_MESSAGE.to_string()));
                        return;
                    }
                    let delay = self.policy.backoff_delay(attempt, self.timer.jitter());
                    debug!("rate limit hit for {exercise}, retrying in {delay:?}");
                    self.timer.sleep(delay).await;
                    if !self.scope.is_alive() {
                        return;
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn set(&self, state: FetchState) -> bool {
        if !self.scope.is_alive() {
            debug!("discarding image fetch state change after teardown");
            return false;
        }
        *self.state.borrow_mut() = state.clone();
        if let Some(listener) = self.on_change.borrow_mut().as_mut() {
            listener(&state);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        future::Future,
        pin::{Pin, pin},
        task::{Context, Poll, Waker},
    };

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use vigor_domain::GenerateError;

    use super::*;

    const EXERCISE: &str = "Barbell Bench Press";

    fn image() -> domain::ExerciseImage {
        domain::ExerciseImage::from_base64_png("AAAA")
    }

    /// Returns the scripted results in order; pends forever once exhausted.
    #[derive(Clone)]
    struct ScriptedSource {
        results: Rc<RefCell<VecDeque<Result<domain::ExerciseImage, GenerateError>>>>,
        calls: Rc<Cell<usize>>,
        release_on_call: Rc<RefCell<Option<Scope>>>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<domain::ExerciseImage, GenerateError>>) -> Self {
            Self {
                results: Rc::new(RefCell::new(results.into())),
                calls: Rc::new(Cell::new(0)),
                release_on_call: Rc::new(RefCell::new(None)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl ImageSource for ScriptedSource {
        async fn exercise_image(
            &self,
            _: &str,
        ) -> Result<domain::ExerciseImage, GenerateError> {
            self.calls.set(self.calls.get() + 1);
            if let Some(scope) = self.release_on_call.borrow_mut().take() {
                scope.release();
            }
            let next = self.results.borrow_mut().pop_front();
            match next {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }

    #[derive(Clone)]
    struct InstantTimer {
        sleeps: Rc<RefCell<Vec<Duration>>>,
        jitter: f64,
        release_on_sleep: Rc<RefCell<Option<Scope>>>,
    }

    impl InstantTimer {
        fn new(jitter: f64) -> Self {
            Self {
                sleeps: Rc::new(RefCell::new(vec![])),
                jitter,
                release_on_sleep: Rc::new(RefCell::new(None)),
            }
        }

        fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.borrow().clone()
        }
    }

    impl Timer for InstantTimer {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            if let Some(scope) = self.release_on_sleep.borrow_mut().take() {
                scope.release();
            }
        }

        fn jitter(&self) -> f64 {
            self.jitter
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut context = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut context) {
                return output;
            }
        }
    }

    fn poll_once<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
        future.poll(&mut Context::from_waker(Waker::noop()))
    }

    fn loader(
        source: &ScriptedSource,
        timer: &InstantTimer,
    ) -> ExerciseImageLoader<ScriptedSource, InstantTimer> {
        ExerciseImageLoader::new(source.clone(), timer.clone())
    }

    #[test]
    fn test_success_without_retry() {
        let source = ScriptedSource::new(vec![Ok(image())]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(loader.state(), FetchState::Loaded(image()));
        assert_eq!(source.calls(), 1);
        assert_eq!(timer.sleeps(), vec![]);
    }

    #[test]
    fn test_retries_until_success() {
        let source = ScriptedSource::new(vec![
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Ok(image()),
        ]);
        let timer = InstantTimer::new(0.5);
        let loader = loader(&source, &timer);

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(loader.state(), FetchState::Loaded(image()));
        assert_eq!(source.calls(), 5);
        let sleeps = timer.sleeps();
        assert_eq!(
            sleeps,
            vec![
                Duration::from_millis(2500),
                Duration::from_millis(4500),
                Duration::from_millis(8500),
                Duration::from_millis(16500),
            ]
        );
        for (attempt, delay) in sleeps.iter().enumerate() {
            let base = 2000 * 2u64.pow(attempt as u32);
            assert!((base..base + 1000).contains(&(delay.as_millis() as u64)));
        }
    }

    #[test]
    fn test_gives_up_after_max_retries() {
        let source = ScriptedSource::new(vec![
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
            Err(GenerateError::RateLimited),
        ]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(loader.state(), FetchState::Failed(ERROR_MESSAGE.to_string()));
        assert_eq!(source.calls(), 5);
        assert_eq!(timer.sleeps().len(), 4);
    }

    #[test]
    fn test_fails_immediately_on_non_rate_limit_error() {
        let source = ScriptedSource::new(vec![Err(GenerateError::Other("bad response".into()))]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(loader.state(), FetchState::Failed(ERROR_MESSAGE.to_string()));
        assert_eq!(source.calls(), 1);
        assert_eq!(timer.sleeps(), vec![]);
    }

    #[test]
    fn test_retry_is_noop_while_loading() {
        let source = ScriptedSource::new(vec![]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);

        let mut fetch = pin!(loader.fetch(EXERCISE, 0));
        assert!(poll_once(fetch.as_mut()).is_pending());
        assert_eq!(loader.state(), FetchState::Loading);

        block_on(loader.retry(EXERCISE));

        assert_eq!(loader.state(), FetchState::Loading);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_retry_after_failure() {
        let source = ScriptedSource::new(vec![
            Err(GenerateError::Other("bad response".into())),
            Ok(image()),
        ]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);

        block_on(loader.fetch(EXERCISE, 2));
        assert_eq!(loader.state(), FetchState::Failed(ERROR_MESSAGE.to_string()));

        block_on(loader.retry(EXERCISE));
        assert_eq!(loader.state(), FetchState::Loaded(image()));
        assert_eq!(source.calls(), 2);
        // only the stagger delay of the automatic fetch, no delay for the retry
        assert_eq!(timer.sleeps(), vec![Duration::from_millis(1000)]);
    }

    #[test]
    fn test_result_resolving_after_teardown_is_discarded() {
        let source = ScriptedSource::new(vec![Ok(image())]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);
        *source.release_on_call.borrow_mut() = Some(loader.scope());
        let changes = Rc::new(RefCell::new(vec![]));
        loader.on_change({
            let changes = Rc::clone(&changes);
            move |state: &FetchState| changes.borrow_mut().push(state.clone())
        });

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(source.calls(), 1);
        assert_eq!(loader.state(), FetchState::Loading);
        assert_eq!(*changes.borrow(), vec![FetchState::Loading]);
    }

    #[test]
    fn test_no_retry_after_teardown_during_backoff() {
        let source = ScriptedSource::new(vec![Err(GenerateError::RateLimited), Ok(image())]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);
        *timer.release_on_sleep.borrow_mut() = Some(loader.scope());

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(source.calls(), 1);
        assert_eq!(loader.state(), FetchState::Loading);
    }

    #[test]
    fn test_released_scope_stays_released() {
        let scope = Scope::new();
        assert!(scope.is_alive());
        scope.release();
        assert!(!scope.is_alive());
        scope.release();
        assert!(!scope.is_alive());
    }

    #[rstest]
    #[case(0, Duration::ZERO)]
    #[case(1, Duration::from_millis(500))]
    #[case(3, Duration::from_millis(1500))]
    fn test_stagger_delay(#[case] index: usize, #[case] expected: Duration) {
        assert_eq!(RetryPolicy::default().stagger_delay(index), expected);
    }

    #[rstest]
    #[case(0, 0.0, Duration::from_millis(2000))]
    #[case(0, 1.0, Duration::from_millis(3000))]
    #[case(1, 0.5, Duration::from_millis(4500))]
    #[case(3, 0.0, Duration::from_millis(16000))]
    #[case::jitter_clamped_high(0, 7.5, Duration::from_millis(3000))]
    #[case::jitter_clamped_low(0, -1.0, Duration::from_millis(2000))]
    fn test_backoff_delay(
        #[case] attempt: u32,
        #[case] jitter: f64,
        #[case] expected: Duration,
    ) {
        assert_eq!(RetryPolicy::default().backoff_delay(attempt, jitter), expected);
    }

    #[test]
    fn test_state_change_notifications() {
        let source = ScriptedSource::new(vec![Err(GenerateError::RateLimited), Ok(image())]);
        let timer = InstantTimer::new(0.0);
        let loader = loader(&source, &timer);
        let changes = Rc::new(RefCell::new(vec![]));
        loader.on_change({
            let changes = Rc::clone(&changes);
            move |state: &FetchState| changes.borrow_mut().push(state.clone())
        });

        block_on(loader.fetch(EXERCISE, 0));

        assert_eq!(
            *changes.borrow(),
            vec![FetchState::Loading, FetchState::Loaded(image())]
        );
    }
}
