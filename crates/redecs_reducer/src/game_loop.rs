//! The game loop driver.
//!
//! Runs the fixed per-tick lifecycle:
//!
//! 1. Advance the tick counter.
//! 2. Poll pending deferred continuations (FIFO) and apply resolved effects.
//! 3. Dispatch queued entity events to every reducer.
//! 4. Run each reducer in order; apply its effect before the next one runs.
//! 5. Dispatch the events produced in step 4.
//!
//! Everything is single-threaded and sequential. The state is borrowed
//! mutably by exactly one reducer at a time.

use std::collections::VecDeque;
use std::task::Poll;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::deferred::Deferred;
use crate::effect::{EffectStep, EntityCommand, GameEffect};
use crate::error::LoopError;
use crate::event::EntityEvent;
use crate::reducer::Reducer;
use crate::state::GameState;

/// Configuration for [`GameLoop::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl LoopConfig {
    #[must_use]
    pub fn new(tick_rate: f64) -> Self {
        Self {
            tick_rate,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Check that the tick rate is usable.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::InvalidTickRate`] for zero, negative or
    /// non-finite rates, and for rates whose tick duration is zero or does
    /// not fit a [`Duration`].
    pub fn validate(&self) -> Result<(), LoopError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(LoopError::InvalidTickRate(self.tick_rate));
        }
        match Duration::try_from_secs_f64(1.0 / self.tick_rate) {
            Ok(duration) if !duration.is_zero() => Ok(()),
            _ => Err(LoopError::InvalidTickRate(self.tick_rate)),
        }
    }

    /// Wall-clock budget of one tick. Zero for a configuration that fails
    /// [`LoopConfig::validate`].
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.tick_rate).unwrap_or(Duration::ZERO)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// What happened during one [`GameLoop::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick_id: u64,
    pub reducers_run: usize,
    pub commands_applied: usize,
    pub events_dispatched: usize,
    pub deferred_resolved: usize,
    pub deferred_pending: usize,
}

/// Pending continuations and events, plus the single place where effects
/// touch the state.
struct EffectQueue<S> {
    pending: VecDeque<Deferred<S>>,
    events: VecDeque<EntityEvent>,
    commands_applied: usize,
}

impl<S: GameState> EffectQueue<S> {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            events: VecDeque::new(),
            commands_applied: 0,
        }
    }

    fn apply(&mut self, state: &mut S, effect: GameEffect<S>) {
        for step in effect.flatten() {
            match step {
                EffectStep::Command(command) => self.apply_command(state, command),
                EffectStep::Deferred(deferred) => {
                    debug!(label = deferred.label(), "deferred continuation queued");
                    self.pending.push_back(deferred);
                }
            }
        }
    }

    fn apply_command(&mut self, state: &mut S, command: EntityCommand<S>) {
        match command {
            EntityCommand::Spawn(spawn) => {
                let entity = state.entities_mut().spawn(spawn.tags);
                self.events.push_back(EntityEvent::Added(entity));
                for insert in spawn.components {
                    let component = insert.component();
                    insert.apply(state, entity);
                    self.events
                        .push_back(EntityEvent::ComponentSet { entity, component });
                }
                trace!(%entity, "entity spawned");
            }
            EntityCommand::Destroy(entity) => {
                if !state.entities_mut().remove(entity) {
                    warn!(%entity, "destroy of an entity that is not alive; skipped");
                    return;
                }
                self.events.push_back(EntityEvent::Removed(entity));
                trace!(%entity, "entity destroyed");
            }
            EntityCommand::Set { entity, insert } => {
                if !state.entities().contains(entity) {
                    warn!(
                        %entity,
                        component = insert.name(),
                        "component set on an entity that is not alive; skipped"
                    );
                    return;
                }
                let component = insert.component();
                insert.apply(state, entity);
                self.events
                    .push_back(EntityEvent::ComponentSet { entity, component });
            }
            EntityCommand::Remove { entity, removal } => {
                if !state.entities().contains(entity) {
                    warn!(
                        %entity,
                        component = removal.name(),
                        "component removal on an entity that is not alive; skipped"
                    );
                    return;
                }
                let component = removal.component();
                if removal.apply(state, entity) {
                    self.events
                        .push_back(EntityEvent::ComponentRemoved { entity, component });
                }
            }
        }
        self.commands_applied += 1;
    }

    /// Poll every continuation that was pending when the call started.
    ///
    /// Continuations queued by resolved effects wait for the next call.
    fn resolve_deferred(&mut self, state: &mut S) -> usize {
        let queued = std::mem::take(&mut self.pending);
        let mut still_pending = VecDeque::with_capacity(queued.len());
        let mut resolved = 0;

        for mut deferred in queued {
            match deferred.poll_once() {
                Poll::Pending => still_pending.push_back(deferred),
                Poll::Ready(Some(effect)) => {
                    debug!(label = deferred.label(), "deferred continuation resolved");
                    resolved += 1;
                    self.apply(state, effect);
                }
                Poll::Ready(None) => {
                    debug!(label = deferred.label(), "deferred continuation cancelled");
                }
            }
        }

        still_pending.append(&mut self.pending);
        self.pending = still_pending;
        resolved
    }
}

/// Owns the state, the environment and the ordered reducer list.
pub struct GameLoop<S, E> {
    tick_id: u64,
    config: LoopConfig,
    state: S,
    environment: E,
    reducers: Vec<Box<dyn Reducer<S, E>>>,
    queue: EffectQueue<S>,
}

impl<S: GameState, E> GameLoop<S, E> {
    /// Create a loop with no reducers.
    #[must_use]
    pub fn new(config: LoopConfig, state: S, environment: E) -> Self {
        Self {
            tick_id: 0,
            config,
            state,
            environment,
            reducers: Vec::new(),
            queue: EffectQueue::new(),
        }
    }

    /// Append a reducer. Reducers run in the order they were added.
    pub fn add_reducer<R>(&mut self, reducer: R) -> &mut Self
    where
        R: Reducer<S, E> + 'static,
    {
        debug!(reducer = %reducer.name(), position = self.reducers.len(), "reducer added");
        self.reducers.push(Box::new(reducer));
        self
    }

    /// Builder form of [`GameLoop::add_reducer`].
    #[must_use]
    pub fn with_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Reducer<S, E> + 'static,
    {
        self.add_reducer(reducer);
        self
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Direct state access between ticks. Mutations made here produce no
    /// lifecycle events; use [`GameLoop::apply_effect`] for that.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    #[must_use]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    /// Reducer names in execution order.
    #[must_use]
    pub fn reducer_names(&self) -> Vec<String> {
        self.reducers.iter().map(|r| r.name().into_owned()).collect()
    }

    /// Number of deferred continuations waiting to resolve.
    #[must_use]
    pub fn pending_deferred(&self) -> usize {
        self.queue.pending.len()
    }

    /// Number of events waiting for the next dispatch pass.
    #[must_use]
    pub fn queued_events(&self) -> usize {
        self.queue.events.len()
    }

    /// Apply an effect from outside the tick (setup code, input handlers).
    ///
    /// Mutations happen immediately; the resulting events are dispatched at
    /// the start of the next tick, before any reducer runs.
    pub fn apply_effect(&mut self, effect: GameEffect<S>) {
        self.queue.apply(&mut self.state, effect);
    }

    fn dispatch_events(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(event) = self.queue.events.pop_front() {
            trace!(?event, "dispatching entity event");
            for reducer in &self.reducers {
                reducer.reduce_event(&mut self.state, &event, &self.environment);
            }
            dispatched += 1;
        }
        dispatched
    }

    /// Run one tick with `delta` seconds of elapsed time.
    pub fn tick(&mut self, delta: f64) -> TickReport {
        self.tick_id += 1;
        self.queue.commands_applied = 0;

        let deferred_resolved = self.queue.resolve_deferred(&mut self.state);
        let mut events_dispatched = self.dispatch_events();

        for reducer in &self.reducers {
            let effect = reducer.reduce(&mut self.state, delta, &self.environment);
            if !effect.is_none() {
                trace!(reducer = %reducer.name(), ?effect, "applying effect");
            }
            self.queue.apply(&mut self.state, effect);
        }

        events_dispatched += self.dispatch_events();

        let report = TickReport {
            tick_id: self.tick_id,
            reducers_run: self.reducers.len(),
            commands_applied: self.queue.commands_applied,
            events_dispatched,
            deferred_resolved,
            deferred_pending: self.queue.pending.len(),
        };
        debug!(
            tick_id = report.tick_id,
            delta,
            commands = report.commands_applied,
            events = report.events_dispatched,
            deferred_pending = report.deferred_pending,
            "tick complete"
        );
        report
    }

    /// Run the loop at the configured rate for `max_ticks` ticks, or
    /// indefinitely.
    ///
    /// This is a blocking loop with a fixed timestep.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::InvalidTickRate`] if the configuration is invalid.
    pub fn run(&mut self) -> Result<(), LoopError> {
        self.config.validate()?;
        let tick_duration = self.config.tick_duration();
        let dt = tick_duration.as_secs_f64();
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            reducers = self.reducers.len(),
            "starting game loop"
        );

        loop {
            let start = Instant::now();
            self.tick(dt);

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "game loop complete");
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }

    /// Consume the loop and return the state.
    #[must_use]
    pub fn into_state(self) -> S {
        self.state
    }
}
