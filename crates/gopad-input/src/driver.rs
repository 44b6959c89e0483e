//! Per-tick sampling driver

use crate::debounce::DebounceEngine;
use crate::interface::{InputInterface, Monotonic};
use crate::key::GamepadState;
use crate::sampler::Sampler;
use crate::subsystem::InputSubsystem;

/// Owns the hardware interface and debounce state for the sampling task.
///
/// The periodic task calls [`tick`](Self::tick) once per configured
/// interval. A tick never blocks and never errors: it samples the raw
/// state, folds in the external controller source (a no-op stub today),
/// debounces, and publishes the result in one store. Scheduling, pinning
/// and the inter-tick sleep belong to the caller.
pub struct SamplingDriver<'a, I, C> {
    interface: I,
    sampler: Sampler,
    engine: DebounceEngine,
    shared: &'a InputSubsystem<C>,
}

impl<'a, I, C> SamplingDriver<'a, I, C>
where
    I: InputInterface,
    C: Monotonic,
{
    pub fn new(interface: I, sampler: Sampler, shared: &'a InputSubsystem<C>) -> Self {
        Self {
            interface,
            sampler,
            engine: DebounceEngine::new(),
            shared,
        }
    }

    /// Run one sample + debounce + publish cycle.
    pub fn tick(&mut self) -> GamepadState {
        let mut raw = self.sampler.sample(&mut self.interface);
        raw = raw.union(self.interface.read_external());
        let state = self.engine.update(raw);
        self.shared.publish(state);
        state
    }
}
