// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Run specifications: what a single named benchmark executes.
//!
//! A [`RunSpec`] is either stateless (the body takes no input) or stateful
//! (a one-time setup produces a fixture that every sample receives). Both
//! variants carry a `describe` step that turns a body's result into a
//! human-readable label.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

/// Boxed future returned by every step of a run.
pub type RunFuture<R> = BoxFuture<'static, anyhow::Result<R>>;

type Body<R> = Box<dyn FnMut() -> RunFuture<R> + Send>;
type Describe<R> = Box<dyn FnMut(R) -> RunFuture<String> + Send>;

/// The contract for one benchmark.
pub enum RunSpec<T, R> {
    /// Body with no fixture.
    Stateless { run: Body<R>, describe: Describe<R> },
    /// Body that receives the fixture produced once by `setup`.
    Stateful {
        setup: Box<dyn FnOnce() -> RunFuture<T> + Send>,
        run: Box<dyn FnMut(Arc<T>) -> RunFuture<R> + Send>,
        describe: Describe<R>,
    },
}

impl<R: Send + 'static> RunSpec<(), R> {
    /// Create a run whose body takes no input.
    pub fn stateless<F, Fut, D, DFut>(mut run: F, describe: D) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        D: FnMut(R) -> DFut + Send + 'static,
        DFut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        RunSpec::Stateless {
            run: Box::new(move || run().boxed()),
            describe: boxed_describe(describe),
        }
    }
}

impl<T, R> RunSpec<T, R>
where
    T: Send + Sync + 'static,
    R: Send + 'static,
{
    /// Create a run whose body receives a fixture built once by `setup`.
    pub fn stateful<S, SFut, F, Fut, D, DFut>(setup: S, mut run: F, describe: D) -> Self
    where
        S: FnOnce() -> SFut + Send + 'static,
        SFut: Future<Output = anyhow::Result<T>> + Send + 'static,
        F: FnMut(Arc<T>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        D: FnMut(R) -> DFut + Send + 'static,
        DFut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        RunSpec::Stateful {
            setup: Box::new(move || setup().boxed()),
            run: Box::new(move |fixture| run(fixture).boxed()),
            describe: boxed_describe(describe),
        }
    }

    /// Whether this run has a setup step.
    pub fn is_stateful(&self) -> bool {
        matches!(self, RunSpec::Stateful { .. })
    }

    /// Run the setup step, if any, and return the callable body.
    ///
    /// Consumes the spec, so setup can run at most once.
    pub(crate) async fn prepare(self) -> anyhow::Result<Prepared<R>> {
        match self {
            RunSpec::Stateless { run, describe } => Ok(Prepared { run, describe }),
            RunSpec::Stateful {
                setup,
                mut run,
                describe,
            } => {
                let fixture = Arc::new(setup().await?);
                Ok(Prepared {
                    run: Box::new(move || run(Arc::clone(&fixture))),
                    describe,
                })
            }
        }
    }
}

/// A run after setup: the body is ready to be sampled.
pub(crate) struct Prepared<R> {
    run: Body<R>,
    describe: Describe<R>,
}

impl<R> Prepared<R> {
    pub(crate) fn invoke(&mut self) -> RunFuture<R> {
        (self.run)()
    }

    pub(crate) fn describe(&mut self, result: R) -> RunFuture<String> {
        (self.describe)(result)
    }
}

fn boxed_describe<R, D, DFut>(mut describe: D) -> Describe<R>
where
    D: FnMut(R) -> DFut + Send + 'static,
    DFut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    Box::new(move |result| describe(result).boxed())
}
