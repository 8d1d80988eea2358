//! Fake process runner.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{Invocation, ProcessRunner};

type Hook = Box<dyn Fn(&Invocation) + Send + Sync>;

/// Records every invocation and answers with scripted outcomes.
///
/// Clones share the same recording, so a test can keep a handle while the
/// dispatcher owns another.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<Invocation>>,
    failures: Mutex<HashMap<String, i32>>,
    hook: Mutex<Option<Hook>>,
}

impl RecordingRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`.
    #[must_use]
    pub fn failing(self, program: &str, code: i32) -> Self {
        self.inner.failures.lock().insert(program.to_string(), code);
        self
    }

    /// Run `hook` for every successful invocation, e.g. to create the file a
    /// downloader would have written.
    #[must_use]
    pub fn on_run(self, hook: impl Fn(&Invocation) + Send + Sync + 'static) -> Self {
        *self.inner.hook.lock() = Some(Box::new(hook));
        self
    }

    /// All invocations seen so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.inner.calls.lock().clone()
    }

    /// Argument lists of all invocations, in order.
    #[must_use]
    pub fn argument_lists(&self) -> Vec<Vec<String>> {
        self.calls()
            .iter()
            .map(|call| call.arguments().to_vec())
            .collect()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().len()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.inner.calls.lock().push(invocation.clone());

        let failure = self.inner.failures.lock().get(invocation.program()).copied();
        if let Some(code) = failure {
            return Err(Error::ExternalProcess {
                program: invocation.program().to_string(),
                code: Some(code),
            });
        }

        if let Some(hook) = self.inner.hook.lock().as_ref() {
            hook(invocation);
        }
        Ok(())
    }
}
