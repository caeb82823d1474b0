/// Cosmetic progress stepper shown while the model works.
///
/// The remote call reports no progress, so the stepper walks a fixed list of
/// phases on a timer, stops two phases short of the end, and only completes
/// once the caller signals that the response has arrived.
use std::time::Duration;

/// One named phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
}

pub const STEPS: [Step; 5] = [
    Step {
        title: "Deconstructing Claim",
        description: "Breaking down the initial query into smaller, verifiable sub-claims.",
    },
    Step {
        title: "Executing Tools",
        description: "Using Google Search and Maps to gather real-time information and evidence.",
    },
    Step {
        title: "Analyzing Sources",
        description: "Evaluating the credibility, bias, and sentiment of the information found.",
    },
    Step {
        title: "Synthesizing Verdict",
        description: "Combining all findings into a comprehensive, final analysis and confidence score.",
    },
    Step {
        title: "Generating Report & Visuals",
        description: "Formatting the final analysis and rendering data visualizations.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

/// Stepper state. `current` is the index of the active step; it equals the
/// step count once everything is completed.
#[derive(Debug, Clone)]
pub struct ProgressStepper {
    steps: &'static [Step],
    current: usize,
    done: bool,
}

impl Default for ProgressStepper {
    fn default() -> Self {
        Self::new(&STEPS)
    }
}

impl ProgressStepper {
    /// A stepper over `steps`. Needs at least two steps to be meaningful.
    #[must_use]
    pub fn new(steps: &'static [Step]) -> Self {
        Self {
            steps,
            current: 0,
            done: false,
        }
    }

    /// Index at which the timer stops advancing.
    fn timer_limit(&self) -> usize {
        self.steps.len().saturating_sub(2)
    }

    /// Timer tick. Returns `true` if the stepper changed.
    pub fn tick(&mut self) -> bool {
        let before = self.current;
        if self.current < self.timer_limit() {
            self.current += 1;
        }
        self.settle();
        self.current != before
    }

    /// Signal that the real work has finished. Idempotent.
    pub fn complete(&mut self) {
        self.done = true;
        self.settle();
    }

    /// Mark every step completed at once, skipping the remaining timer ticks.
    pub fn finish(&mut self) {
        self.done = true;
        self.current = self.steps.len();
    }

    /// Once the timer has run out, show the last step as active until
    /// completion, then mark everything completed.
    fn settle(&mut self) {
        if self.current >= self.timer_limit() {
            self.current = if self.done {
                self.steps.len()
            } else {
                self.steps.len().saturating_sub(1)
            };
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.steps.len()
    }

    /// Whether the timer still has steps to advance.
    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.current < self.timer_limit()
    }

    #[must_use]
    pub fn status(&self, index: usize) -> StepStatus {
        if index < self.current {
            StepStatus::Completed
        } else if index == self.current {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    /// The active step, if any.
    #[must_use]
    pub fn active_step(&self) -> Option<&Step> {
        self.steps.get(self.current)
    }

    /// Steps paired with their status.
    pub fn iter(&self) -> impl Iterator<Item = (&Step, StepStatus)> + '_ {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step, self.status(i)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Run `work` while advancing `stepper` every `interval`, calling `on_change`
/// after each visible change. After `work` finishes the timer keeps ticking
/// until the stepper reaches its final state.
pub async fn drive<F, T>(
    stepper: &mut ProgressStepper,
    interval: Duration,
    work: F,
    on_change: impl FnMut(&ProgressStepper),
) -> T
where
    F: std::future::Future<Output = T>,
{
    drive_until(stepper, interval, work, on_change, |_| true).await
}

/// Like [`drive`] for fallible work: an `Err` finishes the stepper at once
/// instead of ticking through the remaining steps.
pub async fn drive_result<F, T, E>(
    stepper: &mut ProgressStepper,
    interval: Duration,
    work: F,
    on_change: impl FnMut(&ProgressStepper),
) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    drive_until(stepper, interval, work, on_change, Result::is_ok).await
}

/// `keep_ticking` decides from the output whether the remaining steps are
/// revealed on the timer or all at once.
async fn drive_until<F, T>(
    stepper: &mut ProgressStepper,
    interval: Duration,
    work: F,
    mut on_change: impl FnMut(&ProgressStepper),
    keep_ticking: impl FnOnce(&T) -> bool,
) -> T
where
    F: std::future::Future<Output = T>,
{
    let mut timer = tokio::time::interval(interval);
    // The first tick of a tokio interval fires immediately
    timer.tick().await;
    on_change(stepper);

    tokio::pin!(work);
    let output = loop {
        tokio::select! {
            out = &mut work => break out,
            _ = timer.tick() => {
                if stepper.tick() {
                    on_change(stepper);
                }
            }
        }
    };

    if keep_ticking(&output) {
        stepper.complete();
    } else {
        stepper.finish();
    }
    on_change(stepper);

    while !stepper.is_finished() {
        timer.tick().await;
        if stepper.tick() {
            on_change(stepper);
        }
    }

    output
}
