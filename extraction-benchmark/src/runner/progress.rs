//! Progress reporting for long-running commands

/// Progress callback for tracking execution
///
/// `job` is the outer loop item (a scorer or a scraper), `item` the inner
/// one (a scraper or an article).
pub trait ProgressCallback: Send + Sync {
    fn on_item_start(&self, job: &str, item: &str);
    fn on_item_complete(&self, job: &str, item: &str, success: bool);
    /// Called once with `completed == 0` before any work, then after every item
    fn on_progress(&self, completed: usize, total: usize);
}

/// Default no-op progress callback
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_item_start(&self, _job: &str, _item: &str) {}
    fn on_item_complete(&self, _job: &str, _item: &str, _success: bool) {}
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Console progress callback
pub struct ConsoleProgress {
    unit: &'static str,
}

impl ConsoleProgress {
    /// `unit` names what is counted, e.g. "tables" or "articles"
    pub fn new(unit: &'static str) -> Self {
        Self { unit }
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_item_start(&self, job: &str, item: &str) {
        tracing::debug!("Starting {} on {}", job, item);
    }

    fn on_item_complete(&self, job: &str, item: &str, success: bool) {
        if !success {
            println!("  FAILED {} on {}", job, item);
        }
    }

    fn on_progress(&self, completed: usize, total: usize) {
        println!("Progress: {}/{} {} complete", completed, total, self.unit);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::Mutex;

    use super::ProgressCallback;

    /// Records every callback for assertions
    #[derive(Default)]
    pub struct RecordingProgress {
        pub started: Mutex<Vec<(String, String)>>,
        pub progress: Mutex<Vec<(usize, usize)>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_item_start(&self, job: &str, item: &str) {
            self.started.lock().unwrap().push((job.to_string(), item.to_string()));
        }

        fn on_item_complete(&self, _job: &str, _item: &str, _success: bool) {}

        fn on_progress(&self, completed: usize, total: usize) {
            self.progress.lock().unwrap().push((completed, total));
        }
    }
}
