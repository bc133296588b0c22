use crate::file_picker::interface::{FilePicker, SelectedFile};
use std::sync::Mutex;

/// Hands out queued files in order, then reports a dismissed dialog.
pub struct FilePickerFake {
    queue: Mutex<Vec<SelectedFile>>,
}

impl FilePickerFake {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        let mut queue = files;
        queue.reverse();
        Self {
            queue: Mutex::new(queue),
        }
    }
}

impl FilePicker for FilePickerFake {
    fn pick(&self) -> Result<Option<SelectedFile>, Box<dyn std::error::Error + Send + Sync>> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|e| format!("picker queue poisoned: {}", e))?;
        Ok(queue.pop())
    }
}
