use crate::file_picker::interface::{FilePicker, SelectedFile};

pub struct FilePickerNative {
    extensions: Vec<String>,
}

impl FilePickerNative {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }
}

impl FilePicker for FilePickerNative {
    fn pick(&self) -> Result<Option<SelectedFile>, Box<dyn std::error::Error + Send + Sync>> {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a leaf image")
            .add_filter("Images", &self.extensions)
            .pick_file();

        match picked {
            Some(path) => Ok(Some(SelectedFile::from_path(&path)?)),
            None => Ok(None),
        }
    }
}
